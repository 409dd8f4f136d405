//! [`Command`] for confirming the viewing of a [`RentRequest`].

use tracerr::Traced;

use crate::{
    domain::{rent_request, user, RentRequest},
    workflow::rent,
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::{transit_rent_request, Command, TransitRentRequest};

/// [`Command`] for the tenant to confirm the viewing of an approved [`RentRequest`].
#[derive(Clone, Copy, Debug)]
pub struct ConfirmRentViewing {
    /// ID of the [`User`] confirming the viewing.
    pub actor_id: user::Id,

    /// ID of the [`RentRequest`].
    pub request_id: rent_request::Id,
}

impl<Db, Nt> Command<ConfirmRentViewing> for Service<Db, Nt>
where
    Self: Command<
        TransitRentRequest,
        Ok = RentRequest,
        Err = Traced<ExecutionError>,
    >,
{
    type Ok = RentRequest;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ConfirmRentViewing) -> Result<Self::Ok, Self::Err> {
        let ConfirmRentViewing {
            actor_id,
            request_id,
        } = cmd;

        self.execute(TransitRentRequest {
            actor_id,
            request_id,
            action: rent::Action::ConfirmViewing,
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`ConfirmRentViewing`] [`Command`] execution.
pub type ExecutionError = transit_rent_request::ExecutionError;
