//! [`Command`] for finalizing the rental of a [`RentRequest`].

use tracerr::Traced;

use crate::{
    domain::{rent_request, user, RentRequest},
    workflow::rent,
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::{transit_rent_request, Command, TransitRentRequest};

/// [`Command`] for either party to finalize the rental of a [`RentRequest`]
/// with a confirmed viewing.
///
/// Repeated finalization by the same party changes nothing.
#[derive(Clone, Copy, Debug)]
pub struct ConfirmRentFinalize {
    /// ID of the [`User`] finalizing the rental.
    pub actor_id: user::Id,

    /// ID of the [`RentRequest`].
    pub request_id: rent_request::Id,
}

impl<Db, Nt> Command<ConfirmRentFinalize> for Service<Db, Nt>
where
    Self: Command<
        TransitRentRequest,
        Ok = RentRequest,
        Err = Traced<ExecutionError>,
    >,
{
    type Ok = RentRequest;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ConfirmRentFinalize) -> Result<Self::Ok, Self::Err> {
        let ConfirmRentFinalize {
            actor_id,
            request_id,
        } = cmd;

        self.execute(TransitRentRequest {
            actor_id,
            request_id,
            action: rent::Action::ConfirmFinalize,
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`ConfirmRentFinalize`] [`Command`] execution.
pub type ExecutionError = transit_rent_request::ExecutionError;
