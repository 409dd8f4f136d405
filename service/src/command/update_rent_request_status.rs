//! [`Command`] for deciding upon a pending [`RentRequest`].

use tracerr::Traced;

use crate::{
    domain::{rent_request, user, RentRequest},
    workflow::rent,
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::{transit_rent_request, Command, TransitRentRequest};

/// [`Command`] for the owner to approve or reject a pending [`RentRequest`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateRentRequestStatus {
    /// ID of the [`User`] deciding.
    pub actor_id: user::Id,

    /// ID of the [`RentRequest`] to decide upon.
    pub request_id: rent_request::Id,

    /// [`rent::Decision`] of the owner.
    pub decision: rent::Decision,
}

impl<Db, Nt> Command<UpdateRentRequestStatus> for Service<Db, Nt>
where
    Self: Command<
        TransitRentRequest,
        Ok = RentRequest,
        Err = Traced<ExecutionError>,
    >,
{
    type Ok = RentRequest;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateRentRequestStatus,
    ) -> Result<Self::Ok, Self::Err> {
        let UpdateRentRequestStatus {
            actor_id,
            request_id,
            decision,
        } = cmd;

        self.execute(TransitRentRequest {
            actor_id,
            request_id,
            action: rent::Action::Decide(decision),
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateRentRequestStatus`] [`Command`] execution.
pub type ExecutionError = transit_rent_request::ExecutionError;
