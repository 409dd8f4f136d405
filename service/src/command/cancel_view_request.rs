//! [`Command`] for cancelling an accepted [`ViewRequest`].

use tracerr::Traced;

use crate::{
    domain::{user, view_request, ViewRequest},
    workflow::view,
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::{transit_view_request, Command, TransitViewRequest};

/// [`Command`] for the owner to cancel an accepted [`ViewRequest`].
#[derive(Clone, Debug)]
pub struct CancelViewRequest {
    /// ID of the [`User`] cancelling.
    pub actor_id: user::Id,

    /// ID of the [`ViewRequest`] to cancel.
    pub request_id: view_request::Id,

    /// [`view_request::Note`] explaining the cancellation, if any.
    pub note: Option<view_request::Note>,
}

impl<Db, Nt> Command<CancelViewRequest> for Service<Db, Nt>
where
    Self: Command<
        TransitViewRequest,
        Ok = ViewRequest,
        Err = Traced<ExecutionError>,
    >,
{
    type Ok = ViewRequest;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CancelViewRequest,
    ) -> Result<Self::Ok, Self::Err> {
        let CancelViewRequest {
            actor_id,
            request_id,
            note,
        } = cmd;

        self.execute(TransitViewRequest {
            actor_id,
            request_id,
            action: view::Action::Cancel { note },
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`CancelViewRequest`] [`Command`] execution.
pub type ExecutionError = transit_view_request::ExecutionError;
