//! [`Command`] for responding to a pending [`ViewRequest`].

use tracerr::Traced;

use crate::{
    domain::{user, view_request, ViewRequest},
    workflow::view,
    Service,
};
#[cfg(doc)]
use crate::domain::User;

use super::{transit_view_request, Command, TransitViewRequest};

/// [`Command`] for the owner to accept or reject a pending [`ViewRequest`].
#[derive(Clone, Debug)]
pub struct RespondViewRequest {
    /// ID of the [`User`] responding.
    pub actor_id: user::Id,

    /// ID of the [`ViewRequest`] to respond to.
    pub request_id: view_request::Id,

    /// Indicator whether the [`ViewRequest`] is accepted.
    pub accept: bool,

    /// [`view_request::Note`] for the renter, if any.
    pub note: Option<view_request::Note>,
}

impl<Db, Nt> Command<RespondViewRequest> for Service<Db, Nt>
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
        cmd: RespondViewRequest,
    ) -> Result<Self::Ok, Self::Err> {
        let RespondViewRequest {
            actor_id,
            request_id,
            accept,
            note,
        } = cmd;

        let action = if accept {
            view::Action::Accept {
                note,
                contact: None,
            }
        } else {
            view::Action::Reject { note }
        };
        self.execute(TransitViewRequest {
            actor_id,
            request_id,
            action,
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`RespondViewRequest`] [`Command`] execution.
pub type ExecutionError = transit_view_request::ExecutionError;
