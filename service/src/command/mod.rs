//! [`Command`] definition.

pub mod cancel_rent_request;
pub mod cancel_view_request;
pub mod confirm_rent_finalize;
pub mod confirm_rent_viewing;
pub mod create_rent_request;
pub mod create_report;
pub mod create_room;
pub mod create_user;
pub mod create_view_request;
pub mod read_notification;
pub mod resolve_report;
pub mod respond_view_request;
pub mod send_message;
pub mod transit_rent_request;
pub mod transit_view_request;
pub mod update_rent_request_status;

use derive_more::Display;

use crate::workflow;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    cancel_rent_request::CancelRentRequest,
    cancel_view_request::CancelViewRequest,
    confirm_rent_finalize::ConfirmRentFinalize,
    confirm_rent_viewing::ConfirmRentViewing,
    create_rent_request::CreateRentRequest, create_report::CreateReport,
    create_room::CreateRoom, create_user::CreateUser,
    create_view_request::CreateViewRequest,
    read_notification::ReadNotification, resolve_report::ResolveReport,
    respond_view_request::RespondViewRequest, send_message::SendMessage,
    transit_rent_request::TransitRentRequest,
    transit_view_request::TransitViewRequest,
    update_rent_request_status::UpdateRentRequestStatus,
};

/// Coarse category of a [`Command`] execution error.
///
/// Lets an outer transport pick a response status without matching every
/// `ExecutionError` variant.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// Acting user is not allowed to perform the operation.
    Forbidden,

    /// Operation is not allowed in the current state of an entity.
    InvalidState,

    /// Referenced entity doesn't exist.
    NotFound,

    /// Provided input is invalid.
    Invalid,

    /// Infrastructure failure.
    Internal,
}

impl From<&workflow::rent::Error> for ErrorKind {
    fn from(e: &workflow::rent::Error) -> Self {
        use workflow::rent::Error as E;

        match e {
            E::Forbidden(_) => Self::Forbidden,
            E::InvalidState { .. } => Self::InvalidState,
        }
    }
}

impl From<&workflow::view::Error> for ErrorKind {
    fn from(e: &workflow::view::Error) -> Self {
        use workflow::view::Error as E;

        match e {
            E::Forbidden(_) => Self::Forbidden,
            E::InvalidState { .. } => Self::InvalidState,
        }
    }
}
