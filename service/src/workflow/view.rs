//! [`ViewRequest`] state machine.
//!
//! ```text
//! PENDING ──accept──> ACCEPTED ──cancel──> REJECTED
//!    └──────────────reject──────────────────┘
//! ```
//!
//! [`ViewRequest`]: crate::domain::ViewRequest

use derive_more::{Display, Error as StdError};

use crate::domain::{
    notification, user,
    view_request::{Note, Status},
};

use super::{Notice, Transition};

/// Users involved into a view request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Parties {
    /// User willing to view the room.
    pub renter: user::Id,

    /// User owning the room.
    pub owner: user::Id,
}

/// State of a view request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State {
    /// Current [`Status`].
    pub status: Status,

    /// [`Note`] of the owner, if any.
    pub note: Option<Note>,
}

impl State {
    /// [`State`] of a freshly created view request.
    pub const INITIAL: Self = Self {
        status: Status::Pending,
        note: None,
    };
}

/// Action upon an existing view request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// Owner accepts the request.
    Accept {
        /// [`Note`] for the renter, if any.
        note: Option<Note>,

        /// Owner's phone shared with the renter, if any.
        contact: Option<user::Phone>,
    },

    /// Owner rejects the request.
    Reject {
        /// [`Note`] for the renter, if any.
        note: Option<Note>,
    },

    /// Owner cancels an accepted request.
    Cancel {
        /// [`Note`] for the renter, the stored one is kept if [`None`].
        note: Option<Note>,
    },
}

/// Error of a view request transition.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Acting user is not allowed to perform the action.
    #[display("`User(id: {_0})` is not allowed to perform this action")]
    Forbidden(#[error(not(source))] user::Id),

    /// Action is not allowed in the current [`Status`].
    #[display("view request is `{status}`: {reason}")]
    InvalidState {
        /// Current [`Status`] of the view request.
        status: Status,

        /// Explanation of the rejection.
        reason: &'static str,
    },
}

/// Creates a new view request between the provided [`Parties`].
///
/// # Errors
///
/// [`Error::Forbidden`] if the renter owns the room.
pub fn create(parties: Parties) -> Result<Transition<State>, Error> {
    if parties.renter == parties.owner {
        return Err(Error::Forbidden(parties.renter));
    }

    Ok(Transition {
        state: State::INITIAL,
        notices: vec![notice(
            parties.owner,
            "You have received a new viewing request for your room".into(),
        )],
    })
}

/// Applies the `action` of the `actor` to the provided `state`.
///
/// All the actions belong to the owner.
///
/// # Errors
///
/// - [`Error::Forbidden`] if the `actor` is not the owner;
/// - [`Error::InvalidState`] if the `action` is not allowed in the current
///   [`Status`].
pub fn transition(
    state: State,
    actor: user::Id,
    parties: Parties,
    action: Action,
) -> Result<Transition<State>, Error> {
    if actor != parties.owner {
        return Err(Error::Forbidden(actor));
    }

    let (expected, reason) = match &action {
        Action::Accept { .. } | Action::Reject { .. } => {
            (Status::Pending, "already processed")
        }
        Action::Cancel { .. } => (Status::Accepted, "can only cancel ACCEPTED"),
    };
    if state.status != expected {
        return Err(Error::InvalidState {
            status: state.status,
            reason,
        });
    }

    let (status, note, text) = match action {
        Action::Accept { note, contact } => {
            let text = match contact {
                Some(phone) => format!(
                    "Your viewing request has been accepted. Owner contact: \
                     {phone}",
                ),
                None => "Your viewing request has been accepted".to_owned(),
            };
            (Status::Accepted, note, text)
        }
        Action::Reject { note } => {
            let text = with_note("Your viewing request has been rejected", note.as_ref());
            (Status::Rejected, note, text)
        }
        Action::Cancel { note } => {
            let text = with_note(
                "Your accepted viewing has been cancelled by the owner",
                note.as_ref(),
            );
            (Status::Rejected, note.or(state.note), text)
        }
    };

    Ok(Transition {
        state: State { status, note },
        notices: vec![notice(parties.renter, text)],
    })
}

/// Appends the optional [`Note`] to the provided `text`.
fn with_note(text: &str, note: Option<&Note>) -> String {
    match note {
        Some(note) => format!("{text}: {note}"),
        None => text.to_owned(),
    }
}

/// Creates a view request [`Notice`] for the `recipient`.
fn notice(recipient: user::Id, text: String) -> Notice {
    Notice {
        recipient,
        kind: notification::Kind::ViewRequest,
        text,
    }
}
