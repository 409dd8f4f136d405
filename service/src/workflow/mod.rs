//! Pure state machines of the rental process.
//!
//! Every transition takes the current state, the acting [`User`] and the
//! parties involved, and either returns the next state along with the
//! [`Notice`]s to deliver, or an error. No I/O happens here: loading and
//! persisting the state is up to the [`Command`]s.
//!
//! [`Command`]: crate::Command
//! [`User`]: crate::domain::User

pub mod rent;
pub mod view;

use crate::domain::{notification, user, Notification};

/// Notice to be delivered to a user as a result of a [`Transition`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    /// ID of the user to notify.
    pub recipient: user::Id,

    /// [`notification::Kind`] of this [`Notice`].
    pub kind: notification::Kind,

    /// Human-readable text of this [`Notice`].
    pub text: String,
}

impl From<Notice> for Notification {
    fn from(notice: Notice) -> Self {
        let Notice {
            recipient,
            kind,
            text,
        } = notice;
        Self::new(recipient, kind, text.into())
    }
}

/// Successful transition of a state machine into a new `S`tate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transition<S> {
    /// New state.
    pub state: S,

    /// [`Notice`]s to deliver, in order.
    pub notices: Vec<Notice>,
}

impl<S> Transition<S> {
    /// Returns the [`Notification`]s to persist and publish for this
    /// [`Transition`].
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notices.iter().cloned().map(Into::into).collect()
    }
}
