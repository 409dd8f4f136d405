//! [`Notification`]-related read definitions.

use crate::domain::user;
#[cfg(doc)]
use crate::domain::{Notification, User};

/// Selects [`Notification`]s addressed to the [`User`], newest first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ForRecipient {
    /// ID of the recipient [`User`].
    pub recipient_id: user::Id,

    /// Indicator whether only unread [`Notification`]s are selected.
    pub unread_only: bool,
}
