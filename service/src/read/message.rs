//! [`Message`]-related read definitions.

use crate::domain::user;
#[cfg(doc)]
use crate::domain::{Message, User};

/// Selects the [`Message`]s exchanged between two [`User`]s, oldest first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Between(pub user::Id, pub user::Id);
