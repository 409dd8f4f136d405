//! [`Query`] collection related to the multiple [`Notification`]s.

use common::operations::By;

use crate::{domain::Notification, read::notification::ForRecipient};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Notification`]s of a recipient, newest first.
pub type ByRecipient = DatabaseQuery<By<Vec<Notification>, ForRecipient>>;
