//! [`Query`] collection related to the multiple [`Message`]s.

use common::operations::By;

use crate::{domain::Message, read::message::Between};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the conversation between two users, oldest first.
pub type Conversation = DatabaseQuery<By<Vec<Message>, Between>>;
