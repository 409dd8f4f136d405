//! [`Message`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{room, user};
#[cfg(doc)]
use crate::domain::{Room, User};

/// Chat message sent from one [`User`] to another.
#[derive(Clone, Debug)]
pub struct Message {
    /// ID of this [`Message`].
    pub id: Id,

    /// ID of the [`User`] who sent this [`Message`].
    pub sender_id: user::Id,

    /// ID of the [`User`] this [`Message`] is addressed to.
    pub recipient_id: user::Id,

    /// ID of the [`Room`] this [`Message`] is about, if any.
    pub room_id: Option<room::Id>,

    /// [`Content`] of this [`Message`].
    pub content: Content,

    /// [`DateTime`] when this [`Message`] was sent.
    pub created_at: CreationDateTime,
}

impl Message {
    /// Indicates whether this [`Message`] belongs to the conversation of the
    /// provided [`User`]s, in either direction.
    #[must_use]
    pub fn is_between(&self, a: user::Id, b: user::Id) -> bool {
        (self.sender_id == a && self.recipient_id == b)
            || (self.sender_id == b && self.recipient_id == a)
    }
}

/// ID of a [`Message`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

define_text! {
    #[doc = "Content of a [`Message`]."]
    Content(max = 4096)
}

/// [`DateTime`] when a [`Message`] was sent.
pub type CreationDateTime = DateTimeOf<(Message, unit::Creation)>;
