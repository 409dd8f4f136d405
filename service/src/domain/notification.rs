//! [`Notification`] definitions.

use std::fmt;

use common::{define_kind, unit, DateTime, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Notification addressed to a [`User`].
///
/// Serializes into the payload delivered on the recipient's [`Topic`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// ID of this [`Notification`].
    pub id: Id,

    /// ID of the [`User`] this [`Notification`] is addressed to.
    pub recipient_id: user::Id,

    /// [`Kind`] of this [`Notification`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// [`Text`] of this [`Notification`].
    pub text: Text,

    /// Indicator whether the recipient has read this [`Notification`].
    pub is_read: bool,

    /// [`DateTime`] when this [`Notification`] was created.
    pub created_at: CreationDateTime,
}

impl Notification {
    /// Creates a new unread [`Notification`].
    #[must_use]
    pub fn new(recipient_id: user::Id, kind: Kind, text: Text) -> Self {
        Self {
            id: Id::new(),
            recipient_id,
            kind,
            text,
            is_read: false,
            created_at: DateTime::now().coerce(),
        }
    }

    /// Returns the [`Topic`] this [`Notification`] is delivered on.
    #[must_use]
    pub fn topic(&self) -> Topic {
        Topic(self.recipient_id)
    }
}

/// ID of a [`Notification`].
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

define_kind! {
    #[doc = "Kind of a [`Notification`]."]
    enum Kind {
        #[doc = "Update on a rent request."]
        RentRequest = 1,

        #[doc = "Update on a view request."]
        ViewRequest = 2,

        #[doc = "New chat message."]
        Message = 3,

        #[doc = "Update on a report."]
        Report = 4,
    }
}

/// Human-readable text of a [`Notification`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, PartialEq, Serialize)]
#[as_ref(str, String)]
#[from(String, &str)]
pub struct Text(String);

/// Publish-subscribe topic of [`Notification`]s addressed to a single
/// [`User`].
#[derive(Clone, Copy, Debug, Eq, From, Hash, PartialEq)]
pub struct Topic(user::Id);

impl Topic {
    /// Prefix of every [`Topic`] name.
    pub const PREFIX: &'static str = "/topic/notifications/";

    /// Returns the ID of the [`User`] subscribed to this [`Topic`].
    #[must_use]
    pub const fn user_id(self) -> user::Id {
        self.0
    }
}

impl Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// [`DateTime`] when a [`Notification`] was created.
pub type CreationDateTime = DateTimeOf<(Notification, unit::Creation)>;
