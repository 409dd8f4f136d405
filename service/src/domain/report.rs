//! [`Report`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{room, user};
#[cfg(doc)]
use crate::domain::{Room, User};

/// Complaint about a [`Room`] listing, awaiting moderation.
#[derive(Clone, Debug)]
pub struct Report {
    /// ID of this [`Report`].
    pub id: Id,

    /// ID of the [`User`] who filed this [`Report`].
    pub reporter_id: user::Id,

    /// ID of the reported [`Room`].
    pub room_id: room::Id,

    /// [`Reason`] of this [`Report`].
    pub reason: Reason,

    /// [`Status`] of this [`Report`].
    pub status: Status,

    /// [`DateTime`] when this [`Report`] was filed.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Report`] was resolved, if it was.
    pub resolved_at: Option<ResolutionDateTime>,
}

/// ID of a [`Report`].
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
    #[doc = "Reason of a [`Report`]."]
    Reason(max = 2048)
}

define_kind! {
    #[doc = "Status of a [`Report`]."]
    enum Status {
        #[doc = "Awaits moderation."]
        Pending = 1,

        #[doc = "Confirmed by a moderator, the [`Room`] is hidden."]
        Resolved = 2,

        #[doc = "Dismissed by a moderator."]
        Dismissed = 3,
    }
}

/// [`DateTime`] when a [`Report`] was filed.
pub type CreationDateTime = DateTimeOf<(Report, unit::Creation)>;

/// [`DateTime`] when a [`Report`] was resolved.
pub type ResolutionDateTime = DateTimeOf<(Report, unit::Resolution)>;
