//! [`ViewRequest`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{room, user};
#[cfg(doc)]
use crate::domain::{Room, User};

/// Request of a renter to view a [`Room`] before renting it.
#[derive(Clone, Debug)]
pub struct ViewRequest {
    /// ID of this [`ViewRequest`].
    pub id: Id,

    /// ID of the [`User`] willing to view the [`Room`].
    pub renter_id: user::Id,

    /// ID of the [`Room`] to be viewed.
    pub room_id: room::Id,

    /// ID of the [`User`] owning the [`Room`] at the moment of this
    /// [`ViewRequest`] creation.
    pub owner_id: user::Id,

    /// [`Status`] of this [`ViewRequest`].
    pub status: Status,

    /// [`Note`] left by the owner when responding, if any.
    pub note: Option<Note>,

    /// [`DateTime`] when this [`ViewRequest`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`ViewRequest`].
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
    #[doc = "Status of a [`ViewRequest`]."]
    enum Status {
        #[doc = "Awaits the owner's response."]
        Pending = 1,

        #[doc = "Accepted by the owner."]
        Accepted = 2,

        #[doc = "Rejected or cancelled by the owner."]
        Rejected = 3,
    }
}

define_text! {
    #[doc = "Note of an owner responding to a [`ViewRequest`]."]
    Note(max = 2048)
}

/// [`DateTime`] when a [`ViewRequest`] was created.
pub type CreationDateTime = DateTimeOf<(ViewRequest, unit::Creation)>;
