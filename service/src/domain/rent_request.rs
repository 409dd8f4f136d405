//! [`RentRequest`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{room, user};
#[cfg(doc)]
use crate::domain::{Room, User};

/// Request of a tenant to rent a [`Room`].
#[derive(Clone, Debug)]
pub struct RentRequest {
    /// ID of this [`RentRequest`].
    pub id: Id,

    /// ID of the [`User`] willing to rent the [`Room`].
    pub tenant_id: user::Id,

    /// ID of the requested [`Room`].
    pub room_id: room::Id,

    /// [`Status`] of this [`RentRequest`].
    pub status: Status,

    /// [`Finalization`] marks of this [`RentRequest`].
    pub finalization: Finalization,

    /// [`DateTime`] when this [`RentRequest`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`RentRequest`].
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
    #[doc = "Status of a [`RentRequest`]."]
    enum Status {
        #[doc = "Awaits the owner's decision."]
        Pending = 1,

        #[doc = "Approved by the owner, the viewing is to be confirmed."]
        Approved = 2,

        #[doc = "Rejected or cancelled by the owner."]
        Rejected = 3,

        #[doc = "Tenant confirmed the viewing took place."]
        ViewConfirmed = 4,

        #[doc = "Both parties finalized the rental."]
        BothFinalized = 5,
    }
}

impl Status {
    /// Indicates whether no further transition is possible from this
    /// [`Status`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::BothFinalized)
    }

    /// Indicates whether a [`RentRequest`] in this [`Status`] still blocks
    /// its tenant from requesting the same [`Room`] again.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !self.is_terminal()
    }
}

/// Finalization marks put by both parties of a [`RentRequest`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Finalization {
    /// Tenant has finalized.
    pub tenant: bool,

    /// Owner has finalized.
    pub owner: bool,
}

impl Finalization {
    /// Indicates whether both parties have finalized.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.tenant && self.owner
    }

    /// Derives the [`Status`] implied by these marks, given the `prior` one.
    ///
    /// Both marks force [`Status::BothFinalized`], otherwise the `prior`
    /// [`Status`] stays.
    #[must_use]
    pub const fn status(self, prior: Status) -> Status {
        if self.is_complete() {
            Status::BothFinalized
        } else {
            prior
        }
    }
}

/// [`DateTime`] when a [`RentRequest`] was created.
pub type CreationDateTime = DateTimeOf<(RentRequest, unit::Creation)>;
