//! [`Room`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user;
#[cfg(doc)]
use crate::domain::User;

/// Room listed for rent.
#[derive(Clone, Debug)]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// ID of the [`User`] owning this [`Room`].
    pub owner_id: user::Id,

    /// [`Title`] of this [`Room`].
    pub title: Title,

    /// [`Description`] of this [`Room`].
    pub description: Description,

    /// [`Address`] of this [`Room`].
    pub address: Address,

    /// [`City`] this [`Room`] is located in.
    pub city: City,

    /// [`District`] this [`Room`] is located in, if known.
    pub district: Option<District>,

    /// Monthly [`Price`] of this [`Room`].
    pub price: Price,

    /// [`Area`] of this [`Room`].
    pub area: Area,

    /// [`Capacity`] of this [`Room`].
    pub capacity: Capacity,

    /// [`Status`] of this [`Room`].
    pub status: Status,

    /// [`DateTime`] when this [`Room`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`Room`].
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
    #[doc = "Title of a [`Room`] listing."]
    Title(max = 256)
}

define_text! {
    #[doc = "Free-form description of a [`Room`]."]
    Description(max = 8192)
}

define_text! {
    #[doc = "Street address of a [`Room`]."]
    Address(max = 512)
}

define_text! {
    #[doc = "City of a [`Room`]."]
    City(max = 128)
}

define_text! {
    #[doc = "District of a [`Room`] within its [`City`]."]
    District(max = 128)
}

/// Monthly rent price of a [`Room`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] if the given `amount` is not negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative()).then_some(Self(amount.normalize()))
    }
}

/// Floor area of a [`Room`] in square meters.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct Area(Decimal);

impl Area {
    /// Creates a new [`Area`] if the given `value` is positive.
    #[must_use]
    pub fn new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Self(value.normalize()))
    }
}

/// Maximum number of tenants a [`Room`] accommodates.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd)]
pub struct Capacity(u16);

impl Capacity {
    /// Creates a new [`Capacity`] if the given `value` is at least one.
    #[must_use]
    pub fn new(value: u16) -> Option<Self> {
        (value >= 1).then_some(Self(value))
    }
}

define_kind! {
    #[doc = "Status of a [`Room`] listing."]
    enum Status {
        #[doc = "[`Room`] is listed and may be requested."]
        Available = 1,

        #[doc = "[`Room`] is rented out."]
        Rented = 2,

        #[doc = "[`Room`] is hidden by moderation."]
        Hidden = 3,
    }
}

/// [`DateTime`] when a [`Room`] was created.
pub type CreationDateTime = DateTimeOf<(Room, unit::Creation)>;
