//! [`ViewRequest`]-related read definitions.

use crate::domain::{room, user};
#[cfg(doc)]
use crate::domain::{Room, User, ViewRequest};

/// Selects [`ViewRequest`]s addressed to the [`User`] as an owner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ForOwner(pub user::Id);

/// Selects [`ViewRequest`]s made by the [`User`] as a renter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ByRenter(pub user::Id);

/// Selects the pending [`ViewRequest`] of the renter for the [`Room`], if
/// any.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pending {
    /// ID of the renter [`User`].
    pub renter_id: user::Id,

    /// ID of the [`Room`] to be viewed.
    pub room_id: room::Id,
}
