//! [`RentRequest`]-related read definitions.

use crate::domain::{room, user};
#[cfg(doc)]
use crate::domain::{RentRequest, Room, User};

/// Selects [`RentRequest`]s for the [`Room`]s owned by the [`User`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ForOwner(pub user::Id);

/// Selects [`RentRequest`]s made by the [`User`] as a tenant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ByTenant(pub user::Id);

/// Selects the open [`RentRequest`] of the tenant for the [`Room`], if any.
///
/// A [`RentRequest`] is open until it is rejected or finalized by both
/// parties.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Open {
    /// ID of the tenant [`User`].
    pub tenant_id: user::Id,

    /// ID of the requested [`Room`].
    pub room_id: room::Id,
}
