//! [`Query`] collection related to the multiple [`RentRequest`]s.

use common::operations::By;

use crate::{domain::RentRequest, read::rent_request};
#[cfg(doc)]
use crate::{domain::Room, Query};

use super::DatabaseQuery;

/// Queries [`RentRequest`]s for the [`Room`]s of an owner, newest first.
pub type ByOwner = DatabaseQuery<By<Vec<RentRequest>, rent_request::ForOwner>>;

/// Queries [`RentRequest`]s made by a tenant, newest first.
pub type ByTenant = DatabaseQuery<By<Vec<RentRequest>, rent_request::ByTenant>>;
