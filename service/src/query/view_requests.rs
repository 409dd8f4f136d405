//! [`Query`] collection related to the multiple [`ViewRequest`]s.

use common::operations::By;

use crate::{domain::ViewRequest, read::view_request};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`ViewRequest`]s addressed to an owner, newest first.
pub type ByOwner = DatabaseQuery<By<Vec<ViewRequest>, view_request::ForOwner>>;

/// Queries [`ViewRequest`]s made by a renter, newest first.
pub type ByRenter = DatabaseQuery<By<Vec<ViewRequest>, view_request::ByRenter>>;
