//! [`Query`] collection related to the multiple [`Report`]s.

use common::operations::By;

use crate::{domain::Report, read::report};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Report`]s awaiting moderation, oldest first.
pub type Pending = DatabaseQuery<By<Vec<Report>, report::Pending>>;
