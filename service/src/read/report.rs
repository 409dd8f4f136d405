//! [`Report`]-related read definitions.

#[cfg(doc)]
use crate::domain::Report;

/// Selects the [`Report`]s awaiting moderation, oldest first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Pending;
