//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity resolution (closing by a moderator, for
/// example).
#[derive(Clone, Copy, Debug)]
pub struct Resolution;
