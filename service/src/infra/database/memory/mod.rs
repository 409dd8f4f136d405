//! In-process transactional [`Database`] implementation.
//!
//! Writes of a [`Tx`] are staged privately and become visible to others only
//! on commit, while [`Lock`]s taken inside a [`Tx`] are held until it's
//! committed or dropped. Dropping an uncommitted [`Tx`] discards its writes.
//!
//! [`Lock`]: common::operations::Lock

pub mod client;
mod impls;
pub mod storage;

use derive_more::{Deref, Display, Error as StdError};

#[cfg(doc)]
use crate::infra::Database;

pub use self::{
    client::{NonTx, Tx},
    storage::{Connection, Entity, Tables},
};

/// In-process [`Database`] client.
#[derive(Clone, Debug, Default, Deref)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// [`Memory`] database [`Error`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Operation upon an already committed [`Tx`].
    #[display("transaction is already committed")]
    AlreadyCommitted,
}
