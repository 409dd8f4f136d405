//! [`Memory`] database client definitions.
//!
//! [`Memory`]: super::Memory

pub mod non_tx;
pub mod tx;

pub use self::{non_tx::NonTx, tx::Tx};
