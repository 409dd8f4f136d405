//! [`Notifier`]-related implementations.

pub mod hub;

use derive_more::{Display, Error as StdError, From};

pub use self::hub::Hub;

/// Delivery of values to their live subscribers.
pub use common::Handler as Notifier;

/// [`Notifier`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Hub`] error.
    #[display("`Hub` notifier error: {_0}")]
    Hub(hub::Error),
}
