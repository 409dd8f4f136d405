//! Service contains the business logic of the room rental marketplace.
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod config;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod workflow;

use common::operations::Publish;
use tracerr::Traced;
use tracing as log;

use self::{
    domain::Notification,
    infra::{notifier, Notifier},
};
#[cfg(doc)]
use self::infra::Database;

pub use self::{command::Command, config::Config, query::Query};

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Nt> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Notifier`] of this [`Service`].
    notifier: Nt,
}

impl<Db, Nt> Service<Db, Nt> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db, notifier: Nt) -> Self {
        Self {
            config,
            database,
            notifier,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Notifier`] of this [`Service`].
    #[must_use]
    pub fn notifier(&self) -> &Nt {
        &self.notifier
    }

    /// Publishes the already persisted [`Notification`]s to their topics.
    ///
    /// Failures are logged and never propagated, since the
    /// [`Notification`]s remain readable from the [`Database`].
    pub(crate) async fn publish(&self, notifications: Vec<Notification>)
    where
        Nt: Notifier<
            Publish<Notification>,
            Ok = usize,
            Err = Traced<notifier::Error>,
        >,
    {
        for notification in notifications {
            let topic = notification.topic();
            match self.notifier.execute(Publish(notification)).await {
                Ok(n) => log::debug!("published to {n} subscriber(s) of `{topic}`"),
                Err(e) => log::warn!("failed to publish to `{topic}`: {e}"),
            }
        }
    }
}
