//! [`Config`]-related definitions.

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

#[cfg(doc)]
use crate::Service;

/// [`Service`] configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Room listing configuration.
    pub rooms: Rooms,

    /// Notifications delivery configuration.
    pub notifications: Notifications,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the `CONF`-prefixed environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Room listing configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Rooms {
    /// Page size used when a search request specifies none.
    #[default(10)]
    pub default_page_size: usize,

    /// Upper bound of a page size, larger requested sizes are clamped.
    #[default(100)]
    pub max_page_size: usize,
}

/// Notifications delivery configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Notifications {
    /// Number of undelivered notifications buffered per topic before the
    /// slowest subscriber starts lagging.
    #[default(64)]
    pub capacity: usize,
}

#[cfg(test)]
mod spec {
    use super::Config;

    #[test]
    fn falls_back_to_defaults() {
        let config = Config::new("definitely/missing/config.toml").unwrap();

        assert_eq!(config.rooms.default_page_size, 10);
        assert_eq!(config.rooms.max_page_size, 100);
        assert_eq!(config.notifications.capacity, 64);
    }
}
