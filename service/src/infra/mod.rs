//! Infrastructure layer.

pub mod database;
pub mod notifier;

pub use self::{
    database::{Database, Memory},
    notifier::{Hub, Notifier},
};
