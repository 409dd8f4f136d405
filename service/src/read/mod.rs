//! Read entities definitions.

pub mod message;
pub mod notification;
pub mod rent_request;
pub mod report;
pub mod room;
pub mod view_request;
