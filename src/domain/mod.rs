//! Domain entities and value objects shared by every layer of the service.

pub mod category;
pub mod listing;
pub mod message;
pub mod notification;
pub mod types;
