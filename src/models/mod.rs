//! Wire representations exchanged with the hosted store.

pub mod listing;
pub mod message;

#[cfg(feature = "server")]
pub mod config;
