pub mod listings;
pub mod messages;
