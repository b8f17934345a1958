//! Core library exports for the classifieds marketplace.
//!
//! The `data` feature exposes only the domain types and storage row models.
//! The default `server` feature adds forms, repositories, services, routes
//! and the notification client used by the web application.

pub mod domain;
pub mod models;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod notifications;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
