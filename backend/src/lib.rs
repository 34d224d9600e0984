//! FitTrack backend library
//!
//! Layered as routes (HTTP), services (validation and business rules) and
//! repositories (SQL). Exposed as a library so integration tests can build
//! the router against a real database.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
