//! Renderlab
//!
//! Demo server for web rendering strategies: a mock time endpoint plus page
//! routes that fetch from it under build-time, revalidating and uncached
//! policies. This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
