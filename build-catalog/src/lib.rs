//! Build Catalog
//!
//! Download pages, OTA update checks and changelog passthrough for ROM builds
//! described by `devices.json` and `builds.json`.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod templates;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use config::AppConfig;
pub use error::AppError;
