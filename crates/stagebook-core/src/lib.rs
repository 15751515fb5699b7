//! Core types shared across the stagebook crates: configuration, the unified
//! application error, and the domain models.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
