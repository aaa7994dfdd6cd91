//! DocGraph Core: configuration, data paths, shared error type.

pub mod config;
pub mod error;

pub use config::{AppConfig, DataPaths};
pub use error::{Error, Result};
