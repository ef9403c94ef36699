//! Shared foundation for the outreach console — entity types, configuration,
//! and the error taxonomy used across the workspace.

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{OutreachError, OutreachResult};
