//! Error types for table construction

use thiserror::Error;

/// Errors raised while building a table
///
/// Lookups and removals of absent keys are not errors; they return
/// `None` / `false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {field}: {message}")]
    InvalidConfig {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl TableError {
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
