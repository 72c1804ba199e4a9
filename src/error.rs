//! Error handling for the tariff calculator
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.
//!
//! Only table loading and input validation can fail. A code that matches
//! no schedule entry or a duty rate that does not parse as a percentage is
//! NOT an error: both degrade to a zero-contribution value carried in the
//! result itself.

use thiserror::Error;

/// Core error types for duty calculation
#[derive(Error, Debug)]
pub enum TariffError {
    #[error("table load error: {0}")]
    TableLoad(String),

    #[error("column mapping error: {0}")]
    ColumnMapping(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for duty calculation operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = TariffError::TableLoad("missing header row".to_string());
        assert_eq!(err.to_string(), "table load error: missing header row");
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> =
            Err(anyhow::anyhow!("original error")).context("failed to load schedule table");
        match result {
            Err(e) => {
                let msg = e.to_string();
                assert!(msg.contains("failed to load schedule table"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("original error") || msg.contains("original error"));
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_tariff_error_variants() {
        let load_err = TariffError::TableLoad("test".to_string());
        assert!(load_err.to_string().starts_with("table load error"));

        let mapping_err = TariffError::ColumnMapping("test".to_string());
        assert!(mapping_err.to_string().starts_with("column mapping error"));

        let validation_err = TariffError::Validation("test".to_string());
        assert!(validation_err.to_string().starts_with("validation error"));
    }
}
