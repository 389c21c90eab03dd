//! Field construction errors.

use rand::distr::weighted;
use squall_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while initializing a field.
#[derive(Error, Debug)]
pub enum FieldError {
    /// Direction, speed or bounds out of range.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A size distribution could not be built.
    #[error("failed to build size table: {0}")]
    SizeTable(#[from] weighted::Error),
}
