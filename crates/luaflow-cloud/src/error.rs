//! Cloud operation error types

use thiserror::Error;

/// Errors produced by cloud operations, shaped by the stage that failed.
///
/// The scripting layer renders these with `Display` only; the variant
/// structure is not part of the script-visible contract.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration resolution failed: {0}")]
    ConfigResolution(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CloudError>;
