//! Input router errors

use thiserror::Error;

/// Validation failures surfaced to callers of the binding and mapping API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("invalid scope '{0}' (expected 'local' or 'global')")]
    InvalidScope(String),

    #[error("invalid channel '{0}'")]
    InvalidChannel(String),

    #[error("invalid device kind '{0}' (expected 'key' or 'pointer')")]
    InvalidDevice(String),

    #[error("invalid callback: {0}")]
    InvalidCallback(String),
}
