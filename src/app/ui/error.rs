//! UI registry errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("element '{0}' already exists")]
    DuplicateName(String),

    #[error("element '{0}' not found")]
    NotFound(String),

    #[error("element '{element}' refers to unregistered callback '{callback}'")]
    UnknownCallback { element: String, callback: String },
}
