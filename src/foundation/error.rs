/// Convenience result type used across the exporter.
pub type ExportResult<T> = Result<T, ExportError>;

/// Top-level error taxonomy used by compiler and emitter APIs.
///
/// Option-level problems never surface here; they are collected as
/// [`crate::CompileWarning`] values on the compiled document instead.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// Invalid user-provided artwork or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Every visible layer was empty, so there is nothing to size a canvas by.
    #[error("no visible content: the document has no visible artwork")]
    NoVisibleContent,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Errors while producing output source code.
    #[error("emit error: {0}")]
    Emit(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExportError {
    /// Build an [`ExportError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`ExportError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build an [`ExportError::Emit`] value.
    pub fn emit(msg: impl Into<String>) -> Self {
        Self::Emit(msg.into())
    }
}

impl From<std::fmt::Error> for ExportError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Emit(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
