/// Convenience result type used across stickreel.
pub type StickreelResult<T> = Result<T, StickreelError>;

/// Top-level error taxonomy. Each variant names the pipeline stage that failed.
#[derive(thiserror::Error, Debug)]
pub enum StickreelError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem resources (frame directory, frame files) could not be created or written.
    #[error("resource error: {0}")]
    Resource(String),

    /// Rasterization failed. The scene model is total, so this indicates a defect.
    #[error("render error: {0}")]
    Render(String),

    /// The external encoder is missing, was given missing inputs, or exited unsuccessfully.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StickreelError {
    /// Build a [`StickreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StickreelError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`StickreelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StickreelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
