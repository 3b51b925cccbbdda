//! Error types for ggui-core.

use std::io;

/// Error type for ggui-core operations.
#[derive(Debug, thiserror::Error)]
pub enum GguiError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal operation failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Style construction or embedding error.
    #[error("style error: {0}")]
    Style(String),

    /// An attribute was applied to an element kind that cannot host it.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A child did not fit its parent and resizing was refused.
    #[error("layout error: {0}")]
    Layout(String),

    /// Rendering failed.
    #[error("render error: {0}")]
    Render(String),

    /// Widget error.
    #[error("widget error: {0}")]
    Widget(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for ggui-core operations.
pub type Result<T> = std::result::Result<T, GguiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GguiError::Terminal("no tty".into());
        assert_eq!(err.to_string(), "terminal error: no tty");
    }

    #[test]
    fn io_error_converts() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: GguiError = io_err.into();
        assert!(matches!(err, GguiError::Io(_)));
    }

    #[test]
    fn type_mismatch_display() {
        let err = GguiError::TypeMismatch("on_draw requires a canvas".into());
        assert_eq!(err.to_string(), "type mismatch: on_draw requires a canvas");
    }
}
