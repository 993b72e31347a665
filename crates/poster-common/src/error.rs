//! Error types for the weather poster crates.

use thiserror::Error;

/// Result type alias using PosterError.
pub type PosterResult<T> = Result<T, PosterError>;

/// Caller-visible failures of poster rendering.
///
/// Missing or corrupt assets are deliberately absent here: the renderer
/// substitutes a default and reports the substitution through its
/// diagnostics instead of failing.
#[derive(Debug, Error)]
pub enum PosterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PosterError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            PosterError::InvalidInput(_) => 400,
            PosterError::RenderError(_) | PosterError::InvalidConfig(_) => 500,
        }
    }

    /// Short machine-readable kind, used in logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            PosterError::InvalidInput(_) => "invalid_input",
            PosterError::RenderError(_) => "render_error",
            PosterError::InvalidConfig(_) => "invalid_config",
        }
    }
}

impl From<std::io::Error> for PosterError {
    fn from(err: std::io::Error) -> Self {
        PosterError::RenderError(err.to_string())
    }
}

impl From<serde_yaml::Error> for PosterError {
    fn from(err: serde_yaml::Error) -> Self {
        PosterError::InvalidConfig(format!("YAML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(PosterError::InvalidInput("x".to_string()).http_status_code(), 400);
        assert_eq!(PosterError::RenderError("x".to_string()).http_status_code(), 500);
        assert_eq!(PosterError::InvalidConfig("x".to_string()).http_status_code(), 500);
    }

    #[test]
    fn test_error_display() {
        let err = PosterError::InvalidInput("weather list is empty".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Invalid input"));
        assert!(display.contains("weather list is empty"));
    }

    #[test]
    fn test_io_error_is_render_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: PosterError = io.into();
        assert_eq!(err.kind(), "render_error");
    }
}
