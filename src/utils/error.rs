//! Error types for chromeless
//!
//! This module defines the error type used throughout the crate.
//! We use thiserror for the library error enum and anyhow at the
//! binary's top level.

use thiserror::Error;

/// Main error type for chromeless
#[derive(Error, Debug)]
pub enum ChromeError {
    /// Window creation or window-operation errors
    #[error("Window error: {0}")]
    Window(String),

    /// Renderer errors
    #[error("Renderer error: {0}")]
    Renderer(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Icon loading or conversion errors
    #[error("Icon error: {0}")]
    Icon(String),

    /// Native platform integration errors
    #[error("Platform error: {0}")]
    Platform(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error for unexpected situations
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<image::ImageError> for ChromeError {
    fn from(err: image::ImageError) -> Self {
        ChromeError::Icon(format!("Image error: {}", err))
    }
}

/// Convenience type alias for Results in chromeless
pub type Result<T> = std::result::Result<T, ChromeError>;

/// Extension trait for converting other errors to ChromeError
pub trait IntoChromeError<T> {
    /// Convert this error into a ChromeError with the given context
    fn window_err(self, context: &str) -> Result<T>;
    fn renderer_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
    fn icon_err(self, context: &str) -> Result<T>;
    fn platform_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoChromeError<T> for std::result::Result<T, E> {
    fn window_err(self, context: &str) -> Result<T> {
        self.map_err(|e| ChromeError::Window(format!("{}: {}", context, e)))
    }

    fn renderer_err(self, context: &str) -> Result<T> {
        self.map_err(|e| ChromeError::Renderer(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| ChromeError::Config(format!("{}: {}", context, e)))
    }

    fn icon_err(self, context: &str) -> Result<T> {
        self.map_err(|e| ChromeError::Icon(format!("{}: {}", context, e)))
    }

    fn platform_err(self, context: &str) -> Result<T> {
        self.map_err(|e| ChromeError::Platform(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChromeError::Window("Failed to create window".to_string());
        assert_eq!(err.to_string(), "Window error: Failed to create window");

        let err = ChromeError::Config("bad color".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad color");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let chrome_err: ChromeError = io_err.into();
        assert!(matches!(chrome_err, ChromeError::FileIO(_)));
    }

    #[test]
    fn test_into_chrome_error_trait() {
        let result: std::result::Result<(), &str> = Err("Something went wrong");
        let converted = result.renderer_err("Creating surface");

        match converted {
            Err(ChromeError::Renderer(msg)) => {
                assert_eq!(msg, "Creating surface: Something went wrong");
            }
            _ => panic!("Expected Renderer error"),
        }
    }
}
