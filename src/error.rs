//! Centralized error handling for the newsletter builder
//!
//! This module provides a unified error type that covers all error scenarios
//! in the library: image decoding and encoding, issue storage, and
//! configuration files.

use log::warn;
use std::fmt;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Custom Result Type Alias
// ─────────────────────────────────────────────────────────────────────────────

/// A specialized `Result` type for the library.
pub type Result<T> = std::result::Result<T, Error>;

/// The centralized error type for the library.
#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Image Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// The source image could not be read or decoded
    ImageDecode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The cropped image could not be encoded
    ImageEncode(image::ImageError),

    /// Crop parameters that cannot produce an image (bad zoom, empty output)
    InvalidCrop(String),

    /// A field value that should be a base64 data URL is not one
    InvalidDataUrl(String),

    // ─────────────────────────────────────────────────────────────────────────
    // Issue Storage Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to read a storage slot
    StorageRead {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to write a storage slot
    StorageWrite {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Stored issue collection is not valid JSON for the expected shape
    StoreParse {
        key: String,
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Failed to load configuration file
    ConfigLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to save configuration file
    ConfigSave {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse configuration (invalid JSON/format)
    ConfigParse {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration directory not found or inaccessible
    ConfigDirNotFound,

    // ─────────────────────────────────────────────────────────────────────────
    // Application Errors
    // ─────────────────────────────────────────────────────────────────────────
    /// Generic application error with a message
    Application(String),
}

impl Error {
    /// Build an `ImageDecode` error from any underlying cause.
    pub fn image_decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::ImageDecode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display trait implementation for user-friendly error messages
// ─────────────────────────────────────────────────────────────────────────────
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Image Errors
            Error::ImageDecode { message, .. } => {
                write!(f, "Could not load image: {}", message)
            }
            Error::ImageEncode(err) => write!(f, "Could not encode cropped image: {}", err),
            Error::InvalidCrop(msg) => write!(f, "Invalid crop: {}", msg),
            Error::InvalidDataUrl(msg) => write!(f, "Invalid data URL: {}", msg),

            // Issue Storage Errors
            Error::StorageRead { key, source } => {
                write!(f, "Failed to read storage slot '{}': {}", key, source)
            }
            Error::StorageWrite { key, source } => {
                write!(f, "Failed to write storage slot '{}': {}", key, source)
            }
            Error::StoreParse { key, source } => {
                write!(f, "Saved issues under '{}' are corrupt: {}", key, source)
            }

            // Configuration Errors
            Error::ConfigLoad { path, source } => {
                write!(
                    f,
                    "Failed to load configuration from '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigSave { path, source } => {
                write!(
                    f,
                    "Failed to save configuration to '{}': {}",
                    path.display(),
                    source
                )
            }
            Error::ConfigParse { message, .. } => {
                write!(f, "Invalid configuration format: {}", message)
            }
            Error::ConfigDirNotFound => {
                write!(f, "Configuration directory not found")
            }

            Error::Application(msg) => write!(f, "{}", msg),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::error::Error trait implementation for error chaining
// ─────────────────────────────────────────────────────────────────────────────
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ImageEncode(err) => Some(err),
            Error::StoreParse { source, .. } => Some(source),
            Error::StorageRead { source, .. }
            | Error::StorageWrite { source, .. }
            | Error::ConfigLoad { source, .. }
            | Error::ConfigSave { source, .. } => Some(source.as_ref()),
            Error::ImageDecode { source, .. } | Error::ConfigParse { source, .. } => source
                .as_ref()
                .map(|s| s.as_ref() as &(dyn std::error::Error + 'static)),
            Error::InvalidCrop(_)
            | Error::InvalidDataUrl(_)
            | Error::ConfigDirNotFound
            | Error::Application(_) => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for Result to support graceful degradation.
pub trait ResultExt<T> {
    /// If the result is an error, log it at warning level and return the provided default.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                warn!("{}: {}. Using default.", context, err);
                default
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_image_decode_keeps_source() {
        use std::error::Error as StdError;
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "truncated");
        let err = Error::image_decode("upload.png", io_err);
        assert!(err.to_string().contains("upload.png"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_store_parse_display_names_key() {
        let json_err = serde_json::from_str::<Vec<u8>>("{oops").unwrap_err();
        let err = Error::StoreParse {
            key: "portPulseIssues_v2".to_string(),
            source: json_err,
        };
        assert!(err.to_string().contains("portPulseIssues_v2"));
    }

    #[test]
    fn test_storage_write_keeps_source() {
        use std::error::Error as StdError;
        let err = Error::StorageWrite {
            key: "portPulseIssues_v2".to_string(),
            source: Box::new(io::Error::new(io::ErrorKind::PermissionDenied, "read-only")),
        };
        assert!(err.to_string().contains("read-only"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_config_dir_not_found() {
        let err = Error::ConfigDirNotFound;
        assert_eq!(err.to_string(), "Configuration directory not found");
    }

    #[test]
    fn test_error_source_none_for_simple_variants() {
        use std::error::Error as StdError;
        assert!(Error::Application("test".to_string()).source().is_none());
        assert!(Error::InvalidCrop("zoom".to_string()).source().is_none());
        assert!(Error::ConfigDirNotFound.source().is_none());
    }

    #[test]
    fn test_unwrap_or_warn_default_ok() {
        let result: super::Result<i32> = Ok(42);
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 42);
    }

    #[test]
    fn test_unwrap_or_warn_default_err() {
        let result: super::Result<i32> = Err(Error::Application("test".to_string()));
        assert_eq!(result.unwrap_or_warn_default(0, "test context"), 0);
    }
}
