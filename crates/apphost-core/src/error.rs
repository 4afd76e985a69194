//! Error types for startup operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for startup operations
pub type Result<T> = std::result::Result<T, StartupError>;

/// Errors that can occur while a process runs its startup sequence.
///
/// Only resource loading and the relauncher can fail; role classification
/// and sandbox resolution are total.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Resource pack not found: {}", path.display())]
    MissingPack { path: PathBuf },

    #[error("Corrupt resource pack {}: {reason}", path.display())]
    CorruptPack { path: PathBuf, reason: String },

    #[error("Resource pack too large: {0}")]
    PackTooLarge(String),

    #[error("Could not resolve resource directory: {0}")]
    ResourceDir(String),

    #[error("Relaunch failed: {0}")]
    Relaunch(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StartupError {
    /// Whether this error must terminate process startup.
    ///
    /// Every resource failure is fatal; no degraded bundle is ever kept.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StartupError::MissingPack { .. }
                | StartupError::CorruptPack { .. }
                | StartupError::ResourceDir(_)
                | StartupError::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StartupError::MissingPack {
            path: PathBuf::from("/opt/app/resources.pak"),
        };
        assert_eq!(
            err.to_string(),
            "Resource pack not found: /opt/app/resources.pak"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = StartupError::from(io_err);
        assert!(err.to_string().contains("IO error"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_corrupt_pack_is_fatal() {
        let err = StartupError::CorruptPack {
            path: PathBuf::from("en-US.pak"),
            reason: "bad header".to_string(),
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("bad header"));
    }

    #[test]
    fn test_pack_too_large_not_fatal() {
        let err = StartupError::PackTooLarge("65536 resources".to_string());
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "Resource pack too large: 65536 resources");
    }

    #[test]
    fn test_relaunch_error_not_fatal() {
        let err = StartupError::Relaunch("no command".to_string());
        assert!(!err.is_fatal());
    }
}
