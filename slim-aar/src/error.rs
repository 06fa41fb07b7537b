//! Error types for AAR slimming.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for every fallible operation in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid run configuration, detected before any file is touched.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading the input, a resource folder, or writing the output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The AAR or its `classes.jar` is not a readable ZIP archive, or an
    /// expected entry is missing.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A resource type folder contains another directory. Only one level
    /// below each resource folder is traversed.
    #[error("Nested resource directory is not supported: {}", .0.display())]
    NestedResourceDir(PathBuf),

    /// A resource path cannot be stored as a ZIP entry name.
    #[error("Resource path is not valid UTF-8: {}", .0.display())]
    InvalidFileName(PathBuf),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
