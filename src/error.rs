//! Error types for loading and resolving configuration documents.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors: any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema or a configuration file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid YAML for the expected shape.
    #[error("cannot parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A configuration document whose root is not a mapping.
    #[error("{}: document root must be a mapping, found {kind}", .path.display())]
    NotAMapping { path: PathBuf, kind: &'static str },
}

/// Non-fatal failure while walking a dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The path continues past `segment`, but the value there is not a mapping.
    #[error("cannot resolve '{path}': '{segment}' is a {kind}, not a mapping")]
    NotAMapping {
        path: String,
        segment: String,
        kind: &'static str,
    },
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, Error>;
