//! Flat-file snapshots of the shape registry.
//!
//! # Responsibility
//! - Encode/decode a full `ShapeMap` in one of the supported formats.
//! - Read and write named snapshot files inside one directory.
//!
//! # Invariants
//! - Undo/redo history is never part of a snapshot.
//! - Decoding rejects entries whose key differs from the shape id.
//! - Snapshot names cannot escape the snapshot directory.

mod dir;
mod format;

pub use dir::SnapshotDir;
pub use format::SnapshotFormat;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot encoding and file errors.
#[derive(Debug)]
pub enum SnapshotError {
    InvalidFileName(String),
    UnsupportedFormat(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    Encode(rmp_serde::encode::Error),
    Decode(rmp_serde::decode::Error),
    InvalidData(String),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFileName(name) => write!(f, "invalid snapshot file name `{name}`"),
            Self::UnsupportedFormat(ext) => {
                write!(f, "unsupported snapshot format `{ext}`; expected json|msgpack")
            }
            Self::Io { path, source } => {
                write!(f, "snapshot i/o failed for `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid json snapshot: {err}"),
            Self::Encode(err) => write!(f, "failed to encode msgpack snapshot: {err}"),
            Self::Decode(err) => write!(f, "invalid msgpack snapshot: {err}"),
            Self::InvalidData(message) => write!(f, "invalid snapshot data: {message}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::InvalidFileName(_) | Self::UnsupportedFormat(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<rmp_serde::encode::Error> for SnapshotError {
    fn from(value: rmp_serde::encode::Error) -> Self {
        Self::Encode(value)
    }
}

impl From<rmp_serde::decode::Error> for SnapshotError {
    fn from(value: rmp_serde::decode::Error) -> Self {
        Self::Decode(value)
    }
}
