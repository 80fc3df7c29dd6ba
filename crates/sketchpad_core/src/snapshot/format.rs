//! Snapshot wire formats.

use super::{SnapshotError, SnapshotResult};
use crate::model::shape::ShapeMap;

/// Supported snapshot encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// Pretty-printed JSON object keyed by id.
    Json,
    /// Self-describing MessagePack map with named fields.
    MessagePack,
}

impl SnapshotFormat {
    /// Parses a file extension, with or without the leading dot.
    pub fn from_extension(extension: &str) -> SnapshotResult<Self> {
        let normalized = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "json" => Ok(Self::Json),
            "msgpack" | "mp" => Ok(Self::MessagePack),
            _ => Err(SnapshotError::UnsupportedFormat(extension.to_string())),
        }
    }

    /// Canonical extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::MessagePack => "msgpack",
        }
    }

    pub fn encode(self, shapes: &ShapeMap) -> SnapshotResult<Vec<u8>> {
        match self {
            Self::Json => Ok(serde_json::to_vec_pretty(shapes)?),
            Self::MessagePack => Ok(rmp_serde::to_vec_named(shapes)?),
        }
    }

    /// Decodes a full snapshot and checks every key against its shape id.
    pub fn decode(self, bytes: &[u8]) -> SnapshotResult<ShapeMap> {
        let shapes: ShapeMap = match self {
            Self::Json => serde_json::from_slice(bytes)?,
            Self::MessagePack => rmp_serde::from_slice(bytes)?,
        };

        if let Some((key, shape)) = shapes.iter().find(|(key, shape)| **key != shape.id()) {
            return Err(SnapshotError::InvalidData(format!(
                "entry key {key} does not match shape id {}",
                shape.id()
            )));
        }

        Ok(shapes)
    }
}
