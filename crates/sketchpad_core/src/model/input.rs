//! Request payloads consumed by the builder and the updater.
//!
//! Both payloads use the camelCase field names of the drawing client.
//! Unknown fields (for example a client-side `id`) are ignored.

use serde::{Deserialize, Serialize};

/// Payload for creating a new shape.
///
/// `kind` selects the variant; every numeric field defaults to `0.0` and
/// every color to an empty string, so a client only sends what it uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeInput {
    /// Case-insensitive variant name, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f32,
    pub y: f32,
    pub stroke: String,
    pub fill: String,
    pub stroke_width: f32,
    pub rotation: f32,
    pub radius: f32,
    pub width: f32,
    pub height: f32,
    pub length: f32,
    pub corner_radius: f32,
    pub end_x: f32,
    pub end_y: f32,
}

impl ShapeInput {
    /// Creates an input for `kind` with every other field defaulted.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }
}

/// Partial update for an existing shape.
///
/// `None` leaves the field unchanged. Corner radii are not patchable; a
/// `cornerRadius` key in the payload is ignored like any unknown field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapePatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub stroke: Option<String>,
    pub fill: Option<String>,
    pub stroke_width: Option<f32>,
    pub rotation: Option<f32>,
    pub radius: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub length: Option<f32>,
    pub end_x: Option<f32>,
    pub end_y: Option<f32>,
}
