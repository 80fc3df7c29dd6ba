//! Shape value types.
//!
//! # Responsibility
//! - Define `Shape` with shared style fields and variant geometry.
//! - Provide explicit copy and patch helpers used by the store.
//!
//! # Invariants
//! - `id` is private; the only way to get a shape with another id is
//!   `Shape::duplicate`, which produces a new value.
//! - Patching never changes the variant of a shape.

use crate::model::input::ShapePatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Integer key of a shape inside the registry.
pub type ShapeId = u32;

/// Keyed collection of shapes. Keys always equal `Shape::id`.
pub type ShapeMap = BTreeMap<ShapeId, Shape>;

/// Upper bound (exclusive) of the default id space.
pub const ID_SPACE: u32 = 10_000;

/// Variant-specific geometry.
///
/// Serialized inline with the owning shape and discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ShapeKind {
    Line {
        end_x: f32,
        end_y: f32,
    },
    Circle {
        radius: f32,
    },
    Ellipse {
        width: f32,
        height: f32,
    },
    Square {
        length: f32,
        corner_radius: f32,
    },
    Rectangle {
        length: f32,
        width: f32,
        corner_radius: f32,
    },
    Triangle {
        width: f32,
        height: f32,
        corner_radius: f32,
    },
}

impl ShapeKind {
    /// Lowercase type tag, identical to the serialized `type` field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Circle { .. } => "circle",
            Self::Ellipse { .. } => "ellipse",
            Self::Square { .. } => "square",
            Self::Rectangle { .. } => "rectangle",
            Self::Triangle { .. } => "triangle",
        }
    }
}

/// One shape stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    id: ShapeId,
    pub start_x: f32,
    pub start_y: f32,
    pub stroke: String,
    pub fill: String,
    pub stroke_width: f32,
    pub rotation: f32,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    /// Creates a shape at the origin with empty colors and no rotation.
    pub fn new(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            start_x: 0.0,
            start_y: 0.0,
            stroke: String::new(),
            fill: String::new(),
            stroke_width: 0.0,
            rotation: 0.0,
            kind,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Returns a copy of this shape carrying `new_id`.
    ///
    /// All style and geometry fields are copied by value.
    pub fn duplicate(&self, new_id: ShapeId) -> Self {
        Self {
            id: new_id,
            ..self.clone()
        }
    }

    /// Applies `patch` in place.
    ///
    /// Common fields apply to every variant. Geometry fields only apply to
    /// the variants that own them; the rest of the patch is ignored.
    /// `corner_radius` is fixed at construction.
    pub fn apply_patch(&mut self, patch: &ShapePatch) {
        set_if_some(&mut self.start_x, patch.x);
        set_if_some(&mut self.start_y, patch.y);
        set_if_some(&mut self.stroke_width, patch.stroke_width);
        set_if_some(&mut self.rotation, patch.rotation);
        if let Some(fill) = &patch.fill {
            self.fill.clone_from(fill);
        }
        if let Some(stroke) = &patch.stroke {
            self.stroke.clone_from(stroke);
        }

        match &mut self.kind {
            ShapeKind::Line { end_x, end_y } => {
                set_if_some(end_x, patch.end_x);
                set_if_some(end_y, patch.end_y);
            }
            ShapeKind::Circle { radius } => set_if_some(radius, patch.radius),
            ShapeKind::Ellipse { width, height } => {
                set_if_some(width, patch.width);
                set_if_some(height, patch.height);
            }
            ShapeKind::Square { length, .. } => set_if_some(length, patch.length),
            ShapeKind::Rectangle { length, width, .. } => {
                set_if_some(length, patch.length);
                set_if_some(width, patch.width);
            }
            ShapeKind::Triangle { width, height, .. } => {
                set_if_some(width, patch.width);
                set_if_some(height, patch.height);
            }
        }
    }
}

fn set_if_some(slot: &mut f32, value: Option<f32>) {
    if let Some(value) = value {
        *slot = value;
    }
}
