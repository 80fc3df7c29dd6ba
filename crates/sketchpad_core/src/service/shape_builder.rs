//! Construction of shapes from client payloads.
//!
//! # Invariants
//! - The type name is matched case-insensitively after trimming.
//! - Unrecognized type names are an error, never a silent default.

use crate::model::input::ShapeInput;
use crate::model::shape::{Shape, ShapeId, ShapeKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from building a shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    UnknownShapeType(String),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownShapeType(value) => write!(
                f,
                "unknown shape type `{value}`; expected line|circle|ellipse|square|rectangle|triangle"
            ),
        }
    }
}

impl Error for BuildError {}

/// Builds a shape with `id` from `input`.
pub fn build_shape(id: ShapeId, input: &ShapeInput) -> Result<Shape, BuildError> {
    let mut shape = Shape::new(id, kind_from_input(input)?);
    shape.start_x = input.x;
    shape.start_y = input.y;
    shape.stroke.clone_from(&input.stroke);
    shape.fill.clone_from(&input.fill);
    shape.stroke_width = input.stroke_width;
    shape.rotation = input.rotation;
    Ok(shape)
}

fn kind_from_input(input: &ShapeInput) -> Result<ShapeKind, BuildError> {
    let kind = match input.kind.trim().to_ascii_lowercase().as_str() {
        "line" => ShapeKind::Line {
            end_x: input.end_x,
            end_y: input.end_y,
        },
        "circle" => ShapeKind::Circle {
            radius: input.radius,
        },
        "ellipse" => ShapeKind::Ellipse {
            width: input.width,
            height: input.height,
        },
        "square" => ShapeKind::Square {
            length: input.length,
            corner_radius: input.corner_radius,
        },
        "rectangle" => ShapeKind::Rectangle {
            length: input.length,
            width: input.width,
            corner_radius: input.corner_radius,
        },
        "triangle" => ShapeKind::Triangle {
            width: input.width,
            height: input.height,
            corner_radius: input.corner_radius,
        },
        _ => return Err(BuildError::UnknownShapeType(input.kind.clone())),
    };
    Ok(kind)
}
