//! Text entity

use super::{impl_entity_common, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};

/// A single-line text entity
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Common entity data
    pub common: EntityCommon,
    /// Text content
    pub value: String,
    /// Insertion point
    pub insertion_point: Vector2,
    /// Text height
    pub height: f64,
    /// Text style name
    pub style: String,
}

impl Text {
    /// Create a label on a named layer
    pub fn label(
        layer: impl Into<String>,
        value: impl Into<String>,
        insertion_point: Vector2,
        height: f64,
    ) -> Self {
        Text {
            common: EntityCommon::with_layer(layer),
            value: value.into(),
            insertion_point,
            height,
            style: "STANDARD".to_string(),
        }
    }

    fn extents(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::from_point(self.insertion_point))
    }
}

impl_entity_common!(Text, "TEXT");
