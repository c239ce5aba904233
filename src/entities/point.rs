//! Point entity

use super::{impl_entity_common, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};

/// A point entity
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Common entity data
    pub common: EntityCommon,
    /// Location of the point
    pub location: Vector2,
}

impl Point {
    /// Create a point on a named layer
    pub fn on_layer(layer: impl Into<String>, location: Vector2) -> Self {
        Point {
            common: EntityCommon::with_layer(layer),
            location,
        }
    }

    fn extents(&self) -> Option<BoundingBox2D> {
        Some(BoundingBox2D::from_point(self.location))
    }
}

impl_entity_common!(Point, "POINT");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;

    #[test]
    fn test_point_on_layer() {
        let point = Point::on_layer("APPUI", Vector2::new(10.0, 20.0));
        assert_eq!(point.location, Vector2::new(10.0, 20.0));
        assert_eq!(point.layer(), "APPUI");
        assert_eq!(point.entity_type(), "POINT");
    }

    #[test]
    fn test_point_bounding_box() {
        let point = Point::on_layer("X", Vector2::new(5.0, 10.0));
        let bbox = point.bounding_box().unwrap();
        assert_eq!(bbox.min, Vector2::new(5.0, 10.0));
        assert_eq!(bbox.max, Vector2::new(5.0, 10.0));
    }
}
