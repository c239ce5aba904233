//! Drawing entities
//!
//! Only the three entity kinds a survey conversion produces are modelled:
//! [`Point`] for single-coordinate placemarks, [`LwPolyline`] for lines and
//! rings, and [`Text`] for placemark labels.

use crate::types::{BoundingBox2D, Handle};

pub mod lwpolyline;
pub mod point;
pub mod text;

pub use lwpolyline::{LwPolyline, LwPolylineFlags};
pub use point::Point;
pub use text::Text;

/// Base trait for all drawing entities
pub trait Entity {
    /// Get the entity's handle
    fn handle(&self) -> Handle;

    /// Set the entity's handle
    fn set_handle(&mut self, handle: Handle);

    /// Get the entity's layer name
    fn layer(&self) -> &str;

    /// Extents of the entity, `None` when it has no geometry
    fn bounding_box(&self) -> Option<BoundingBox2D>;

    /// DXF entity type name
    fn entity_type(&self) -> &'static str;
}

/// Common entity data shared by all entities
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCommon {
    /// Unique handle
    pub handle: Handle,
    /// Layer name
    pub layer: String,
}

impl EntityCommon {
    /// Create new common entity data on layer "0"
    pub fn new() -> Self {
        EntityCommon {
            handle: Handle::NULL,
            layer: "0".to_string(),
        }
    }

    /// Create with a specific layer
    pub fn with_layer(layer: impl Into<String>) -> Self {
        EntityCommon {
            layer: layer.into(),
            ..Self::new()
        }
    }
}

impl Default for EntityCommon {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_entity_common {
    ($ty:ty, $name:literal) => {
        impl $crate::entities::Entity for $ty {
            fn handle(&self) -> $crate::types::Handle {
                self.common.handle
            }

            fn set_handle(&mut self, handle: $crate::types::Handle) {
                self.common.handle = handle;
            }

            fn layer(&self) -> &str {
                &self.common.layer
            }

            fn bounding_box(&self) -> Option<$crate::types::BoundingBox2D> {
                self.extents()
            }

            fn entity_type(&self) -> &'static str {
                $name
            }
        }
    };
}
pub(crate) use impl_entity_common;

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    Point(Point),
    LwPolyline(LwPolyline),
    Text(Text),
}

impl EntityType {
    /// Borrow as a trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Point(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::Text(e) => e,
        }
    }

    /// Borrow mutably as a trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Point(e) => e,
            EntityType::LwPolyline(e) => e,
            EntityType::Text(e) => e,
        }
    }
}

impl From<Point> for EntityType {
    fn from(point: Point) -> Self {
        EntityType::Point(point)
    }
}

impl From<LwPolyline> for EntityType {
    fn from(polyline: LwPolyline) -> Self {
        EntityType::LwPolyline(polyline)
    }
}

impl From<Text> for EntityType {
    fn from(text: Text) -> Self {
        EntityType::Text(text)
    }
}
