//! Lightweight polyline entity

use bitflags::bitflags;

use super::{impl_entity_common, EntityCommon};
use crate::types::{BoundingBox2D, Vector2};

bitflags! {
    /// LWPOLYLINE flags (group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LwPolylineFlags: i16 {
        /// Last vertex connects back to the first
        const CLOSED = 1;
    }
}

/// A lightweight (2D) polyline entity
#[derive(Debug, Clone, PartialEq)]
pub struct LwPolyline {
    /// Common entity data
    pub common: EntityCommon,
    /// Vertices of the polyline
    pub vertices: Vec<Vector2>,
    pub flags: LwPolylineFlags,
    /// Elevation (Z coordinate)
    pub elevation: f64,
}

impl LwPolyline {
    /// Create a polyline from a list of 2D points on a named layer
    pub fn from_points(layer: impl Into<String>, points: Vec<Vector2>) -> Self {
        LwPolyline {
            common: EntityCommon::with_layer(layer),
            vertices: points,
            flags: LwPolylineFlags::empty(),
            elevation: 0.0,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Is the polyline closed?
    pub fn is_closed(&self) -> bool {
        self.flags.contains(LwPolylineFlags::CLOSED)
    }

    /// Open or close the polyline
    pub fn set_closed(&mut self, closed: bool) {
        self.flags.set(LwPolylineFlags::CLOSED, closed);
    }

    fn extents(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&self.vertices)
    }
}

impl_entity_common!(LwPolyline, "LWPOLYLINE");
