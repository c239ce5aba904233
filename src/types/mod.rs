//! Geometric value types shared by the emitter and the DXF writer

mod bounds;
mod handle;
mod vector;

pub use bounds::BoundingBox2D;
pub use handle::Handle;
pub use vector::Vector2;
