//! Planar vector type for projected coordinates

use std::fmt;

/// 2D vector
///
/// Projected drawings are planar: KML elevations are discarded before a
/// coordinate reaches this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Create a new 2D vector
    pub const fn new(x: f64, y: f64) -> Self {
        Vector2 { x, y }
    }

    /// Zero vector
    pub const ZERO: Vector2 = Vector2::new(0.0, 0.0);

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Vector2::ZERO
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vector2::new(x, y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2_from_tuple() {
        let v: Vector2 = (1.5, -2.0).into();
        assert_eq!(v, Vector2::new(1.5, -2.0));
    }

    #[test]
    fn test_vector2_display() {
        assert_eq!(Vector2::new(3.0, -4.5).to_string(), "(3, -4.5)");
    }

    #[test]
    fn test_vector2_is_finite() {
        assert!(Vector2::new(1.0, 2.0).is_finite());
        assert!(!Vector2::new(f64::NAN, 2.0).is_finite());
        assert!(!Vector2::new(1.0, f64::INFINITY).is_finite());
    }
}
