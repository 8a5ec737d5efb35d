//! Geometry over sampled pointer paths.

use serde::{Deserialize, Serialize};

/// A sampled pointer location in surface-local coordinates.
///
/// `x` grows to the right and `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Sum of distances between consecutive points.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Distance between the first and last point, or 0 for an empty path.
pub fn endpoint_gap(points: &[Point]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => first.distance(*last),
        _ => 0.0,
    }
}

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest x.
    pub min_x: f64,
    /// Smallest y.
    pub min_y: f64,
    /// Largest x.
    pub max_x: f64,
    /// Largest y.
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounds of `points`, or `None` if there are none.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let seed = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points[1..].iter().fold(seed, |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    /// `max_x - min_x`.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// `max_y - min_y`.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// `width / height`; `None` when the height is zero or the ratio is not
    /// a finite number.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let height = self.height();
        if height == 0.0 {
            return None;
        }
        let ratio = self.width() / height;
        ratio.is_finite().then_some(ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_path_length_sums_segments() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(3.0, 10.0),
        ];
        assert_eq!(path_length(&points), 11.0);
        assert_eq!(path_length(&points[..1]), 0.0);
        assert_eq!(path_length(&[]), 0.0);
    }

    #[test]
    fn test_endpoint_gap() {
        let points = [Point::new(1.0, 1.0), Point::new(9.0, 9.0), Point::new(4.0, 5.0)];
        assert_eq!(endpoint_gap(&points), 5.0);
        assert_eq!(endpoint_gap(&[]), 0.0);
    }

    #[test]
    fn test_bounding_box() {
        let points = [Point::new(10.0, 5.0), Point::new(-2.0, 8.0), Point::new(4.0, 1.0)];
        let bounds = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bounds.width(), 12.0);
        assert_eq!(bounds.height(), 7.0);
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_aspect_ratio_guards_zero_height() {
        let flat = [Point::new(0.0, 3.0), Point::new(10.0, 3.0)];
        assert_eq!(BoundingBox::from_points(&flat).unwrap().aspect_ratio(), None);

        let square = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert_eq!(BoundingBox::from_points(&square).unwrap().aspect_ratio(), Some(1.0));
    }
}
