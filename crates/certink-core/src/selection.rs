//! Corner handles and corner-resize math.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Outward diagonal of this corner, as unit signs per axis.
    ///
    /// Screen y grows downward, so the bottom corners point to +y.
    pub fn diagonal(self) -> Vec2 {
        match self {
            Corner::TopLeft => Vec2::new(-1.0, -1.0),
            Corner::TopRight => Vec2::new(1.0, -1.0),
            Corner::BottomLeft => Vec2::new(-1.0, 1.0),
            Corner::BottomRight => Vec2::new(1.0, 1.0),
        }
    }

    /// The point of `rect` at this corner.
    pub fn point_of(self, rect: Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(rect.x0, rect.y0),
            Corner::TopRight => Point::new(rect.x1, rect.y0),
            Corner::BottomLeft => Point::new(rect.x0, rect.y1),
            Corner::BottomRight => Point::new(rect.x1, rect.y1),
        }
    }
}

/// A selection handle with its position and corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub corner: Corner,
    /// Center of the handle, container-local.
    pub position: Point,
}

impl Handle {
    pub fn new(corner: Corner, position: Point) -> Self {
        Self { corner, position }
    }

    /// Square the handle occupies for a given handle size.
    pub fn rect(&self, size: f64) -> Rect {
        Rect::from_center_size(self.position, (size, size))
    }

    /// Check if a point hits this handle's square.
    pub fn hit_test(&self, point: Point, size: f64) -> bool {
        let half = size / 2.0;
        (point.x - self.position.x).abs() <= half && (point.y - self.position.y).abs() <= half
    }
}

/// Generate corner handles for a bounding rectangle.
pub fn corner_handles(bounds: Rect) -> [Handle; 4] {
    Corner::ALL.map(|corner| Handle::new(corner, corner.point_of(bounds)))
}

/// Font size delta for dragging `corner` by `displacement` pixels.
///
/// Only the component along the corner's outward diagonal counts: pulling a
/// handle away from the box grows the text, pushing it toward the center
/// shrinks it, and sideways motion along the edge does nothing.
pub fn corner_resize_delta(corner: Corner, displacement: Vec2, sensitivity: f64) -> f64 {
    let along = displacement.dot(corner.diagonal()) * FRAC_1_SQRT_2;
    along * sensitivity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_corner_handles_positions() {
        let handles = corner_handles(Rect::new(10.0, 20.0, 110.0, 70.0));
        assert_eq!(handles[0].corner, Corner::TopLeft);
        assert_eq!(handles[0].position, Point::new(10.0, 20.0));
        assert_eq!(handles[1].position, Point::new(110.0, 20.0));
        assert_eq!(handles[2].position, Point::new(10.0, 70.0));
        assert_eq!(handles[3].position, Point::new(110.0, 70.0));
    }

    #[test]
    fn test_handle_hit_test() {
        let handle = Handle::new(Corner::BottomRight, Point::new(100.0, 100.0));
        assert!(handle.hit_test(Point::new(107.0, 93.0), 16.0));
        assert!(!handle.hit_test(Point::new(109.0, 100.0), 16.0));
    }

    #[test]
    fn test_outward_drag_grows_for_every_corner() {
        for corner in Corner::ALL {
            let outward = corner.diagonal() * 10.0;
            assert!(corner_resize_delta(corner, outward, 0.1) > 0.0, "{corner:?}");
            assert!(corner_resize_delta(corner, -outward, 0.1) < 0.0, "{corner:?}");
        }
    }

    #[test]
    fn test_delta_magnitude() {
        // 100px straight along the bottom-right diagonal
        let d = Vec2::new(100.0 * FRAC_1_SQRT_2, 100.0 * FRAC_1_SQRT_2);
        assert!(approx(corner_resize_delta(Corner::BottomRight, d, 0.1), 10.0));
    }

    #[test]
    fn test_motion_along_edge_is_ignored() {
        // Perpendicular to the top-right diagonal (1, -1)
        let d = Vec2::new(30.0, 30.0);
        assert!(approx(corner_resize_delta(Corner::TopRight, d, 0.1), 0.0));
    }

    #[test]
    fn test_horizontal_drag_on_left_corner() {
        // Moving the top-left handle right pushes it inward.
        let delta = corner_resize_delta(Corner::TopLeft, Vec2::new(50.0, 0.0), 0.1);
        assert!(approx(delta, -50.0 * FRAC_1_SQRT_2 * 0.1));
    }
}
