//! Rectangle and point geometry for grid cells.
//!
//! Containment is decided by projecting the point onto the cell's edge
//! vectors. The test is strict on every side, so a point on a shared edge
//! belongs to neither neighbour.

use serde::{Deserialize, Serialize};

/// A 2-D vector in image-plane coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `start` to `end`.
    pub fn between(start: (f64, f64), end: (f64, f64)) -> Self {
        Self::new(end.0 - start.0, end.1 - start.1)
    }

    pub fn dot(&self, other: &Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

/// An axis-aligned rectangular cell of the image plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub x_start: f64,
    pub x_end: f64,
    pub y_start: f64,
    pub y_end: f64,
}

impl GridCell {
    pub fn new(x_start: f64, x_end: f64, y_start: f64, y_end: f64) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    fn origin(&self) -> (f64, f64) {
        (self.x_start, self.y_start)
    }

    /// Vector along the top edge, from left to right.
    pub fn x_edge_vector(&self) -> Vec2 {
        Vec2::between(self.origin(), (self.x_end, self.y_start))
    }

    /// Vector along the left edge, from top to bottom.
    pub fn y_edge_vector(&self) -> Vec2 {
        Vec2::between(self.origin(), (self.x_start, self.y_end))
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_start + self.x_end) / 2.0,
            (self.y_start + self.y_end) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> f64 {
        self.y_end - self.y_start
    }

    /// Check whether `(x, y)` lies strictly inside the cell.
    ///
    /// Points on an edge or corner are outside. Any NaN coordinate makes
    /// every comparison false, so the point is reported as outside.
    pub fn is_point_inside(&self, x: f64, y: f64) -> bool {
        let to_point = Vec2::between(self.origin(), (x, y));
        let xe = self.x_edge_vector();
        let ye = self.y_edge_vector();

        let along_x = to_point.dot(&xe);
        let along_y = to_point.dot(&ye);

        (0.0 < along_x && along_x < xe.dot(&xe)) && (0.0 < along_y && along_y < ye.dot(&ye))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_vectors() {
        let cell = GridCell::new(0.0, 2.0, 1.0, 3.0);
        assert_eq!(cell.x_edge_vector(), Vec2::new(2.0, 0.0));
        assert_eq!(cell.y_edge_vector(), Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_center() {
        assert_eq!(GridCell::new(0.0, 2.0, 0.0, 4.0).center(), (1.0, 2.0));
        assert_eq!(GridCell::new(-2.0, 0.0, -4.0, 0.0).center(), (-1.0, -2.0));
    }

    #[test]
    fn test_square_containment() {
        let cell = GridCell::new(0.0, 2.0, 0.0, 2.0);
        assert!(cell.is_point_inside(1.0, 1.0));
        assert!(cell.is_point_inside(0.5, 1.0));
        assert!(!cell.is_point_inside(0.0, 0.0));
        assert!(!cell.is_point_inside(2.0, 2.0));
        assert!(!cell.is_point_inside(3.0, 1.0));
    }

    #[test]
    fn test_rectangle_containment() {
        let cell = GridCell::new(0.0, 4.0, 0.0, 2.0);
        assert!(cell.is_point_inside(2.0, 1.0));
        assert!(cell.is_point_inside(1.0, 0.5));
        assert!(!cell.is_point_inside(0.0, 1.0));
        assert!(!cell.is_point_inside(4.0, 1.0));
    }

    #[test]
    fn test_negative_coordinates() {
        let cell = GridCell::new(-2.0, 0.0, -2.0, 0.0);
        assert!(cell.is_point_inside(-1.0, -1.0));
        assert!(cell.is_point_inside(-0.5, -0.5));
        assert!(!cell.is_point_inside(-2.0, -2.0));
        assert!(!cell.is_point_inside(0.0, 0.0));
    }

    #[test]
    fn test_corners_and_edge_midpoints_excluded() {
        let cell = GridCell::new(10.0, 30.0, 5.0, 25.0);
        let corners = [(10.0, 5.0), (30.0, 5.0), (10.0, 25.0), (30.0, 25.0)];
        let midpoints = [(20.0, 5.0), (20.0, 25.0), (10.0, 15.0), (30.0, 15.0)];
        for (x, y) in corners.iter().chain(midpoints.iter()) {
            assert!(!cell.is_point_inside(*x, *y), "({x}, {y}) should be outside");
        }
        let (cx, cy) = cell.center();
        assert!(cell.is_point_inside(cx, cy));
    }

    #[test]
    fn test_shared_edge_belongs_to_neither() {
        let left = GridCell::new(0.0, 10.0, 0.0, 10.0);
        let right = GridCell::new(10.0, 20.0, 0.0, 10.0);
        assert!(!left.is_point_inside(10.0, 5.0));
        assert!(!right.is_point_inside(10.0, 5.0));
    }

    #[test]
    fn test_nan_is_outside() {
        let cell = GridCell::new(0.0, 2.0, 0.0, 2.0);
        assert!(!cell.is_point_inside(f64::NAN, 1.0));
        assert!(!cell.is_point_inside(1.0, f64::NAN));
    }
}
