use crate::models::PointI;
use crate::utils::geometry::signed_area;

/// One closed boundary traced from a mask.
///
/// Points are in traversal order and the sequence is cyclic: the last point
/// is adjacent to the first. The enclosed area is computed once on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<PointI>,
    area: f64,
}

impl Contour {
    /// Build a contour from an ordered boundary
    pub fn new(points: Vec<PointI>) -> Self {
        let area = signed_area(&points).abs();
        Self { points, area }
    }

    /// Boundary points in traversal order
    pub fn points(&self) -> &[PointI] {
        &self.points
    }

    /// Number of boundary points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for a contour without points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Absolute area of the polygon through the boundary pixel centres
    pub fn enclosed_area(&self) -> f64 {
        self.area
    }

    /// Point at `index`, if in range
    pub fn get(&self, index: usize) -> Option<PointI> {
        self.points.get(index).copied()
    }

    /// Axis-aligned bounds as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let first = self.points.first()?;
        Some(self.points.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        ))
    }
}
