/// Polygon geometry: areas, image moments and centroids
use crate::models::{Point, PointI};

/// Signed shoelace area of the closed polygon through `points`.
///
/// Computed in integer arithmetic, so it is exact. The sign depends on
/// traversal direction.
pub fn signed_area(points: &[PointI]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    twice as f64 / 2.0
}

/// Zeroth and first order moments of a polygon's enclosed region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// Signed area
    pub m00: f64,
    /// First moment about the y axis
    pub m10: f64,
    /// First moment about the x axis
    pub m01: f64,
}

impl Moments {
    /// Area-weighted centre, undefined for a zero-area region
    pub fn centroid(&self) -> Option<Point> {
        if self.m00 == 0.0 || !self.m00.is_finite() {
            return None;
        }
        Some(Point::new(self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Region moments of the closed polygon through `points` (Green's theorem).
///
/// Sums are accumulated relative to the first vertex and shifted back at the
/// end, which keeps the result stable for polygons far from the origin.
pub fn polygon_moments(points: &[Point]) -> Moments {
    let Some(origin) = points.first().copied() else {
        return Moments {
            m00: 0.0,
            m10: 0.0,
            m01: 0.0,
        };
    };

    let mut a = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let (x0, y0) = (p.x - origin.x, p.y - origin.y);
        let (x1, y1) = (q.x - origin.x, q.y - origin.y);
        let cross = x0 * y1 - x1 * y0;
        a += cross;
        sx += cross * (x0 + x1);
        sy += cross * (y0 + y1);
    }

    let m00 = a / 2.0;
    Moments {
        m00,
        m10: sx / 6.0 + origin.x * m00,
        m01: sy / 6.0 + origin.y * m00,
    }
}

/// Centroid of the region enclosed by an integer contour
pub fn contour_centroid(points: &[PointI]) -> Option<Point> {
    let pts: Vec<Point> = points.iter().map(|p| p.to_point()).collect();
    polygon_moments(&pts).centroid()
}

/// Distance between two indices on a ring of length `n`
#[inline]
pub fn cyclic_distance(a: usize, b: usize, n: usize) -> usize {
    let d = a.abs_diff(b);
    d.min(n - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, w: f64, h: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x0, y0 + h),
            Point::new(x0 + w, y0 + h),
            Point::new(x0 + w, y0),
        ]
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = vec![
            PointI::new(0, 0),
            PointI::new(2, 0),
            PointI::new(2, 2),
            PointI::new(0, 2),
        ];
        let cw: Vec<PointI> = ccw.iter().rev().copied().collect();
        assert_eq!(signed_area(&ccw), 4.0);
        assert_eq!(signed_area(&cw), -4.0);
    }

    #[test]
    fn test_rect_centroid() {
        let m = polygon_moments(&rect(10.0, 20.0, 40.0, 10.0));
        assert!((m.m00.abs() - 400.0).abs() < 1e-9);
        let c = m.centroid().unwrap();
        assert!((c.x - 30.0).abs() < 1e-9);
        assert!((c.y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_follows_rigid_motion() {
        // L-shaped polygon so the centroid is not trivially the bbox centre
        let shape = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 30.0),
            Point::new(10.0, 30.0),
            Point::new(10.0, 10.0),
            Point::new(25.0, 10.0),
            Point::new(25.0, 0.0),
        ];
        let c = polygon_moments(&shape).centroid().unwrap();

        let (sin, cos) = 0.7f64.sin_cos();
        let (tx, ty) = (123.5, -42.25);
        let moved: Vec<Point> = shape
            .iter()
            .map(|p| Point::new(cos * p.x - sin * p.y + tx, sin * p.x + cos * p.y + ty))
            .collect();
        let expected = Point::new(cos * c.x - sin * c.y + tx, sin * c.x + cos * c.y + ty);
        let got = polygon_moments(&moved).centroid().unwrap();
        assert!(got.distance(&expected) < 1e-9);
    }

    #[test]
    fn test_zero_area_has_no_centroid() {
        let line = vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 10.0)];
        assert!(polygon_moments(&line).centroid().is_none());
        assert!(contour_centroid(&[]).is_none());
    }

    #[test]
    fn test_cyclic_distance() {
        assert_eq!(cyclic_distance(1, 9, 10), 2);
        assert_eq!(cyclic_distance(4, 6, 10), 2);
        assert_eq!(cyclic_distance(0, 0, 10), 0);
    }
}
