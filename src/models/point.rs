/// 2D point with floating point coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Calculate squared distance (faster, no sqrt)
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Integer point for pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointI {
    /// X coordinate (column)
    pub x: i32,
    /// Y coordinate (row)
    pub y: i32,
}

impl PointI {
    /// Create a new integer point
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pixel centre as a floating point coordinate
    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Map a pixel onto a grid `factor` times finer, centre to centre,
    /// rounding to the nearest pixel
    pub fn scale(self, factor: f64) -> Self {
        let map = |v: i32| ((v as f64 + 0.5) * factor - 0.5).round() as i32;
        Self {
            x: map(self.x),
            y: map(self.y),
        }
    }
}
