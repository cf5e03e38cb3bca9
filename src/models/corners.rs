use crate::models::{Point, PointI};

/// Per-point distance from a contour's centroid, index-aligned with the contour
#[derive(Debug, Clone, PartialEq)]
pub struct RadialSignal {
    /// Centroid the distances are measured from
    pub centroid: Point,
    /// One distance per contour point
    pub values: Vec<f64>,
}

impl RadialSignal {
    /// Signal length (equals the contour length)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for an empty signal
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A local maximum of the radial signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Index into the signal (and the contour)
    pub index: usize,
    /// Signal value at `index`
    pub distance: f64,
}

/// Corner candidates of one contour, in traversal order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CornerSet {
    points: Vec<PointI>,
}

impl CornerSet {
    /// Wrap corner points already in traversal order
    pub fn new(points: Vec<PointI>) -> Self {
        Self { points }
    }

    /// Corner points
    pub fn points(&self) -> &[PointI] {
        &self.points
    }

    /// Number of corners
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no corner was found
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Map every corner through `f`
    pub fn map(&self, f: impl Fn(PointI) -> PointI) -> Self {
        Self {
            points: self.points.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Order four corners as top-left, top-right, bottom-right, bottom-left.
    ///
    /// Top-left has the smallest `x + y`, bottom-right the largest; top-right
    /// has the largest `x - y`, bottom-left the smallest. Returns `None`
    /// unless the set holds exactly four points.
    pub fn ordered_quad(&self) -> Option<[PointI; 4]> {
        if self.points.len() != 4 {
            return None;
        }
        let by_sum = |p: &&PointI| p.x + p.y;
        let by_diff = |p: &&PointI| p.x - p.y;
        let tl = *self.points.iter().min_by_key(by_sum)?;
        let br = *self.points.iter().max_by_key(by_sum)?;
        let tr = *self.points.iter().max_by_key(by_diff)?;
        let bl = *self.points.iter().min_by_key(by_diff)?;
        Some([tl, tr, br, bl])
    }
}

/// Semantic label for a corner set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Exactly four corners: an accepted document page
    Quadrilateral,
    /// Any other corner count
    Other,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Quadrilateral => write!(f, "quadrilateral"),
            Shape::Other => write!(f, "other"),
        }
    }
}

/// Detection result for one selected contour
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCandidate {
    /// Index of the contour in extraction order
    pub contour_index: usize,
    /// Enclosed area of the contour, in working-resolution pixels
    pub area: f64,
    /// Classification of the corner set
    pub shape: Shape,
    /// Corners in input-image coordinates, traversal order
    pub corners: CornerSet,
}

impl DocumentCandidate {
    /// Corners ordered for perspective correction, when this is a quadrilateral
    pub fn quad(&self) -> Option<[PointI; 4]> {
        match self.shape {
            Shape::Quadrilateral => self.corners.ordered_quad(),
            Shape::Other => None,
        }
    }
}
