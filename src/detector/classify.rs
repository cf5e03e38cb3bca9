use crate::models::{CornerSet, Shape};

/// Labels a corner set by its arity
pub struct ShapeClassifier;

impl ShapeClassifier {
    /// Corners a document page has
    pub const QUAD_CORNERS: usize = 4;

    /// Exactly four corners is a quadrilateral, anything else is not
    pub fn classify(corners: &CornerSet) -> Shape {
        if corners.len() == Self::QUAD_CORNERS {
            Shape::Quadrilateral
        } else {
            Shape::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PointI;

    fn corners(n: i32) -> CornerSet {
        CornerSet::new((0..n).map(|i| PointI::new(i, i * 2)).collect())
    }

    #[test]
    fn test_classify_by_arity() {
        assert_eq!(ShapeClassifier::classify(&corners(4)), Shape::Quadrilateral);
        for n in [0, 1, 3, 5, 8] {
            assert_eq!(ShapeClassifier::classify(&corners(n)), Shape::Other);
        }
    }
}
