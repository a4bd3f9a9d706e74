use crate::error::ConfigError;
use crate::math::{BezierPath, OrientedPoint};

/// Ordered oriented points of one growth run: the seed followed by one point
/// per step
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthPath {
    points: Vec<OrientedPoint>,
    /// Steps that ended on a surface rather than in free space
    hits: usize,
}

impl GrowthPath {
    pub fn new(seed: OrientedPoint) -> Self {
        Self::with_capacity(seed, 0)
    }

    pub fn with_capacity(seed: OrientedPoint, steps: usize) -> Self {
        let mut points = Vec::with_capacity(steps + 1);
        points.push(seed);
        Self { points, hits: 0 }
    }

    pub(crate) fn push(&mut self, point: OrientedPoint, hit: bool) {
        self.points.push(point);
        if hit {
            self.hits += 1;
        }
    }

    pub fn points(&self) -> &[OrientedPoint] {
        &self.points
    }

    pub fn origin(&self) -> &OrientedPoint {
        &self.points[0]
    }

    pub fn last(&self) -> &OrientedPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a path holds at least its seed
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn to_bezier(&self) -> Result<BezierPath, ConfigError> {
        BezierPath::from_anchors(&self.points)
    }
}
