use glam::Vec3;
use super::oriented_point::{look_rotation, slerp_direction, OrientedPoint};
use crate::error::ConfigError;

/// Fraction of the derived tangent used for each handle
const HANDLE_SCALE: f32 = 0.9;

/// Piecewise cubic Bezier path through a sequence of oriented anchors.
///
/// Segment `i` uses control points `[3i, 3i+1, 3i+2, 3i+3]`; neighbouring
/// segments share their anchor. Handles are derived from the anchors so the
/// curve passes through every anchor with a continuous tangent.
#[derive(Debug, Clone)]
pub struct BezierPath {
    points: Vec<OrientedPoint>,
}

impl BezierPath {
    /// Build a path through `anchors`, deriving two handles per interior anchor.
    ///
    /// A single anchor yields one degenerate segment of four coincident points.
    pub fn from_anchors(anchors: &[OrientedPoint]) -> Result<Self, ConfigError> {
        let Some(&first) = anchors.first() else {
            return Err(ConfigError::EmptyGrowthPath);
        };
        let n = anchors.len() - 1;
        if n == 0 {
            return Ok(Self { points: vec![first; 4] });
        }

        let mut points = vec![first; 3 * n + 1];
        for (i, anchor) in anchors.iter().enumerate() {
            points[3 * i] = *anchor;
        }

        // Open ends have no neighbour to derive a handle from
        points[1] = anchors[0];
        points[3 * n - 1] = anchors[n];

        for b in 1..n {
            let anchor = anchors[b];
            let (incoming, outgoing) = derive_handles(
                anchors[b - 1].position,
                anchor.position,
                anchors[b + 1].position,
            );
            points[3 * b - 1] = OrientedPoint { position: incoming, ..anchor };
            points[3 * b + 1] = OrientedPoint { position: outgoing, ..anchor };
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[OrientedPoint] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_segments(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    /// Start anchor of segment `i`; `anchor(num_segments())` is the path end
    pub fn anchor(&self, i: usize) -> &OrientedPoint {
        &self.points[i * 3]
    }

    pub fn segment_points(&self, segment: usize) -> [Vec3; 4] {
        let base = segment * 3;
        [
            self.points[base].position,
            self.points[base + 1].position,
            self.points[base + 2].position,
            self.points[base + 3].position,
        ]
    }

    /// Position and unit tangent at `t` on `segment` (tangent may be zero on
    /// fully degenerate segments)
    pub fn evaluate(&self, segment: usize, t: f32) -> (Vec3, Vec3) {
        let [p0, p1, p2, p3] = self.segment_points(segment);
        evaluate_cubic(p0, p1, p2, p3, t)
    }

    pub fn position(&self, segment: usize, t: f32) -> Vec3 {
        self.evaluate(segment, t).0
    }

    /// Up reference blended between the segment's two anchor frames
    pub fn up(&self, segment: usize, t: f32) -> Vec3 {
        let start = self.anchor(segment).up();
        let end = self.anchor(segment + 1).up();
        slerp_direction(start, end, t)
    }

    /// Oriented frame at `t`: forward along the curve, up from [`Self::up`].
    ///
    /// Where the handles collapse onto an anchor the tangent vanishes; the
    /// chord between the segment anchors, then the blended anchor forward, is
    /// used instead.
    pub fn frame(&self, segment: usize, t: f32) -> OrientedPoint {
        let (position, tangent) = self.evaluate(segment, t);
        let start = self.anchor(segment);
        let end = self.anchor(segment + 1);

        let forward = tangent
            .try_normalize()
            .or_else(|| (end.position - start.position).try_normalize())
            .unwrap_or_else(|| (start.orientation.slerp(end.orientation, t)) * Vec3::Z);

        OrientedPoint {
            position,
            orientation: look_rotation(forward, self.up(segment, t)),
        }
    }
}

/// Handles around anchor `b`, flanked by anchors `a` and `c`.
///
/// Returns `(incoming, outgoing)`; both lie on one line through `b`.
pub fn derive_handles(a: Vec3, b: Vec3, c: Vec3) -> (Vec3, Vec3) {
    let bc = c - b;
    let ab = (b - a).normalize_or_zero() * bc.length();

    let d = b + ab;
    let e = d + (c - d) * 0.5;
    let eb = b - e;

    let incoming = b + eb * (ab.length() * HANDLE_SCALE);
    let outgoing = b - eb * (bc.length() * HANDLE_SCALE);
    (incoming, outgoing)
}

/// De Casteljau evaluation of one cubic segment
pub fn evaluate_cubic(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> (Vec3, Vec3) {
    let a = p0.lerp(p1, t);
    let b = p1.lerp(p2, t);
    let c = p2.lerp(p3, t);

    let d = a.lerp(b, t);
    let e = b.lerp(c, t);

    (d.lerp(e, t), (e - d).normalize_or_zero())
}
