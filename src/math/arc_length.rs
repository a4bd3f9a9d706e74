use super::bezier::BezierPath;

/// Number of uniform parameter samples per segment
pub const ARC_LENGTH_SAMPLES: usize = 16;

/// Cumulative chord length of one Bezier segment at uniform parameter steps.
///
/// Maps a curve parameter to distance travelled so texture V follows true
/// length instead of the (uneven) Bezier parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcLengthTable {
    samples: [f32; ARC_LENGTH_SAMPLES],
}

impl ArcLengthTable {
    pub fn for_segment(path: &BezierPath, segment: usize) -> Self {
        let mut samples = [0.0; ARC_LENGTH_SAMPLES];
        let mut total = 0.0;
        let mut prev = path.position(segment, 0.0);

        for (i, sample) in samples.iter_mut().enumerate() {
            let t = i as f32 / (ARC_LENGTH_SAMPLES - 1) as f32;
            let point = path.position(segment, t);
            total += prev.distance(point);
            *sample = total;
            prev = point;
        }

        Self { samples }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Approximate length of the whole segment
    pub fn total_length(&self) -> f32 {
        self.samples[ARC_LENGTH_SAMPLES - 1]
    }

    /// Interpolated length at parameter `t`, clamped to the table ends
    pub fn sample(&self, t: f32) -> f32 {
        let last = ARC_LENGTH_SAMPLES - 1;
        let index = t * last as f32;

        if index.is_nan() || index <= 0.0 {
            return self.samples[0];
        }
        if index >= last as f32 {
            return self.samples[last];
        }

        let lower = index.floor() as usize;
        let upper = index.ceil() as usize;
        let frac = index - lower as f32;
        self.samples[lower] + (self.samples[upper] - self.samples[lower]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::OrientedPoint;
    use glam::{Quat, Vec3};

    fn path_through(positions: &[Vec3]) -> BezierPath {
        let anchors: Vec<_> = positions
            .iter()
            .map(|&p| OrientedPoint::new(p, Quat::IDENTITY))
            .collect();
        BezierPath::from_anchors(&anchors).unwrap()
    }

    fn curvy() -> BezierPath {
        path_through(&[
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.5, 1.5),
            Vec3::new(1.2, 1.5, 1.0),
        ])
    }

    #[test]
    fn test_table_starts_at_zero_and_is_monotonic() {
        let path = curvy();
        for segment in 0..path.num_segments() {
            let table = ArcLengthTable::for_segment(&path, segment);
            assert_eq!(table.samples()[0], 0.0);
            for pair in table.samples().windows(2) {
                assert!(pair[1] >= pair[0]);
            }
        }
    }

    #[test]
    fn test_straight_segment_length() {
        let path = path_through(&[Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0)]);
        let table = ArcLengthTable::for_segment(&path, 0);
        assert!((table.total_length() - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_sample_endpoints_exact() {
        let table = ArcLengthTable::for_segment(&curvy(), 1);
        assert_eq!(table.sample(0.0), table.samples()[0]);
        assert_eq!(table.sample(1.0), table.samples()[ARC_LENGTH_SAMPLES - 1]);
    }

    #[test]
    fn test_sample_clamps_out_of_range() {
        let table = ArcLengthTable::for_segment(&curvy(), 1);
        assert_eq!(table.sample(-0.5), table.samples()[0]);
        assert_eq!(table.sample(1.5), table.total_length());
        assert_eq!(table.sample(f32::NAN), table.samples()[0]);
    }

    #[test]
    fn test_sample_monotonic() {
        let table = ArcLengthTable::for_segment(&curvy(), 2);
        let mut prev = table.sample(0.0);
        for i in 1..=200 {
            let v = table.sample(i as f32 / 200.0);
            assert!(v >= prev, "sample decreased at step {}", i);
            prev = v;
        }
    }

    #[test]
    fn test_sample_interpolates_between_entries() {
        let table = ArcLengthTable::for_segment(&curvy(), 0);
        let step = 1.0 / (ARC_LENGTH_SAMPLES - 1) as f32;
        let mid = table.sample(step * 2.5);
        let expected = (table.samples()[2] + table.samples()[3]) * 0.5;
        assert!((mid - expected).abs() < 0.0001);
    }

    #[test]
    fn test_degenerate_segment_has_zero_length() {
        let path = path_through(&[Vec3::ONE]);
        let table = ArcLengthTable::for_segment(&path, 0);
        assert_eq!(table.total_length(), 0.0);
        assert_eq!(table.sample(0.5), 0.0);
    }
}
