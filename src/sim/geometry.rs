//! Blade geometry: line-segment vs circle intersection
//!
//! The sole geometric primitive of the game. Called once per
//! (slash sub-segment, live object) pair on every gesture extend.

use glam::Vec2;

/// Closest point on the segment `p1..p2` to `point`.
///
/// Zero-length segments collapse to `p1` rather than dividing by zero.
pub fn closest_point_on_segment(p1: Vec2, p2: Vec2, point: Vec2) -> Vec2 {
    let seg = p2 - p1;
    let len_sq = seg.length_squared();
    if len_sq <= f32::EPSILON {
        return p1;
    }
    let t = ((point - p1).dot(seg) / len_sq).clamp(0.0, 1.0);
    p1 + seg * t
}

/// True iff the segment `p1..p2` passes within `radius` of `center`.
#[inline]
pub fn segment_circle_hit(p1: Vec2, p2: Vec2, center: Vec2, radius: f32) -> bool {
    closest_point_on_segment(p1, p2, center).distance(center) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_segment_through_center() {
        assert!(segment_circle_hit(
            Vec2::new(-10.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::ZERO,
            1.0
        ));
    }

    #[test]
    fn test_segment_grazing_edge() {
        // Horizontal segment passing exactly `radius` above the center
        assert!(segment_circle_hit(
            Vec2::new(-10.0, 5.0),
            Vec2::new(10.0, 5.0),
            Vec2::ZERO,
            5.0
        ));
        assert!(!segment_circle_hit(
            Vec2::new(-10.0, 5.1),
            Vec2::new(10.0, 5.1),
            Vec2::ZERO,
            5.0
        ));
    }

    #[test]
    fn test_endpoint_closest() {
        // Circle beyond the segment end: distance is to the endpoint
        let p1 = Vec2::new(0.0, 0.0);
        let p2 = Vec2::new(10.0, 0.0);
        assert!(segment_circle_hit(p1, p2, Vec2::new(13.0, 0.0), 3.0));
        assert!(!segment_circle_hit(p1, p2, Vec2::new(13.5, 0.0), 3.0));
    }

    #[test]
    fn test_zero_length_segment() {
        let p = Vec2::new(4.0, -2.0);
        assert!(segment_circle_hit(p, p, Vec2::new(5.0, -2.0), 1.0));
        assert!(!segment_circle_hit(p, p, Vec2::new(6.0, -2.0), 1.0));
        assert_eq!(closest_point_on_segment(p, p, Vec2::new(100.0, 100.0)), p);
    }

    /// Brute-force minimum distance by sampling along the segment.
    fn sampled_min_distance(p1: Vec2, p2: Vec2, center: Vec2, samples: usize) -> f32 {
        (0..=samples)
            .map(|i| {
                let t = i as f32 / samples as f32;
                (p1 + (p2 - p1) * t).distance(center)
            })
            .fold(f32::MAX, f32::min)
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(
            x1 in -500.0f32..500.0,
            y1 in -500.0f32..500.0,
            x2 in -500.0f32..500.0,
            y2 in -500.0f32..500.0,
            cx in -500.0f32..500.0,
            cy in -500.0f32..500.0,
            radius in 0.1f32..200.0,
            degenerate in proptest::bool::ANY,
        ) {
            let p1 = Vec2::new(x1, y1);
            let p2 = if degenerate { p1 } else { Vec2::new(x2, y2) };
            let center = Vec2::new(cx, cy);

            let samples = 2000;
            let sampled = sampled_min_distance(p1, p2, center, samples);
            // Sampling overestimates the true minimum by at most one step
            let tolerance = p1.distance(p2) / samples as f32 + 1e-3;

            let hit = segment_circle_hit(p1, p2, center, radius);
            if sampled <= radius - tolerance {
                prop_assert!(hit);
            }
            if sampled >= radius + tolerance {
                prop_assert!(!hit);
            }
        }
    }
}
