//! Point sampling for pattern authoring
//!
//! Pure functions; nothing here runs per tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Point on a cubic bezier at parameter `t` in [0, 1]
#[inline]
pub fn bezier_point(start: Vec2, start_tangent: Vec2, end_tangent: Vec2, end: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    start * (u * u * u)
        + start_tangent * (3.0 * u * u * t)
        + end_tangent * (3.0 * u * t * t)
        + end * (t * t * t)
}

/// Sample `points` evenly in parameter space along a cubic bezier
pub fn bezier(start: Vec2, start_tangent: Vec2, end_tangent: Vec2, end: Vec2, points: usize) -> Vec<Vec2> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        n => (0..n)
            .map(|i| {
                let t = i as f32 / (n - 1) as f32;
                bezier_point(start, start_tangent, end_tangent, end, t)
            })
            .collect(),
    }
}

/// Sample a circle whose diameter runs from `a` to the mirrored point `b`.
///
/// The full circle is split into `points` steps starting at `a`; only the
/// first `floor(points * arc_fraction)` are returned, so a fraction of 0.5
/// yields the half circle from `a` towards `b`.
pub fn circle_arc(a: Vec2, b: Vec2, points: usize, arc_fraction: f32) -> Vec<Vec2> {
    if points == 0 {
        return Vec::new();
    }

    let arc_points = (points as f32 * arc_fraction).floor().max(0.0) as usize;
    let r = a.distance(b) / 2.0;
    let center = a + (b - a).normalize_or_zero() * r;
    let step = TAU / points as f32;
    let from_center = a - center;
    let start_angle = from_center.y.atan2(from_center.x);

    (0..arc_points)
        .map(|i| {
            let theta = start_angle + step * i as f32;
            center + Vec2::new(theta.cos(), theta.sin()) * r
        })
        .collect()
}

/// Points from `start` towards `end`, `spacing` apart, starting at `start`
pub fn points_between(start: Vec2, end: Vec2, spacing: f32) -> Vec<Vec2> {
    if spacing <= 0.0 {
        return vec![start];
    }
    let delta = end - start;
    let n = (delta.length() / spacing).floor() as usize;
    let step = delta.normalize_or_zero() * spacing;
    (0..=n).map(|i| start + step * i as f32).collect()
}

/// Drop candidates closer than `min_distance` to any already placed point
pub fn trim_points_by_distance(candidates: &[Vec2], placed: &[Vec2], min_distance: f32) -> Vec<Vec2> {
    let min_sq = min_distance * min_distance;
    candidates
        .iter()
        .copied()
        .filter(|c| placed.iter().all(|p| c.distance_squared(*p) >= min_sq))
        .collect()
}

/// Uniform unit direction
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let theta = rng.random_range(0.0..TAU);
    Vec2::new(theta.cos(), theta.sin())
}

/// Uniform point inside a disc
pub fn point_inside_circle<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    // sqrt keeps the area density uniform
    let r = rng.random::<f32>().sqrt() * radius;
    center + random_direction(rng) * r
}

/// Point at a uniformly drawn distance in [inner, radius] from `center`
pub fn point_in_ring<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32, inner_radius: f32) -> Vec2 {
    let (lo, hi) = if inner_radius <= radius {
        (inner_radius, radius)
    } else {
        (radius, inner_radius)
    };
    let distance = if hi > lo { rng.random_range(lo..=hi) } else { lo };
    center + random_direction(rng) * distance
}

/// Uniform point on a circle
pub fn point_on_circle<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    center + random_direction(rng) * radius
}

/// Uniform point in the axis-aligned box spanned by two corners
pub fn point_inside_box<R: Rng + ?Sized>(rng: &mut R, bottom_left: Vec2, top_right: Vec2) -> Vec2 {
    let lo = bottom_left.min(top_right);
    let hi = bottom_left.max(top_right);
    Vec2::new(
        lo.x + rng.random::<f32>() * (hi.x - lo.x),
        lo.y + rng.random::<f32>() * (hi.y - lo.y),
    )
}

/// Authoring shapes that expand into target positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PatternShape {
    /// Straight segment
    Line { start: Vec2, end: Vec2 },
    /// Cubic bezier; `density` scales the point count relative to a line
    Bezier {
        start: Vec2,
        start_tangent: Vec2,
        end_tangent: Vec2,
        end: Vec2,
        density: f32,
    },
    /// Circle through `a` and its mirror `b`, truncated to `arc_fraction`
    Arc {
        a: Vec2,
        b: Vec2,
        points: usize,
        arc_fraction: f32,
    },
}

impl PatternShape {
    /// Expand into positions, `spacing` being the smoke drop distance
    pub fn sample(&self, spacing: f32) -> Vec<Vec2> {
        match *self {
            PatternShape::Line { start, end } => points_between(start, end, spacing),
            PatternShape::Bezier {
                start,
                start_tangent,
                end_tangent,
                end,
                density,
            } => {
                let n = if spacing > 0.0 {
                    (start.distance(end) * density / spacing).floor() as usize
                } else {
                    0
                };
                bezier(start, start_tangent, end_tangent, end, n)
            }
            PatternShape::Arc {
                a,
                b,
                points,
                arc_fraction,
            } => circle_arc(a, b, points, arc_fraction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn approx(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn test_bezier_endpoints() {
        let pts = bezier(Vec2::ZERO, Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::X, 5);
        assert_eq!(pts.len(), 5);
        assert!(approx(pts[0], Vec2::ZERO));
        assert!(approx(pts[4], Vec2::X));
        // Symmetric control points put the midpoint on x = 0.5
        assert!((pts[2].x - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_bezier_degenerate_counts() {
        assert!(bezier(Vec2::ZERO, Vec2::ZERO, Vec2::ONE, Vec2::ONE, 0).is_empty());
        assert_eq!(bezier(Vec2::ZERO, Vec2::ZERO, Vec2::ONE, Vec2::ONE, 1), vec![Vec2::ZERO]);
    }

    #[test]
    fn test_half_circle() {
        let pts = circle_arc(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), 4, 0.5);
        assert_eq!(pts.len(), 2);
        assert!(approx(pts[0], Vec2::new(-1.0, 0.0)));
        // Counter-clockwise quarter step from (-1, 0) around the origin
        assert!(approx(pts[1], Vec2::new(0.0, -1.0)));
    }

    #[test]
    fn test_points_between() {
        let pts = points_between(Vec2::ZERO, Vec2::new(2.0, 0.0), 0.5);
        assert_eq!(pts.len(), 5);
        assert!(approx(pts[4], Vec2::new(2.0, 0.0)));

        // Remainder shorter than spacing is not padded
        let pts = points_between(Vec2::ZERO, Vec2::new(1.2, 0.0), 0.5);
        assert_eq!(pts.len(), 3);
    }

    #[test]
    fn test_trim() {
        let candidates = [Vec2::ZERO, Vec2::new(0.1, 0.0), Vec2::new(2.0, 0.0)];
        let placed = [Vec2::ZERO];
        let kept = trim_points_by_distance(&candidates, &placed, 0.5);
        assert_eq!(kept, vec![Vec2::new(2.0, 0.0)]);
    }

    #[test]
    fn test_trim_uses_true_distance() {
        // 1.5 apart is inside a 2.0 threshold even though 1.5^2 > 2.0
        let candidates = [Vec2::new(1.5, 0.0), Vec2::new(2.0, 0.0)];
        let kept = trim_points_by_distance(&candidates, &[Vec2::ZERO], 2.0);
        assert_eq!(kept, vec![Vec2::new(2.0, 0.0)]);
    }

    #[test]
    fn test_random_sampling_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let center = Vec2::new(3.0, -2.0);
        for _ in 0..500 {
            assert!(point_inside_circle(&mut rng, center, 2.0).distance(center) <= 2.0 + 1e-4);

            let d = point_in_ring(&mut rng, center, 2.0, 1.0).distance(center);
            assert!((1.0 - 1e-4..=2.0 + 1e-4).contains(&d));

            assert!((point_on_circle(&mut rng, center, 1.5).distance(center) - 1.5).abs() < 1e-4);

            let p = point_inside_box(&mut rng, Vec2::new(1.0, 1.0), Vec2::new(-1.0, 3.0));
            assert!((-1.0..=1.0).contains(&p.x) && (1.0..=3.0).contains(&p.y));

            assert!((random_direction(&mut rng).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_shape_sampling() {
        let line = PatternShape::Line {
            start: Vec2::ZERO,
            end: Vec2::new(3.0, 0.0),
        };
        assert_eq!(line.sample(1.0).len(), 4);

        let curve = PatternShape::Bezier {
            start: Vec2::ZERO,
            start_tangent: Vec2::new(1.0, 2.0),
            end_tangent: Vec2::new(3.0, 2.0),
            end: Vec2::new(4.0, 0.0),
            density: 1.5,
        };
        assert_eq!(curve.sample(1.0).len(), 6);

        let arc = PatternShape::Arc {
            a: Vec2::ZERO,
            b: Vec2::new(0.0, 2.0),
            points: 8,
            arc_fraction: 1.0,
        };
        let pts = arc.sample(1.0);
        assert_eq!(pts.len(), 8);
        assert!(pts.iter().all(|p| (p.distance(Vec2::new(0.0, 1.0)) - 1.0).abs() < 1e-4));
    }
}
