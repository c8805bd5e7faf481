//! Swept unit sphere against a single triangle
//!
//! All inputs are in the moving object's ellipsoid space, where the moving
//! ellipsoid is a unit sphere. The sphere center starts at `source` and moves
//! by `displacement` over the frame; times are fractions of that displacement.
//!
//! The test runs in three stages and the earliest valid time wins:
//! 1. the sphere touching the inside of the triangle face,
//! 2. the sphere touching one of the three corners,
//! 3. the sphere touching one of the three edges.
//!
//! A face hit returns immediately. When the sweep starts inside the slab of
//! distance 1 around the plane without running parallel to it, the face entry
//! time is already behind us and only the corner and edge stages can report a
//! hit.

use crate::foundation::math::{in_unit_interval, min_value, screen_time, solve_quadratic, Vec3};
use super::primitives::Triangle;

/// Result of a swept test: when and where the moving volume first touches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    /// Fraction of the displacement travelled at first contact, in `[0, 1]`
    pub time: f32,
    /// Contact point on the obstacle
    pub point: Vec3,
}

/// Where the sweep sits relative to the triangle's plane
enum PlaneSlab {
    /// The sweep never comes within unit distance of the plane this frame
    Missed,
    /// Running parallel to the plane while already within unit distance
    Embedded,
    /// Entry and exit times of the unit slab, each screened to `[0, 1]` or `+inf`
    Crossing { entry: f32, exit: f32 },
}

// Exact comparison: any non-zero approach speed gives finite slab times
#[allow(clippy::float_cmp)]
fn classify_plane(normal_distance: f32, normal_velocity: f32) -> PlaneSlab {
    if normal_velocity == 0.0 {
        return if normal_distance.abs() >= 1.0 {
            PlaneSlab::Missed
        } else {
            PlaneSlab::Embedded
        };
    }

    let t_in = (1.0 - normal_distance) / normal_velocity;
    let t_out = (-1.0 - normal_distance) / normal_velocity;
    let t0 = min_value(t_in, t_out);
    let t1 = if t_in > t_out { t_in } else { t_out };

    if t0 > 1.0 || t1 < 0.0 {
        return PlaneSlab::Missed;
    }

    PlaneSlab::Crossing {
        entry: screen_time(t0),
        exit: screen_time(t1),
    }
}

/// Sweep a unit sphere from `source` along `displacement` against `triangle`.
///
/// Returns the earliest contact within the frame, or `None` when the sphere
/// never touches the triangle before the displacement is exhausted.
pub fn sweep_unit_sphere(triangle: &Triangle, source: &Vec3, displacement: &Vec3) -> Option<SweepHit> {
    let plane = triangle.plane();
    let normal_distance = plane.signed_distance(source);
    let normal_velocity = plane.normal.dot(displacement);

    match classify_plane(normal_distance, normal_velocity) {
        PlaneSlab::Missed => return None,
        PlaneSlab::Embedded => {
            let point = plane.project(source);
            if triangle.contains_point(&point) {
                return Some(SweepHit { time: 0.0, point });
            }
        }
        PlaneSlab::Crossing { entry, exit } => {
            let first = min_value(entry, exit);
            if first.is_finite() {
                let point = plane.project(&(source + displacement * first));
                if triangle.contains_point(&point) && entry.is_finite() {
                    return Some(SweepHit { time: entry, point });
                }
            }
        }
    }

    let mut best_time = f32::INFINITY;
    let mut best_point = Vec3::repeat(f32::NAN);

    // Corners
    let a = displacement.norm_squared();
    for vertex in [triangle.p0, triangle.p1, triangle.p2] {
        let b = 2.0 * displacement.dot(&(source - vertex));
        let c = (vertex - source).norm_squared() - 1.0;
        if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            let t = min_value(screen_time(t0), screen_time(t1));
            if best_time > t {
                best_time = t;
                best_point = vertex;
            }
        }
    }

    // Edges
    let velocity_sq = displacement.norm_squared();
    for (start, edge) in triangle.edges() {
        let to_start = start - source;
        let edge_sq = edge.norm_squared();
        let edge_dot_vel = edge.dot(displacement);
        let edge_dot_start = edge.dot(&to_start);

        let a = -edge_sq * velocity_sq + edge_dot_vel * edge_dot_vel;
        let b = edge_sq * 2.0 * displacement.dot(&to_start) - 2.0 * edge_dot_vel * edge_dot_start;
        let c = edge_sq * (1.0 - to_start.norm_squared()) + edge_dot_start * edge_dot_start;

        if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            let t = min_value(screen_time(t0), screen_time(t1));
            if best_time > t {
                let fraction = (t * edge_dot_vel - edge_dot_start) / edge_sq;
                if in_unit_interval(fraction) {
                    best_time = t;
                    best_point = start + edge * fraction;
                }
            }
        }
    }

    in_unit_interval(best_time).then_some(SweepHit {
        time: best_time,
        point: best_point,
    })
}
