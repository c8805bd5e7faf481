//! Sliding collision response
//!
//! [`collide_and_respond`] moves an object by a requested displacement. Each
//! iteration asks [`detect_collision`] for the earliest contact, commits the
//! part of the move that stays just short of it, and replaces the rest with its
//! projection onto the sliding plane at the contact. The loop is bounded by an
//! iteration cap and stops once the remaining displacement is negligible.

use crate::foundation::math::Vec3;
use crate::physics::collision::Plane;
use crate::physics::collision_system::{detect_collision, CollisionStats, CollisionWorld, MovingObject};
use crate::physics::volumes::Volumes;

/// Tuning of the iteration controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseSettings {
    /// Upper bound on detect/respond iterations per call
    pub max_iterations: u32,
    /// Back-off fraction and minimum displacement length
    pub epsilon: f32,
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            epsilon: 0.1,
        }
    }
}

/// What one call to [`collide_and_respond`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Total displacement applied to the object and the camera
    pub committed: Vec3,
    /// Iterations spent
    pub iterations: u32,
    /// Iterations that ended in a contact
    pub collisions: u32,
    /// Displacement left over and dropped when the loop stopped
    pub residual: Vec3,
}

impl Default for MoveOutcome {
    fn default() -> Self {
        Self {
            committed: Vec3::zeros(),
            iterations: 0,
            collisions: 0,
            residual: Vec3::zeros(),
        }
    }
}

impl MoveOutcome {
    /// True if at least one contact was found during the move
    pub fn collided(&self) -> bool {
        self.collisions > 0
    }
}

/// Slide `displacement` along the plane touching the ellipsoid at `collision_point`.
///
/// Works in the ellipsoid space of `volumes`: the sliding plane passes through
/// the contact with normal pointing from the contact to the ellipsoid center.
/// The intended destination is projected onto that plane and the new
/// displacement runs from the contact to the projection, scaled back to world
/// space.
pub fn resolve_displacement(volumes: &Volumes, collision_point: &Vec3, displacement: &Vec3) -> Vec3 {
    let ellipsoid = &volumes.ellipsoid;
    let center = ellipsoid.scaled_center();
    let point = ellipsoid.to_ellipsoid_space(collision_point);
    let velocity = ellipsoid.to_ellipsoid_space(displacement);

    let slide_plane = Plane::from_point_normal(point, (center - point).normalize());
    let destination = slide_plane.project(&(center + velocity));

    ellipsoid.to_world_space(&(destination - point))
}

fn commit(moving: &mut MovingObject, camera_position: &mut Vec3, step: &Vec3) {
    moving.volumes.translate(step);
    *camera_position += step;
}

/// Move `moving` by `displacement`, sliding along whatever it runs into.
///
/// Only final sub-steps are written to the moving volumes and the camera
/// position. If the iteration cap is reached first, the remaining displacement
/// is dropped and reported in [`MoveOutcome::residual`].
///
/// Sliding never travels further than was asked for. The slide is computed in
/// ellipsoid space, and scaling it back by unequal axes can stretch it, so each
/// slide is cut to the length still unspent.
pub fn collide_and_respond(
    settings: &ResponseSettings,
    camera_position: &mut Vec3,
    world: &CollisionWorld<'_>,
    moving: &mut MovingObject,
    displacement: Vec3,
    stats: &mut CollisionStats,
) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();
    let mut displacement = displacement;
    let mut budget = displacement.norm();

    while outcome.iterations < settings.max_iterations && displacement.norm() > settings.epsilon {
        outcome.iterations += 1;

        let Some(hit) = detect_collision(world, moving, &displacement, stats) else {
            commit(moving, camera_position, &displacement);
            outcome.committed += displacement;
            displacement = Vec3::zeros();
            break;
        };

        outcome.collisions += 1;

        // Stop short of the contact and pull the contact back by the same margin
        let step = displacement * hit.time * (1.0 - settings.epsilon);
        commit(moving, camera_position, &step);
        outcome.committed += step;
        budget = (budget - step.norm()).max(0.0);

        let contact = hit.point - displacement * (hit.time * settings.epsilon);
        let remaining = displacement - step;
        displacement = resolve_displacement(&moving.volumes, &contact, &remaining);

        let length = displacement.norm();
        if length > budget {
            displacement *= budget / length;
        }

        log::trace!(
            "Iteration {}: hit {:?} at t={:.4}, sliding by {:?}",
            outcome.iterations,
            hit.obstacle,
            hit.time,
            displacement
        );
    }

    if displacement.norm() > settings.epsilon {
        log::warn!(
            "Collision response gave up after {} iterations, dropping {:?}",
            outcome.iterations,
            displacement
        );
    }

    outcome.residual = displacement;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::{Triangle, TriangleSource};
    use crate::physics::collision_system::SceneObject;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    /// Ground plane at y = 0
    struct Ground;

    impl TriangleSource for Ground {
        fn triangle_count(&self) -> usize {
            2
        }

        fn triangle(&self, index: usize) -> Triangle {
            let a = Vec3::new(-100.0, 0.0, -100.0);
            let b = Vec3::new(120.0, 0.0, -100.0);
            let c = Vec3::new(-100.0, 0.0, 120.0);
            let d = Vec3::new(120.0, 0.0, 120.0);
            match index {
                0 => Triangle::new(a, b, c),
                _ => Triangle::new(b, d, c),
            }
        }
    }

    fn camera(position: Vec3, axes: Vec3) -> (Vec3, MovingObject, Vec<SceneObject>) {
        let volumes = Volumes::for_camera(position, axes);
        let objects = vec![SceneObject::volumes_only(volumes.clone())];
        (position, MovingObject { index: 0, volumes }, objects)
    }

    #[test]
    fn test_resolved_displacement_is_orthogonal_to_normal() {
        let volumes = Volumes::for_camera(Vec3::new(1.0, 4.0, -2.0), Vec3::new(2.0, 5.0, 2.0));
        let contact = Vec3::new(2.0, 0.0, -1.0);
        let displacement = Vec3::new(3.0, -6.0, 1.5);

        let slide = resolve_displacement(&volumes, &contact, &displacement);

        let e = &volumes.ellipsoid;
        let normal = (e.scaled_center() - e.to_ellipsoid_space(&contact)).normalize();
        assert_abs_diff_eq!(normal.dot(&e.to_ellipsoid_space(&slide)), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_resolved_displacement_keeps_tangential_part() {
        let volumes = Volumes::for_camera(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let slide = resolve_displacement(&volumes, &Vec3::zeros(), &Vec3::new(2.0, -3.0, 1.0));
        assert_relative_eq!(slide, Vec3::new(2.0, 0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_free_move_commits_everything() {
        let (mut position, mut moving, objects) = camera(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let world = CollisionWorld::new(Some(&Ground), &objects);
        let mut stats = CollisionStats::default();
        let displacement = Vec3::new(3.0, 0.0, -4.0);

        let outcome = collide_and_respond(
            &ResponseSettings::default(),
            &mut position,
            &world,
            &mut moving,
            displacement,
            &mut stats,
        );

        assert_eq!(outcome.iterations, 1);
        assert!(!outcome.collided());
        assert_eq!(outcome.committed, displacement);
        assert_eq!(outcome.residual, Vec3::zeros());
        assert_relative_eq!(position, Vec3::new(3.0, 10.0, -4.0));
        assert_relative_eq!(moving.volumes.ellipsoid.center, position);
    }

    #[test]
    fn test_short_displacement_is_ignored() {
        let (mut position, mut moving, objects) = camera(Vec3::new(0.0, 10.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let world = CollisionWorld::new(Some(&Ground), &objects);
        let mut stats = CollisionStats::default();

        let outcome = collide_and_respond(
            &ResponseSettings::default(),
            &mut position,
            &world,
            &mut moving,
            Vec3::new(0.0, -0.05, 0.0),
            &mut stats,
        );

        assert_eq!(outcome.iterations, 0);
        assert_eq!(stats.queries, 0);
        assert_eq!(position, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_drop_stops_above_ground() {
        let (mut position, mut moving, objects) = camera(Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let world = CollisionWorld::new(Some(&Ground), &objects);
        let mut stats = CollisionStats::default();
        let drop = Vec3::new(0.0, -10.0, 0.0);

        let outcome = collide_and_respond(
            &ResponseSettings::default(),
            &mut position,
            &world,
            &mut moving,
            drop,
            &mut stats,
        );

        assert!(outcome.collided());
        assert!(outcome.committed.norm() <= drop.norm() + 1e-4);
        let bottom = position.y - 1.0;
        assert!(bottom >= 0.0, "sank below the ground: {bottom}");
        assert!(bottom < 0.25, "stopped too high: {bottom}");
    }

    /// Steep wall on the plane x = 10 + 0.4 y, facing the origin
    struct Slope;

    impl TriangleSource for Slope {
        fn triangle_count(&self) -> usize {
            1
        }

        fn triangle(&self, _index: usize) -> Triangle {
            Triangle::new(
                Vec3::new(2.0, -20.0, -30.0),
                Vec3::new(26.0, 40.0, 0.0),
                Vec3::new(2.0, -20.0, 30.0),
            )
        }
    }

    #[test]
    fn test_slide_with_unequal_axes_stays_within_request() {
        let (mut position, mut moving, objects) = camera(Vec3::zeros(), Vec3::new(2.0, 5.0, 2.0));
        let world = CollisionWorld::new(Some(&Slope), &objects);
        let mut stats = CollisionStats::default();
        let displacement = Vec3::new(20.0, 0.0, 0.0);

        let outcome = collide_and_respond(
            &ResponseSettings::default(),
            &mut position,
            &world,
            &mut moving,
            displacement,
            &mut stats,
        );

        assert_eq!(outcome.collisions, 1);
        assert!(
            outcome.committed.norm() <= displacement.norm() + 1e-3,
            "travelled {} for a request of {}",
            outcome.committed.norm(),
            displacement.norm()
        );
        // Still slid up the slope rather than stopping dead
        assert!(outcome.committed.y > 5.0);
        assert_relative_eq!(position, outcome.committed, epsilon = 1e-4);
        assert_relative_eq!(moving.volumes.ellipsoid.center, position, epsilon = 1e-4);
    }

    #[test]
    fn test_iteration_cap_bounds_work() {
        let (mut position, mut moving, objects) = camera(Vec3::new(0.0, 1.5, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let world = CollisionWorld::new(Some(&Ground), &objects);
        let mut stats = CollisionStats::default();
        let settings = ResponseSettings {
            max_iterations: 1,
            epsilon: 0.1,
        };
        let displacement = Vec3::new(5.0, -5.0, 0.0);

        let outcome = collide_and_respond(&settings, &mut position, &world, &mut moving, displacement, &mut stats);

        assert_eq!(outcome.iterations, 1);
        assert_eq!(stats.queries, 1);
        assert!(outcome.residual.norm() > settings.epsilon);
        assert!(outcome.committed.norm() <= displacement.norm() + 1e-4);
    }
}
