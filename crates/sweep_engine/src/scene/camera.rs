//! First-person camera
//!
//! The camera keeps an orthonormal basis (right, up, look) and a position.
//! Movement helpers translate along the basis; rotation helpers turn the basis
//! about one of its own axes. Pitch and roll can be clamped, and the angle
//! accumulated so far is tracked on the camera itself.

use bitflags::bitflags;

use crate::core::config::CameraConfig;
use crate::foundation::math::{rotate_about, Vec3};

bitflags! {
    /// Movement and rotation requested by the input layer for this frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MovementIntent: u16 {
        /// Forward along the look vector
        const WALK        = 1 << 0;
        /// Backward along the look vector
        const WALK_BACK   = 1 << 1;
        /// Right along the right vector
        const STRAFE      = 1 << 2;
        /// Left along the right vector
        const STRAFE_BACK = 1 << 3;
        /// Up
        const FLY         = 1 << 4;
        /// Down
        const FLY_DOWN    = 1 << 5;
        /// Nose up
        const PITCH       = 1 << 6;
        /// Nose down
        const PITCH_BACK  = 1 << 7;
        /// Turn left
        const YAW         = 1 << 8;
        /// Turn right
        const YAW_BACK    = 1 << 9;
        /// Bank one way
        const ROLL        = 1 << 10;
        /// Bank the other way
        const ROLL_BACK   = 1 << 11;
    }
}

/// A first-person camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Right axis of the basis
    pub right: Vec3,
    /// Up axis of the basis
    pub up: Vec3,
    /// Viewing direction
    pub look: Vec3,
    /// Requested movement for the current frame
    pub intent: MovementIntent,
    /// Pitch accumulated by clamped [`pitch`](Self::pitch) calls, in degrees
    pub pitch_angle: f32,
    /// Roll accumulated by clamped [`roll`](Self::roll) calls, in degrees
    pub roll_angle: f32,
    /// Pitch limit in degrees
    pub max_pitch: f32,
    /// Roll limit in degrees
    pub max_roll: f32,
}

impl Camera {
    /// Camera at `position` looking down -z with +y up
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            right: Vec3::x(),
            up: Vec3::y(),
            look: -Vec3::z(),
            intent: MovementIntent::empty(),
            pitch_angle: 0.0,
            roll_angle: 0.0,
            max_pitch: 60.0,
            max_roll: 20.0,
        }
    }

    /// Camera set up from configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            max_pitch: config.max_pitch,
            max_roll: config.max_roll,
            ..Self::new(config.position())
        }
    }

    /// Move along the look vector, optionally staying at the same height
    pub fn walk(&mut self, units: f32, lock_y: bool) {
        self.position += Self::planar(self.look * units, lock_y);
    }

    /// Move along the right vector, optionally staying at the same height
    pub fn strafe(&mut self, units: f32, lock_y: bool) {
        self.position += Self::planar(self.right * units, lock_y);
    }

    /// Move along world +y, or along the camera's own up vector
    pub fn fly(&mut self, units: f32, world_up: bool) {
        let axis = if world_up { Vec3::y() } else { self.up };
        self.position += axis * units;
    }

    /// Rotate up and look about the right vector
    ///
    /// With `clamp`, the rotation is cut so the accumulated pitch stays within
    /// `±max_pitch`.
    pub fn pitch(&mut self, degrees: f32, clamp: bool) {
        let degrees = if clamp {
            Self::clamped(&mut self.pitch_angle, self.max_pitch, degrees)
        } else {
            degrees
        };
        self.up = rotate_about(&self.up, &self.right, degrees);
        self.look = rotate_about(&self.look, &self.right, degrees);
    }

    /// Rotate right and look about world +y, or about the camera's up vector
    pub fn yaw(&mut self, degrees: f32, world_up: bool) {
        let axis = if world_up { Vec3::y() } else { self.up };
        self.right = rotate_about(&self.right, &axis, degrees);
        self.look = rotate_about(&self.look, &axis, degrees);
    }

    /// Rotate right and up about the look vector, clamped like [`pitch`](Self::pitch)
    pub fn roll(&mut self, degrees: f32, clamp: bool) {
        let degrees = if clamp {
            Self::clamped(&mut self.roll_angle, self.max_roll, degrees)
        } else {
            degrees
        };
        self.right = rotate_about(&self.right, &self.look, degrees);
        self.up = rotate_about(&self.up, &self.look, degrees);
    }

    /// Turn by relative mouse motion: x yaws about world up, y pitches with clamping
    pub fn look_around(&mut self, dx: f32, dy: f32, elapsed: f32, sensitivity: f32) {
        self.yaw(dx * elapsed * sensitivity, true);
        self.pitch(dy * elapsed * sensitivity, true);
    }

    /// Apply the rotation flags of [`intent`](Self::intent), `degrees` per active flag
    pub fn rotate_by_intent(&mut self, degrees: f32) {
        let axis = |positive: MovementIntent, negative: MovementIntent| {
            let mut amount = 0.0;
            if self.intent.contains(positive) {
                amount += degrees;
            }
            if self.intent.contains(negative) {
                amount -= degrees;
            }
            amount
        };
        let pitch = axis(MovementIntent::PITCH, MovementIntent::PITCH_BACK);
        let yaw = axis(MovementIntent::YAW, MovementIntent::YAW_BACK);
        let roll = axis(MovementIntent::ROLL, MovementIntent::ROLL_BACK);

        if pitch != 0.0 {
            self.pitch(pitch, true);
        }
        if yaw != 0.0 {
            self.yaw(yaw, true);
        }
        if roll != 0.0 {
            self.roll(roll, true);
        }
    }

    /// Displacement the walk and strafe flags ask for over `elapsed` seconds.
    ///
    /// Y is locked, so the result is horizontal. Fly flags are not included:
    /// vertical motion comes from gravity. The camera itself is not moved.
    pub fn intended_displacement(&self, elapsed: f32, speed: f32) -> Vec3 {
        let units = elapsed * speed;
        let mut displacement = Vec3::zeros();

        if self.intent.contains(MovementIntent::WALK) {
            displacement += Self::planar(self.look * units, true);
        }
        if self.intent.contains(MovementIntent::WALK_BACK) {
            displacement += Self::planar(self.look * -units, true);
        }
        if self.intent.contains(MovementIntent::STRAFE) {
            displacement += Self::planar(self.right * units, true);
        }
        if self.intent.contains(MovementIntent::STRAFE_BACK) {
            displacement += Self::planar(self.right * -units, true);
        }

        displacement
    }

    fn planar(mut direction: Vec3, lock_y: bool) -> Vec3 {
        if lock_y {
            direction.y = 0.0;
        }
        direction
    }

    /// Cut `degrees` so `accumulated + degrees` stays within `±limit`, and update the accumulator
    fn clamped(accumulated: &mut f32, limit: f32, degrees: f32) -> f32 {
        let target = *accumulated + degrees;
        let degrees = if target > limit || target < -limit {
            limit.copysign(degrees) - *accumulated
        } else {
            degrees
        };
        *accumulated += degrees;
        degrees
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
