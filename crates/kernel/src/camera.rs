use glam::{Quat, Vec2, Vec3};

use cadence_input::{InputState, Key};

const MAX_PITCH: f32 = 1.54;

/// First-person camera steered with WASD, Space/Shift and mouse look.
///
/// Input only records intent; the camera moves in [`update`](Self::update)
/// so motion advances in the same fixed steps as the rest of the world.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    /// Radians around +Y.
    pub yaw: f32,
    /// Radians, clamped just short of straight up or down.
    pub pitch: f32,
    /// Units per second.
    pub speed: f32,
    /// Radians per pixel of mouse motion.
    pub sensitivity: f32,
    intent: Vec3,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 10.0),
            yaw: 0.0,
            pitch: 0.0,
            speed: 4.0,
            sensitivity: 0.0025,
            intent: Vec3::ZERO,
        }
    }
}

impl FlyCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Looking direction. Yaw 0 looks down -Z.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn handle_input(&mut self, input: &InputState) {
        let kb = &input.keyboard;
        let axis = |pos: Key, neg: Key| {
            f32::from(u8::from(kb.is_down(pos))) - f32::from(u8::from(kb.is_down(neg)))
        };
        self.intent = Vec3::new(
            axis(Key::D, Key::A),
            axis(Key::Space, Key::ShiftLeft),
            axis(Key::S, Key::W),
        );

        if input.cursor.is_captured() {
            self.look(input.cursor.delta());
        }
    }

    fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch = (self.pitch - delta.y * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move along the current intent for `step` seconds. Vertical motion is
    /// in world space, horizontal motion follows yaw only.
    pub fn update(&mut self, step: f32) {
        let planar = Quat::from_rotation_y(self.yaw) * Vec3::new(self.intent.x, 0.0, self.intent.z);
        let motion = planar + Vec3::Y * self.intent.y;
        self.position += motion.normalize_or_zero() * self.speed * step;
    }
}
