/// Keyboard state and its mapping onto mesh transforms
use log::trace;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::mesh::Mesh;
use crate::transform::Rigid;

/// Keys the viewer responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    W,
    A,
    S,
    D,
    Q,
    E,
}

/// Snapshot of which keys are currently held down
pub trait KeyState {
    fn is_pressed(&self, key: Key) -> bool;
}

/// A plain set of held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: HashSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyState for HeldKeys {
    fn is_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }
}

impl FromIterator<Key> for HeldKeys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// One per-frame step taken while a key is held
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Pitch through the mesh centroid, signed in units of the rotation speed
    RotateX(f32),
    /// Yaw through the mesh centroid
    RotateY(f32),
    /// Roll through the mesh centroid
    RotateZ(f32),
    /// Move along a unit axis, in units of the move speed
    Translate([f32; 3]),
}

/// Key bindings in the order they are applied within a frame
pub const BINDINGS: [(Key, Action); 12] = [
    (Key::Up, Action::RotateX(1.0)),
    (Key::Down, Action::RotateX(-1.0)),
    (Key::Left, Action::RotateY(-1.0)),
    (Key::Right, Action::RotateY(1.0)),
    (Key::PageUp, Action::RotateZ(1.0)),
    (Key::PageDown, Action::RotateZ(-1.0)),
    (Key::E, Action::Translate([0.0, -1.0, 0.0])),
    (Key::Q, Action::Translate([0.0, 1.0, 0.0])),
    (Key::D, Action::Translate([-1.0, 0.0, 0.0])),
    (Key::A, Action::Translate([1.0, 0.0, 0.0])),
    (Key::W, Action::Translate([0.0, 0.0, -1.0])),
    (Key::S, Action::Translate([0.0, 0.0, 1.0])),
];

/// Per-frame step sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Radians per frame
    pub rotation_speed: f32,
    /// Camera-space units per frame
    pub move_speed: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            rotation_speed: 0.002,
            move_speed: 0.005,
        }
    }
}

/// Apply one frame of held-key input to `mesh`.
///
/// Rotations pivot on the mesh centroid sampled once before any binding is
/// applied. Returns whether any binding fired.
pub fn apply_input<K: KeyState + ?Sized>(mesh: &mut Mesh, keys: &K, controls: &Controls) -> bool {
    let Some(center) = mesh.centroid() else {
        return false;
    };

    let mut fired = false;
    for (key, action) in BINDINGS {
        if !keys.is_pressed(key) {
            continue;
        }

        trace!("{key:?} -> {action:?}");
        match action {
            Action::RotateX(sign) => mesh.rotate_about_x(center.z, center.y, sign * controls.rotation_speed),
            Action::RotateY(sign) => mesh.rotate_about_y(center.x, center.z, sign * controls.rotation_speed),
            Action::RotateZ(sign) => mesh.rotate_about_z(center.x, center.y, sign * controls.rotation_speed),
            Action::Translate(axis) => {
                let step = Vector3::from(axis) * controls.move_speed;
                mesh.translate(step.x, step.y, step.z);
            }
        }
        fired = true;
    }
    fired
}
