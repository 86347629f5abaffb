/// Rigid-body transforms applied in place to camera-space geometry
use nalgebra::{Rotation2, Vector2};

/// In-place rotation about an axis through a pivot, and translation.
///
/// Each rotation keeps one coordinate fixed and turns the other two
/// counter-clockwise by `angle` radians around the pivot given for that pair.
/// Implementors must apply the same motion to every point they own so the
/// shape stays rigid.
pub trait Rigid {
    /// Rotate the (z, y) pair around `(center_z, center_y)` (pitch)
    fn rotate_about_x(&mut self, center_z: f32, center_y: f32, angle: f32);

    /// Rotate the (x, z) pair around `(center_x, center_z)` (yaw)
    fn rotate_about_y(&mut self, center_x: f32, center_z: f32, angle: f32);

    /// Rotate the (x, y) pair around `(center_x, center_y)` (roll)
    fn rotate_about_z(&mut self, center_x: f32, center_y: f32, angle: f32);

    fn translate(&mut self, dx: f32, dy: f32, dz: f32);
}

impl<T: Rigid> Rigid for [T] {
    fn rotate_about_x(&mut self, center_z: f32, center_y: f32, angle: f32) {
        for item in self {
            item.rotate_about_x(center_z, center_y, angle);
        }
    }

    fn rotate_about_y(&mut self, center_x: f32, center_z: f32, angle: f32) {
        for item in self {
            item.rotate_about_y(center_x, center_z, angle);
        }
    }

    fn rotate_about_z(&mut self, center_x: f32, center_y: f32, angle: f32) {
        for item in self {
            item.rotate_about_z(center_x, center_y, angle);
        }
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        for item in self {
            item.translate(dx, dy, dz);
        }
    }
}

/// Rotate the coordinate pair `(a, b)` around `(center_a, center_b)`.
///
/// `a' = (a - ca)cos - (b - cb)sin + ca`, `b' = (a - ca)sin + (b - cb)cos + cb`
pub fn rotate_pair(a: f32, b: f32, center_a: f32, center_b: f32, angle: f32) -> (f32, f32) {
    let rotated = Rotation2::new(angle) * Vector2::new(a - center_a, b - center_b);
    (rotated.x + center_a, rotated.y + center_b)
}
