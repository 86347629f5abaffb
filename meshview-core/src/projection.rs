/// Pinhole camera and screen projection
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Fixed pinhole camera at the origin looking along +z.
///
/// Screen coordinates are in a virtual `width` x `height` raster with the
/// origin in the top-left corner and y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Viewer distance from the image plane
    pub distance: f32,
    /// Horizontal field-of-view scale
    pub fov_x: f32,
    /// Vertical field-of-view scale
    pub fov_y: f32,
    pub width: u32,
    pub height: u32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            distance: 1.0,
            fov_x: 1.0,
            fov_y: 1.0,
            width,
            height,
        }
    }

    /// Project a camera-space point to screen space.
    ///
    /// Points on the camera plane (`z == 0`) yield non-finite coordinates;
    /// callers that care must keep geometry in front of the camera.
    pub fn project(&self, point: &Point3<f32>) -> Point2<f32> {
        let x = (point.x / point.z * self.distance + self.fov_x / 2.0) * self.width as f32
            / self.fov_x;
        let y = -(point.y / point.z * self.distance - self.fov_y / 2.0) * self.height as f32
            / self.fov_y;
        Point2::new(x, y)
    }

    /// Unit direction from `target` back towards the camera
    pub fn view_direction(&self, target: &Point3<f32>) -> Vector3<f32> {
        -target.coords.normalize()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1000, 1000)
    }
}
