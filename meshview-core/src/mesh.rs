/// Triangle meshes with painter's-order rendering
use log::trace;
use nalgebra::{Point3, Vector3};
use std::fmt;

use crate::draw::DrawTarget;
use crate::geometry::{Triangle, Vertex};
use crate::projection::Camera;
use crate::shading::Palette;
use crate::transform::Rigid;

/// A 3D mesh composed of independent triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    title: Option<String>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
            title: None,
        }
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Display name taken from the asset's `o` line
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Mean of the triangle centroids, `None` for an empty mesh.
    ///
    /// This is the interactive rotation pivot. It is recomputed from the
    /// current geometry, so it can wander slightly between frames for meshes
    /// whose face centroids are not balanced around one point.
    pub fn centroid(&self) -> Option<Point3<f32>> {
        if self.triangles.is_empty() {
            return None;
        }

        let sum = self
            .triangles
            .iter()
            .fold(Vector3::zeros(), |sum, triangle| sum + triangle.centroid().coords);
        Some(Point3::from(sum / self.triangles.len() as f32))
    }

    /// Triangle indices ordered farthest first by centroid depth.
    ///
    /// The sort is stable, so triangles at equal depth keep mesh order.
    pub fn render_order(&self) -> Vec<usize> {
        let mut depths: Vec<(usize, f32)> = self
            .triangles
            .iter()
            .enumerate()
            .map(|(index, triangle)| (index, triangle.centroid().z))
            .collect();
        depths.sort_by(|a, b| b.1.total_cmp(&a.1));
        depths.into_iter().map(|(index, _)| index).collect()
    }

    /// Draw every camera-facing triangle back to front.
    ///
    /// Returns the number of triangles that survived culling.
    pub fn render<T: DrawTarget + ?Sized>(
        &self,
        camera: &Camera,
        palette: &Palette,
        target: &mut T,
    ) -> usize {
        let mut drawn = 0;
        for index in self.render_order() {
            if self.triangles[index].render(camera, palette, target) {
                drawn += 1;
            }
        }
        trace!("rendered {drawn}/{} triangles", self.triangles.len());
        drawn
    }

    /// Create a cube centred on the origin with outward-facing winding
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let corner = |x: f32, y: f32, z: f32| Vertex::new(x * half, y * half, z * half);
        let mut mesh = Self::with_capacity(12);

        // Front face
        mesh.add_triangle(Triangle::new(corner(-1.0, -1.0, 1.0), corner(1.0, -1.0, 1.0), corner(1.0, 1.0, 1.0)));
        mesh.add_triangle(Triangle::new(corner(-1.0, -1.0, 1.0), corner(1.0, 1.0, 1.0), corner(-1.0, 1.0, 1.0)));

        // Back face
        mesh.add_triangle(Triangle::new(corner(-1.0, -1.0, -1.0), corner(-1.0, 1.0, -1.0), corner(1.0, 1.0, -1.0)));
        mesh.add_triangle(Triangle::new(corner(-1.0, -1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, -1.0, -1.0)));

        // Top face
        mesh.add_triangle(Triangle::new(corner(-1.0, 1.0, -1.0), corner(-1.0, 1.0, 1.0), corner(1.0, 1.0, 1.0)));
        mesh.add_triangle(Triangle::new(corner(-1.0, 1.0, -1.0), corner(1.0, 1.0, 1.0), corner(1.0, 1.0, -1.0)));

        // Bottom face
        mesh.add_triangle(Triangle::new(corner(-1.0, -1.0, -1.0), corner(1.0, -1.0, -1.0), corner(1.0, -1.0, 1.0)));
        mesh.add_triangle(Triangle::new(corner(-1.0, -1.0, -1.0), corner(1.0, -1.0, 1.0), corner(-1.0, -1.0, 1.0)));

        // Right face
        mesh.add_triangle(Triangle::new(corner(1.0, -1.0, -1.0), corner(1.0, 1.0, -1.0), corner(1.0, 1.0, 1.0)));
        mesh.add_triangle(Triangle::new(corner(1.0, -1.0, -1.0), corner(1.0, 1.0, 1.0), corner(1.0, -1.0, 1.0)));

        // Left face
        mesh.add_triangle(Triangle::new(corner(-1.0, -1.0, -1.0), corner(-1.0, -1.0, 1.0), corner(-1.0, 1.0, 1.0)));
        mesh.add_triangle(Triangle::new(corner(-1.0, -1.0, -1.0), corner(-1.0, 1.0, 1.0), corner(-1.0, 1.0, -1.0)));

        mesh
    }
}

impl Rigid for Mesh {
    fn rotate_about_x(&mut self, center_z: f32, center_y: f32, angle: f32) {
        self.triangles.rotate_about_x(center_z, center_y, angle);
    }

    fn rotate_about_y(&mut self, center_x: f32, center_z: f32, angle: f32) {
        self.triangles.rotate_about_y(center_x, center_z, angle);
    }

    fn rotate_about_z(&mut self, center_x: f32, center_y: f32, angle: f32) {
        self.triangles.rotate_about_z(center_x, center_y, angle);
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.triangles.translate(dx, dy, dz);
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mesh:")?;
        for triangle in &self.triangles {
            write!(f, " {triangle}")?;
        }
        Ok(())
    }
}
