/// Geometry primitives for camera-space rendering
use nalgebra::{Point2, Point3, Vector3};
use std::fmt;

use crate::draw::DrawTarget;
use crate::projection::Camera;
use crate::shading::{illumination, Palette, Shade};
use crate::transform::{rotate_pair, Rigid};

/// A point in camera space.
///
/// Vertices are plain values: every edge or triangle owns its own copies, so
/// moving one corner never drags a neighbour along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }

    pub fn project(&self, camera: &Camera) -> Point2<f32> {
        camera.project(&self.position)
    }

    /// Draw a marker at the projected position
    pub fn render<T: DrawTarget + ?Sized>(&self, camera: &Camera, palette: &Palette, target: &mut T) {
        target.marker(self.project(camera), palette.marker_radius, palette.marker);
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(position: Point3<f32>) -> Self {
        Self { position }
    }
}

impl Rigid for Vertex {
    fn rotate_about_x(&mut self, center_z: f32, center_y: f32, angle: f32) {
        let p = &mut self.position;
        (p.z, p.y) = rotate_pair(p.z, p.y, center_z, center_y, angle);
    }

    fn rotate_about_y(&mut self, center_x: f32, center_z: f32, angle: f32) {
        let p = &mut self.position;
        (p.x, p.z) = rotate_pair(p.x, p.z, center_x, center_z, angle);
    }

    fn rotate_about_z(&mut self, center_x: f32, center_y: f32, angle: f32) {
        let p = &mut self.position;
        (p.x, p.y) = rotate_pair(p.x, p.y, center_x, center_y, angle);
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position += Vector3::new(dx, dy, dz);
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.position;
        write!(f, "({},{},{})", p.x, p.y, p.z)
    }
}

/// A line segment between two owned vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub vertices: [Vertex; 2],
}

impl Edge {
    pub fn new(start: Vertex, end: Vertex) -> Self {
        Self {
            vertices: [start, end],
        }
    }

    pub fn render<T: DrawTarget + ?Sized>(&self, camera: &Camera, palette: &Palette, target: &mut T) {
        let [start, end] = &self.vertices;
        target.line(
            start.project(camera),
            end.project(camera),
            palette.accent,
            palette.outline_width,
        );
    }
}

impl Rigid for Edge {
    fn rotate_about_x(&mut self, center_z: f32, center_y: f32, angle: f32) {
        self.vertices.rotate_about_x(center_z, center_y, angle);
    }

    fn rotate_about_y(&mut self, center_x: f32, center_z: f32, angle: f32) {
        self.vertices.rotate_about_y(center_x, center_z, angle);
    }

    fn rotate_about_z(&mut self, center_x: f32, center_y: f32, angle: f32) {
        self.vertices.rotate_about_z(center_x, center_y, angle);
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.vertices.translate(dx, dy, dz);
    }
}

/// A triangle face defined by three vertices in winding order
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unit face normal, `(v1 - v0) x (v2 - v0)` normalised.
    ///
    /// The direction follows the winding order. Zero-area triangles give a
    /// NaN normal.
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }

    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.position.coords + b.position.coords + c.position.coords) / 3.0)
    }

    /// Shade the face for the headlight at the camera.
    ///
    /// Returns `None` when the face points away from the camera (or its
    /// normal is undefined), in which case it must not be drawn.
    pub fn shade(&self, camera: &Camera) -> Option<Shade> {
        let normal = self.calculate_normal();
        let view = camera.view_direction(&self.centroid());
        let dot = normal.dot(&view);

        (dot >= 0.0).then(|| Shade {
            normal,
            dot,
            light: illumination(dot),
        })
    }

    pub fn screen_points(&self, camera: &Camera) -> [Point2<f32>; 3] {
        self.vertices.map(|vertex| vertex.project(camera))
    }

    /// Fill and outline the projected face if it faces the camera.
    ///
    /// Returns whether anything was drawn.
    pub fn render<T: DrawTarget + ?Sized>(
        &self,
        camera: &Camera,
        palette: &Palette,
        target: &mut T,
    ) -> bool {
        let Some(shade) = self.shade(camera) else {
            return false;
        };

        let points = self.screen_points(camera);
        target.fill_polygon(&points, palette.fill_color(shade.light));
        target.outline_polygon(&points, palette.accent, palette.outline_width);
        true
    }
}

impl Rigid for Triangle {
    fn rotate_about_x(&mut self, center_z: f32, center_y: f32, angle: f32) {
        self.vertices.rotate_about_x(center_z, center_y, angle);
    }

    fn rotate_about_y(&mut self, center_x: f32, center_z: f32, angle: f32) {
        self.vertices.rotate_about_y(center_x, center_z, angle);
    }

    fn rotate_about_z(&mut self, center_x: f32, center_y: f32, angle: f32) {
        self.vertices.rotate_about_z(center_x, center_y, angle);
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.vertices.translate(dx, dy, dz);
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.vertices;
        write!(f, "T[{a},{b},{c}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, DrawList};
    use crate::shading::Color;
    use approx::assert_abs_diff_eq;

    fn distances(triangle: &Triangle) -> [f32; 3] {
        let [a, b, c] = triangle.vertices.map(|v| v.position);
        [(b - a).norm(), (c - b).norm(), (a - c).norm()]
    }

    /// Counter-clockwise as seen from the camera: normal points at the origin
    fn facing_camera(z: f32) -> Triangle {
        Triangle::new(
            Vertex::new(0.0, 0.0, z),
            Vertex::new(0.0, 1.0, z),
            Vertex::new(1.0, 0.0, z),
        )
    }

    #[test]
    fn test_vertex_rotations_invert() {
        let original = Vertex::new(1.5, -2.0, 7.0);
        let angle = 0.7;

        let mut v = original;
        v.rotate_about_x(5.0, 1.0, angle);
        v.rotate_about_x(5.0, 1.0, -angle);
        assert_abs_diff_eq!(v.position, original.position, epsilon = 1e-5);

        let mut v = original;
        v.rotate_about_y(-3.0, 4.0, angle);
        v.rotate_about_y(-3.0, 4.0, -angle);
        assert_abs_diff_eq!(v.position, original.position, epsilon = 1e-5);

        let mut v = original;
        v.rotate_about_z(0.5, 0.5, angle);
        v.rotate_about_z(0.5, 0.5, -angle);
        assert_abs_diff_eq!(v.position, original.position, epsilon = 1e-5);
    }

    #[test]
    fn test_vertex_rotation_keeps_fixed_axis() {
        let mut v = Vertex::new(1.0, 2.0, 3.0);
        v.rotate_about_x(0.0, 0.0, 1.0);
        assert_eq!(v.position.x, 1.0);

        let mut v = Vertex::new(1.0, 2.0, 3.0);
        v.rotate_about_y(0.0, 0.0, 1.0);
        assert_eq!(v.position.y, 2.0);

        let mut v = Vertex::new(1.0, 2.0, 3.0);
        v.rotate_about_z(0.0, 0.0, 1.0);
        assert_eq!(v.position.z, 3.0);
    }

    #[test]
    fn test_vertex_rotate_about_z_quarter_turn() {
        let mut v = Vertex::new(2.0, 1.0, 9.0);
        v.rotate_about_z(1.0, 1.0, std::f32::consts::FRAC_PI_2);
        assert_abs_diff_eq!(v.position, Point3::new(1.0, 2.0, 9.0), epsilon = 1e-6);
    }

    #[test]
    fn test_vertex_translate() {
        let mut v = Vertex::new(1.0, 2.0, 3.0);
        v.translate(0.5, -2.0, 10.0);
        assert_eq!(v.position, Point3::new(1.5, 0.0, 13.0));
    }

    #[test]
    fn test_vertex_display() {
        assert_eq!(Vertex::new(1.0, -2.5, 3.0).to_string(), "(1,-2.5,3)");
    }

    #[test]
    fn test_vertex_render_draws_marker() {
        let mut list = DrawList::new();
        Vertex::new(0.0, 0.0, 10.0).render(&Camera::default(), &Palette::default(), &mut list);

        match &list.commands()[0] {
            DrawCommand::Marker { center, color, .. } => {
                assert_abs_diff_eq!(center.x, 500.0, epsilon = 1e-3);
                assert_eq!(*color, Color::RED);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_edge_transforms_both_ends() {
        let mut edge = Edge::new(Vertex::new(0.0, 0.0, 0.0), Vertex::new(1.0, 0.0, 0.0));
        edge.translate(0.0, 0.0, 5.0);
        edge.rotate_about_y(0.0, 5.0, std::f32::consts::PI);

        assert_abs_diff_eq!(edge.vertices[0].position, Point3::new(0.0, 0.0, 5.0), epsilon = 1e-6);
        assert_abs_diff_eq!(edge.vertices[1].position, Point3::new(-1.0, 0.0, 5.0), epsilon = 1e-6);
    }

    #[test]
    fn test_edge_render_draws_line() {
        let edge = Edge::new(Vertex::new(0.0, 0.0, 10.0), Vertex::new(1.0, 0.0, 10.0));
        let mut list = DrawList::new();
        edge.render(&Camera::default(), &Palette::default(), &mut list);

        match &list.commands()[0] {
            DrawCommand::Line { from, to, color, width } => {
                assert_abs_diff_eq!(from.x, 500.0, epsilon = 1e-3);
                assert_abs_diff_eq!(to.x, 600.0, epsilon = 1e-3);
                assert_eq!(*color, Color::GREEN);
                assert_eq!(*width, 2.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_normal_follows_winding() {
        let triangle = facing_camera(5.0);
        assert_abs_diff_eq!(triangle.calculate_normal(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);

        let [a, b, c] = triangle.vertices;
        let flipped = Triangle::new(a, c, b);
        assert_abs_diff_eq!(flipped.calculate_normal(), Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_normal_is_nan() {
        let triangle = Triangle::new(
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(1.0, 1.0, 1.0),
            Vertex::new(2.0, 2.0, 1.0),
        );
        assert!(triangle.calculate_normal().iter().all(|c| c.is_nan()));
        assert!(triangle.shade(&Camera::default()).is_none());
    }

    #[test]
    fn test_centroid() {
        let triangle = Triangle::new(
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(3.0, 0.0, 3.0),
            Vertex::new(0.0, 6.0, 6.0),
        );
        assert_abs_diff_eq!(triangle.centroid(), Point3::new(1.0, 2.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rigid_under_rotation_and_translation() {
        let mut triangle = Triangle::new(
            Vertex::new(0.3, -1.0, 4.0),
            Vertex::new(2.0, 0.5, 6.0),
            Vertex::new(-1.0, 1.0, 5.5),
        );
        let before = distances(&triangle);

        triangle.rotate_about_x(5.0, 0.0, 0.9);
        triangle.rotate_about_y(0.5, 5.0, -1.3);
        triangle.rotate_about_z(-2.0, 1.0, 2.1);
        let rotated = distances(&triangle);
        for (b, r) in before.iter().zip(rotated) {
            assert_abs_diff_eq!(*b, r, epsilon = 1e-4);
        }

        triangle.translate(1.0, 2.0, 3.0);
        for (r, t) in rotated.iter().zip(distances(&triangle)) {
            assert_abs_diff_eq!(*r, t, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_vertices_are_independent_copies() {
        let shared = Vertex::new(1.0, 1.0, 1.0);
        let mut first = Triangle::new(shared, Vertex::new(0.0, 0.0, 1.0), Vertex::new(1.0, 0.0, 1.0));
        let second = Triangle::new(shared, Vertex::new(0.0, 1.0, 1.0), Vertex::new(0.0, 0.0, 1.0));

        first.translate(5.0, 5.0, 5.0);
        assert_eq!(second.vertices[0], shared);
    }

    #[test]
    fn test_shade_facing_camera() {
        let shade = facing_camera(10.0).shade(&Camera::default()).unwrap();
        assert!(shade.dot > 0.9);
        assert!((100.0..=255.0).contains(&shade.light));
    }

    #[test]
    fn test_head_on_face_is_fully_lit() {
        // Centroid exactly on the z axis
        let triangle = Triangle::new(
            Vertex::new(-1.0, -1.0, 10.0),
            Vertex::new(0.0, 2.0, 10.0),
            Vertex::new(1.0, -1.0, 10.0),
        );
        let shade = triangle.shade(&Camera::default()).unwrap();
        assert_abs_diff_eq!(shade.dot, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(shade.light, 255.0, epsilon = 1e-3);
    }

    #[test]
    fn test_edge_on_face_is_drawn_at_floor_light() {
        // Normal is +x, perpendicular to the view direction
        let triangle = Triangle::new(
            Vertex::new(0.0, 0.0, 5.0),
            Vertex::new(0.0, 1.0, 5.0),
            Vertex::new(0.0, 0.0, 10.0),
        );
        let camera = Camera::default();
        let palette = Palette::default();

        let shade = triangle.shade(&camera).unwrap();
        assert_eq!(shade.dot, 0.0);
        assert_eq!(shade.light, 100.0);

        let mut list = DrawList::new();
        assert!(triangle.render(&camera, &palette, &mut list));
        assert_eq!(list.len(), 2);
        assert!(matches!(
            list.commands()[0],
            DrawCommand::FillPolygon { color, .. } if color == Color::new(100, 100, 100)
        ));
        assert!(matches!(list.commands()[1], DrawCommand::OutlinePolygon { .. }));
    }

    #[test]
    fn test_back_face_is_culled() {
        let [a, b, c] = facing_camera(10.0).vertices;
        let away = Triangle::new(a, c, b);
        assert!(away.shade(&Camera::default()).is_none());

        let mut list = DrawList::new();
        assert!(!away.render(&Camera::default(), &Palette::default(), &mut list));
        assert!(list.is_empty());
    }

    #[test]
    fn test_render_fills_then_outlines() {
        let triangle = facing_camera(10.0);
        let camera = Camera::default();
        let palette = Palette::default();
        let mut list = DrawList::new();

        assert!(triangle.render(&camera, &palette, &mut list));
        assert_eq!(list.len(), 2);

        let expected = triangle.screen_points(&camera).to_vec();
        let light = triangle.shade(&camera).unwrap().light;
        assert_eq!(
            list.commands()[0],
            DrawCommand::FillPolygon {
                points: expected.clone(),
                color: palette.fill_color(light),
            }
        );
        assert_eq!(
            list.commands()[1],
            DrawCommand::OutlinePolygon {
                points: expected,
                color: Color::GREEN,
                width: 2.0,
            }
        );
    }

    #[test]
    fn test_triangle_display() {
        let triangle = Triangle::new(
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(1.0, 0.0, 1.0),
            Vertex::new(0.0, 1.0, 1.0),
        );
        assert_eq!(triangle.to_string(), "T[(0,0,1),(1,0,1),(0,1,1)]");
    }
}
