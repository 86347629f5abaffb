/// Headlight shading: a single light source sitting at the camera
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Illumination added on top of the floor for a face seen head-on
pub const DIFFUSE_RANGE: f32 = 155.0;

/// Illumination of a face seen edge-on; there is no other ambient term
pub const AMBIENT_FLOOR: f32 = 100.0;

/// An 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Relative luminance in `[0, 1]`
    pub fn brightness(&self) -> f32 {
        (0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32) / 255.0
    }
}

/// Result of shading a face that survived back-face culling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    /// Unit outward normal of the face
    pub normal: Vector3<f32>,
    /// Cosine between the normal and the direction back to the camera
    pub dot: f32,
    /// Illumination scalar, see [`illumination`]
    pub light: f32,
}

/// Illumination scalar for a face whose normal makes `dot` with the view
/// direction: `|155 * dot| + 100`, so `[100, 255]` for `dot` in `[0, 1]`.
pub fn illumination(dot: f32) -> f32 {
    (DIFFUSE_RANGE * dot).abs() + AMBIENT_FLOOR
}

/// Colours used when drawing a mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Per-channel multiplier applied to the illumination scalar
    pub tint: [f32; 3],
    /// Outline and edge colour
    pub accent: Color,
    /// Vertex marker colour
    pub marker: Color,
    pub outline_width: f32,
    pub marker_radius: f32,
}

impl Palette {
    /// Fill colour for a face lit with `light`
    pub fn fill_color(&self, light: f32) -> Color {
        let channel = |tint: f32| (light * tint).round().clamp(0.0, 255.0) as u8;
        Color::new(channel(self.tint[0]), channel(self.tint[1]), channel(self.tint[2]))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            tint: [1.0, 1.0, 1.0],
            accent: Color::GREEN,
            marker: Color::RED,
            outline_width: 2.0,
            marker_radius: 10.0,
        }
    }
}
