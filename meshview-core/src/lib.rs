/// meshview core library - camera-space geometry and the viewer frame pipeline
///
/// This library holds everything that does not touch a terminal or window:
/// the vertex/edge/triangle/mesh types and their rigid transforms, pinhole
/// projection, headlight shading, painter's-order rendering into a
/// `DrawTarget`, OBJ asset parsing, keyboard mapping and configuration.

pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod input;
pub mod mesh;
pub mod obj;
pub mod projection;
pub mod shading;
pub mod transform;
pub mod viewer;

// Re-export commonly used types
pub use config::ViewConfig;
pub use draw::{DrawCommand, DrawList, DrawTarget};
pub use error::{ConfigError, Error, ParseError, ParseErrorKind};
pub use geometry::{Edge, Triangle, Vertex};
pub use input::{Controls, HeldKeys, Key, KeyState};
pub use mesh::Mesh;
pub use projection::Camera;
pub use shading::{Color, Palette, Shade};
pub use transform::Rigid;
pub use viewer::{FrameStats, Viewer};
