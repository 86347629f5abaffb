/// Frame driver: one render phase followed by one input phase
use log::debug;

use crate::config::ViewConfig;
use crate::draw::DrawTarget;
use crate::input::{apply_input, KeyState};
use crate::mesh::Mesh;
use crate::transform::Rigid;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Triangles that survived back-face culling
    pub triangles_drawn: usize,
    /// Whether held keys changed the mesh
    pub moved: bool,
}

/// Owns the mesh and the session configuration.
///
/// Each frame first reads the mesh to draw it, then mutates it from input.
/// Both phases are public so a caller without a live terminal can drive and
/// inspect them separately.
pub struct Viewer {
    mesh: Mesh,
    config: ViewConfig,
    frames: u64,
}

impl Viewer {
    /// Place `mesh` at the configured initial offset
    pub fn new(mut mesh: Mesh, config: ViewConfig) -> Self {
        let [dx, dy, dz] = config.initial_offset;
        mesh.translate(dx, dy, dz);
        debug!(
            "viewer ready: {} triangles, camera {}x{}",
            mesh.len(),
            config.camera.width,
            config.camera.height
        );

        Self {
            mesh,
            config,
            frames: 0,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn title(&self) -> Option<&str> {
        self.mesh.title()
    }

    /// Number of completed frames
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw the mesh in painter's order; returns the visible triangle count
    pub fn render_phase<T: DrawTarget + ?Sized>(&self, target: &mut T) -> usize {
        self.mesh
            .render(&self.config.camera, &self.config.palette, target)
    }

    /// Apply one frame of held keys to the mesh
    pub fn input_phase<K: KeyState + ?Sized>(&mut self, keys: &K) -> bool {
        apply_input(&mut self.mesh, keys, &self.config.controls)
    }

    /// Run both phases in order and count the frame
    pub fn frame<T, K>(&mut self, target: &mut T, keys: &K) -> FrameStats
    where
        T: DrawTarget + ?Sized,
        K: KeyState + ?Sized,
    {
        let triangles_drawn = self.render_phase(target);
        let moved = self.input_phase(keys);
        self.frames += 1;

        FrameStats {
            triangles_drawn,
            moved,
        }
    }
}
