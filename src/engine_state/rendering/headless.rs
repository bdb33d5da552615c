use std::collections::HashMap;

use cgmath::Point3;

use super::{BlockMesh, Material, RenderSurface, Viewpoint};

/// A surface that keeps track of what it was asked to show without drawing.
///
/// Used by the native shell until a GPU surface is attached, and by tests.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    meshes: HashMap<Point3<i32>, Material>,
    frames_presented: u64,
    last_viewpoint: Option<Viewpoint>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn has_mesh(&self, position: Point3<i32>) -> bool {
        self.meshes.contains_key(&position)
    }

    pub fn material_at(&self, position: Point3<i32>) -> Option<Material> {
        self.meshes.get(&position).copied()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_viewpoint(&self) -> Option<&Viewpoint> {
        self.last_viewpoint.as_ref()
    }
}

impl RenderSurface for HeadlessSurface {
    fn mesh_added(&mut self, position: Point3<i32>, mesh: &BlockMesh) {
        self.meshes.insert(position, mesh.material);
    }

    fn mesh_removed(&mut self, position: Point3<i32>) {
        self.meshes.remove(&position);
    }

    fn present(&mut self, viewpoint: &Viewpoint) {
        self.frames_presented += 1;
        self.last_viewpoint = Some(*viewpoint);
        log::trace!(
            "frame {} from ({:.2}, {:.2}, {:.2}) with {} meshes",
            self.frames_presented,
            viewpoint.eye.x,
            viewpoint.eye.y,
            viewpoint.eye.z,
            self.meshes.len()
        );
    }
}
