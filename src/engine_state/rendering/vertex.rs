//! Vertex data structures for block meshes.
//!
//! Vertices are plain old data so a renderer can hand a mesh's vertex slice
//! straight to its upload path with `bytemuck::cast_slice`.

/// A vertex of a block mesh.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes), relative to the mesh center
/// - Texture Index: u32 (4 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 24 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the owning mesh's center
    pub position: [f32; 3],
    /// Index of the texture in the texture array
    pub texture_index: u32,
    /// UV texture coordinates (normalized 0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - Position relative to the mesh center
    /// * `texture_index` - Index of the texture in the texture array
    /// * `u`, `v` - Texture coordinates
    pub fn new(position: [f32; 3], texture_index: usize, u: f32, v: f32) -> Self {
        Vertex {
            position,
            texture_index: texture_index as u32,
            tex_coords: [u, v],
        }
    }
}
