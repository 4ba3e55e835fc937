//! The N×N point lattice that carries the height field.
//!
//! Vertices hold only a 2-D base position (z = 0); elevation is applied in
//! the vertex shader from the sampled image intensity. The lattice is built
//! on the CPU once, uploaded once, and never updated or resized.

use bytemuck::{Pod, Zeroable};

/// A single lattice vertex: base position with z = 0.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LatticeVertex {
    pub position: [f32; 3],
}

impl LatticeVertex {
    /// Get the vertex buffer layout for this vertex type.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LatticeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Build the n×n lattice centered on the origin.
///
/// Produces exactly `n²` vertices at `(col - n/2, row - n/2, 0)` for
/// `row, col ∈ [0, n)`, in row-major order. The order is irrelevant for
/// point rendering but stable for reproducibility.
pub fn build(n: u32) -> Vec<LatticeVertex> {
    let half = n as f32 / 2.0;
    let mut vertices = Vec::with_capacity((n * n) as usize);
    for row in 0..n {
        for col in 0..n {
            vertices.push(LatticeVertex {
                position: [col as f32 - half, row as f32 - half, 0.0],
            });
        }
    }
    vertices
}

/// Map a lattice coordinate into normalized texture space.
///
/// `(p + dim/2) / dim`, in `[0, 1]` for `p ∈ [-dim/2, dim/2)`. This is the
/// same mapping the vertex shader applies per component.
pub fn texture_lookup(p: f32, dim: f32) -> f32 {
    (p + dim / 2.0) / dim
}

/// GPU-resident vertex buffer over the lattice points.
pub struct LatticeBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl LatticeBuffer {
    /// Upload lattice vertices to a GPU vertex buffer.
    pub fn upload(device: &wgpu::Device, label: &str, vertices: &[LatticeVertex]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    /// Make this buffer the source for the position attribute.
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
    }

    /// Issue a point draw for all lattice vertices.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::create_test_device_queue;

    #[test]
    fn test_build_produces_n_squared_vertices() {
        for n in [1, 4, 10, 100] {
            assert_eq!(build(n).len(), (n * n) as usize, "n = {n}");
        }
    }

    #[test]
    fn test_vertex_positions_centered() {
        let n = 4u32;
        let vertices = build(n);
        for row in 0..n {
            for col in 0..n {
                let v = vertices[(row * n + col) as usize];
                assert_eq!(
                    v.position,
                    [col as f32 - 2.0, row as f32 - 2.0, 0.0],
                    "row={row}, col={col}"
                );
            }
        }
    }

    #[test]
    fn test_reference_lattice_corners() {
        // The 100×100 reference lattice spans [-50, 49] on both axes.
        let vertices = build(100);
        assert_eq!(vertices.first().unwrap().position, [-50.0, -50.0, 0.0]);
        assert_eq!(vertices.last().unwrap().position, [49.0, 49.0, 0.0]);
    }

    #[test]
    fn test_row_major_order_is_stable() {
        let vertices = build(3);
        // Second vertex advances along the column axis, not the row axis.
        assert_eq!(vertices[1].position[0], vertices[0].position[0] + 1.0);
        assert_eq!(vertices[1].position[1], vertices[0].position[1]);
    }

    #[test]
    fn test_texture_lookup_stays_normalized() {
        let w = 100.0;
        let mut p = -w / 2.0;
        while p < w / 2.0 {
            let u = texture_lookup(p, w);
            assert!((0.0..=1.0).contains(&u), "lookup({p}) = {u}");
            p += 0.5;
        }
        assert_eq!(texture_lookup(-w / 2.0, w), 0.0);
        assert_eq!(texture_lookup(0.0, w), 0.5);
    }

    #[test]
    fn test_vertex_layout_single_position_attribute() {
        let layout = LatticeVertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn test_upload_sets_vertex_count() {
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let lattice = LatticeBuffer::upload(&device, "test-lattice", &build(10));
        assert_eq!(lattice.vertex_count, 100);
    }
}
