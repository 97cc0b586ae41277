use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Interleaved position + texture coordinate.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Half-extent of the quad for a `width`×`height` image: the longer side
/// spans the full `[-1, 1]` range, the shorter one is scaled down.
pub(crate) fn quad_extent(width: u32, height: u32) -> [f32; 2] {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    if h > w {
        [w / h, 1.0]
    } else if w > h {
        [1.0, h / w]
    } else {
        [1.0, 1.0]
    }
}

/// Two counter-clockwise triangles. The top edge samples `v = 0`, so image
/// rows appear in file order.
pub(crate) fn quad_vertices(extent: [f32; 2]) -> [QuadVertex; 6] {
    let [x, y] = extent;
    let bottom_left = QuadVertex {
        position: [-x, -y],
        uv: [0.0, 1.0],
    };
    let bottom_right = QuadVertex {
        position: [x, -y],
        uv: [1.0, 1.0],
    };
    let top_right = QuadVertex {
        position: [x, y],
        uv: [1.0, 0.0],
    };
    let top_left = QuadVertex {
        position: [-x, y],
        uv: [0.0, 0.0],
    };
    [
        bottom_left,
        bottom_right,
        top_right,
        bottom_left,
        top_right,
        top_left,
    ]
}

pub(crate) struct QuadGeometry {
    pub buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl QuadGeometry {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let extent = quad_extent(width, height);
        let vertices = quad_vertices(extent);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        tracing::debug!(
            width,
            height,
            extent_x = extent[0],
            extent_y = extent[1],
            "built quad geometry"
        );
        Self {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}
