//! Triangle vertex data and its buffer layout.

use bytemuck::{Pod, Zeroable};

use ember_shader::{AttributeKind, VertexAttribute};

/// 2D position in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
}

impl Vertex {
    /// Shader location the position attribute is bound to.
    pub const POSITION_LOCATION: u32 = 0;

    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    /// One attribute, two `f32` components, tightly packed, offset 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Attributes provided by [`layout`](Self::layout), as the shader linker
    /// sees them.
    pub fn attributes() -> Vec<VertexAttribute> {
        Self::ATTRS
            .iter()
            .map(|a| VertexAttribute::new(a.shader_location, attribute_kind(a.format)))
            .collect()
    }
}

/// Scalar class a vertex format is read as in the shader.
fn attribute_kind(format: wgpu::VertexFormat) -> AttributeKind {
    use wgpu::VertexFormat as F;

    match format {
        F::Uint8
        | F::Uint8x2
        | F::Uint8x4
        | F::Uint16
        | F::Uint16x2
        | F::Uint16x4
        | F::Uint32
        | F::Uint32x2
        | F::Uint32x3
        | F::Uint32x4 => AttributeKind::Uint,
        F::Sint8
        | F::Sint8x2
        | F::Sint8x4
        | F::Sint16
        | F::Sint16x2
        | F::Sint16x4
        | F::Sint32
        | F::Sint32x2
        | F::Sint32x3
        | F::Sint32x4 => AttributeKind::Sint,
        F::Float64 | F::Float64x2 | F::Float64x3 | F::Float64x4 => AttributeKind::Float64,
        // Float, half, and (s|u)norm formats.
        _ => AttributeKind::Float,
    }
}

/// The demo triangle, counter-clockwise: bottom-left, bottom-right, top.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex { pos: [-0.5, -0.5] },
    Vertex { pos: [0.5, -0.5] },
    Vertex { pos: [0.0, 0.5] },
];

/// Number of vertices drawn per frame.
pub const TRIANGLE_VERTEX_COUNT: u32 = TRIANGLE.len() as u32;
