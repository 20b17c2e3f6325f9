//! GPU rendering subsystem.
//!
//! The frame driver records a [`CommandList`] per frame; [`TriangleRenderer`]
//! executes it with wgpu. The renderer owns its GPU resources (vertex buffer,
//! pipeline) and releases them when dropped.
//!
//! Convention:
//! - vertex positions are already in NDC; the vertex stage passes them through.

mod commands;
mod ctx;
mod program;
mod triangle;
pub mod vertex;

pub use commands::{CommandList, FrameCmd};
pub use ctx::{RenderCtx, RenderTarget};
pub use program::GpuProgram;
pub use triangle::TriangleRenderer;
pub use vertex::{Vertex, TRIANGLE, TRIANGLE_VERTEX_COUNT};
