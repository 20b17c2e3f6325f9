//! Shader program front end for **ember**.
//!
//! Turns a single `.shader` text file into a linked vertex + fragment pair
//! without touching the GPU. The renderer in `ember-engine` only ever receives
//! a [`LinkedProgram`], so every failure here surfaces as a [`ShaderError`]
//! before any pipeline is created.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`source`] | `ShaderSource`, the `#shader` section splitter |
//! | [`compile`] | per-stage WGSL parse + validation |
//! | [`link`] | stage interface checks, `LinkedProgram` |
//! | [`error`] | `SourceError`, `ShaderError` |
//!
//! # Quick start
//!
//! ```rust
//! use ember_shader::{build_program, AttributeKind, ShaderSource, VertexAttribute};
//!
//! let src = ShaderSource::parse_str("
//! #shader vertex
//! @vertex
//! fn vs_main(@location(0) p: vec2<f32>) -> @builtin(position) vec4<f32> {
//!     return vec4<f32>(p, 0.0, 1.0);
//! }
//! #shader fragment
//! @fragment
//! fn fs_main() -> @location(0) vec4<f32> {
//!     return vec4<f32>(1.0, 0.0, 0.0, 1.0);
//! }
//! ");
//!
//! let attrs = [VertexAttribute::new(0, AttributeKind::Float)];
//! let program = build_program(&src, &attrs).unwrap();
//! assert_eq!(program.vertex_inputs(), &[0]);
//! ```

pub mod compile;
pub mod error;
pub mod link;
pub mod source;
mod stage;

pub use compile::{compile, CompiledStage};
pub use error::{ShaderError, SourceError};
pub use link::{link, AttributeKind, LinkedProgram, VertexAttribute};
pub use source::ShaderSource;
pub use stage::ShaderStage;

/// Compiles both stages of `source` and links them.
///
/// Stops at the first failing step; the vertex stage is compiled first.
pub fn build_program(
    source: &ShaderSource,
    attributes: &[VertexAttribute],
) -> Result<LinkedProgram, ShaderError> {
    let vertex = compile(ShaderStage::Vertex, &source.vertex)?;
    let fragment = compile(ShaderStage::Fragment, &source.fragment)?;
    link(vertex, fragment, attributes)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::{AttributeKind, VertexAttribute};

    pub const POSITION_ATTRIBUTES: [VertexAttribute; 1] =
        [VertexAttribute::new(0, AttributeKind::Float)];

    pub const PASS_THROUGH_VERTEX: &str = "
@vertex
fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 0.0, 1.0);
}
";

    pub const PASS_THROUGH_FRAGMENT: &str = "
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
";
}
