//! ember engine crate.
//!
//! Platform + GPU runtime for the ember demo: window and event loop, wgpu
//! device/surface, the app lifecycle contract, and the triangle renderer.

pub mod core;
pub mod device;
pub mod logging;
pub mod paint;
pub mod render;
pub mod window;

pub use ember_shader as shader;
