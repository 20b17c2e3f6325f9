//! Color model shared by the frame driver and the renderer.

pub mod color;

pub use color::Color;
