use std::path::PathBuf;

use winit::dpi::LogicalSize;

use ember_engine::device::GpuInit;
use ember_engine::paint::Color;
use ember_engine::window::RuntimeConfig;

/// Shader file, relative to the working directory.
pub const SHADER_PATH: &str = "res/shaders/basic.shader";

/// Demo settings. Fixed at build time; there are no CLI flags.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub shader_path: PathBuf,
    pub clear_color: Color,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "Hello World".to_string(),
            width: 640.0,
            height: 480.0,
            shader_path: PathBuf::from(SHADER_PATH),
            clear_color: Color::BLACK,
        }
    }
}

impl DemoConfig {
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        }
    }

    pub fn gpu(&self) -> GpuInit {
        GpuInit::default()
    }
}
