use std::path::Path;

use anyhow::Result;
use winit::event::WindowEvent;
use winit::window::WindowId;

use ember_engine::core::{App, AppControl, FrameCtx, StartCtx};
use ember_engine::render::{CommandList, TriangleRenderer, Vertex, TRIANGLE_VERTEX_COUNT};
use ember_shader::{build_program, LinkedProgram, ShaderSource};

use crate::config::DemoConfig;
use crate::driver::{FrameDriver, Phase};

/// The demo application: one triangle, one program, drawn every frame.
pub struct TriangleApp {
    config: DemoConfig,
    driver: FrameDriver,
    renderer: Option<TriangleRenderer>,
    commands: CommandList,
}

impl TriangleApp {
    pub fn new(config: DemoConfig) -> Self {
        let driver = FrameDriver::new(config.clear_color, TRIANGLE_VERTEX_COUNT);
        Self {
            config,
            driver,
            renderer: None,
            commands: CommandList::new(),
        }
    }
}

impl App for TriangleApp {
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> AppControl {
        let info = ctx.gpu.adapter_info();
        println!("{}", ctx.gpu.version_string());
        log::info!(
            "adapter type {:?}, surface format {:?}",
            info.device_type,
            ctx.gpu.surface_format()
        );

        let rctx = ctx.render_ctx();
        let mut renderer = TriangleRenderer::new(rctx.device);

        let built = load_program(&self.config.shader_path)
            .and_then(|program| renderer.use_program(&rctx, &program));
        if let Err(e) = built {
            // Shown next to the shader texts; also logged.
            println!("{e:#}");
            log::error!("{e:#}");
        }

        self.driver.start(renderer.has_program());
        self.renderer = Some(renderer);
        AppControl::Continue
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if matches!(event, WindowEvent::CloseRequested) {
            self.driver.close();
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.driver.record_frame(&mut self.commands) == AppControl::Exit {
            return AppControl::Exit;
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };

        let commands = &self.commands;
        ctx.render(|_, target| renderer.execute(target, commands))
    }

    fn on_exit(&mut self) {
        self.driver.close();
        debug_assert_eq!(self.driver.phase(), Phase::Terminated);

        // Drops the pipeline, then the vertex buffer.
        if self.renderer.take().is_some() {
            log::debug!("released GPU resources after {} frame(s)", self.driver.frames());
        }
    }
}

/// Loads the shader file, echoes both stage texts to stdout, and builds the
/// program against the triangle's vertex layout.
fn load_program(path: &Path) -> Result<LinkedProgram> {
    let source = ShaderSource::load(path)?;

    println!("{}", source.vertex);
    println!("{}", source.fragment);

    let program = build_program(&source, &Vertex::attributes())?;
    log::info!("shader program ready ({})", path.display());
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, text: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("ember-demo-{}-{name}", std::process::id()));
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn bundled_shader_file_builds() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../")
            .join(crate::config::SHADER_PATH);
        let program = load_program(&path).unwrap();
        assert_eq!(program.vertex_inputs(), &[Vertex::POSITION_LOCATION]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_program(Path::new("no/such/file.shader")).unwrap_err();
        assert!(format!("{err:#}").contains("file.shader"));
    }

    #[test]
    fn compile_error_names_the_stage() {
        let path = write_temp(
            "broken.shader",
            "#shader vertex\n@vertex fn vs_main( {\n#shader fragment\n@fragment fn fs_main() {}\n",
        );
        let err = load_program(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{err:#}").contains("vertex"));
    }

    #[test]
    fn type_mismatch_is_a_link_error() {
        let path = write_temp(
            "mismatch.shader",
            "#shader vertex\n\
             @vertex fn vs_main(@location(0) p: vec2<i32>) -> @builtin(position) vec4<f32> {\n\
                 return vec4<f32>(vec2<f32>(p), 0.0, 1.0);\n\
             }\n\
             #shader fragment\n\
             @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }\n",
        );
        let err = load_program(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{err:#}").contains("failed to link"));
    }

    #[test]
    fn close_before_first_frame_exits_zero() {
        let mut app = TriangleApp::new(DemoConfig::default());

        let control = app.on_window_event(WindowId::dummy(), &WindowEvent::CloseRequested);
        assert_eq!(control, AppControl::Continue);
        app.on_exit();

        assert_eq!(app.driver.phase(), Phase::Terminated);
        assert_eq!(app.driver.frames(), 0);
        assert!(app.renderer.is_none());

        // The runtime returns `Ok` after a clean close.
        assert_eq!(crate::exit_code(&Ok(())), 0);
    }

    #[test]
    fn new_app_has_not_started() {
        let app = TriangleApp::new(DemoConfig::default());
        assert_eq!(app.driver.phase(), Phase::Uninitialized);
        assert!(app.renderer.is_none());
    }
}
