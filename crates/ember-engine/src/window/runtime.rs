use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, StartCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};

use super::RuntimeError;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ember".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Entry point for the runtime.
///
/// Drives a single window: create window + GPU context, start the app,
/// redraw continuously, shut down on close.
pub struct Runtime;

impl Runtime {
    /// Runs `app` until its window is closed or it returns `AppControl::Exit`.
    ///
    /// Returns an error if the event loop, the window, or the GPU context
    /// cannot be created. The event loop is torn down before returning.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<(), RuntimeError>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new()?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop.run_app(&mut state)?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    frame_index: u64,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    started: bool,
    fatal: Option<RuntimeError>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            started: false,
            fatal: None,
        }
    }

    fn create_window_entry(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<WindowEntry, RuntimeError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .map_err(RuntimeError::CreateWindow)?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            frame_index: 0,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .map_err(RuntimeError::Gpu)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RuntimeError) {
        log::error!("{err}");
        self.fatal = Some(err);
        self.shutdown(event_loop);
    }

    /// Runs `on_exit` (once, if started), then drops the GPU context and window.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            self.started = false;
            self.app.on_exit();
        }
        if let Some(entry) = self.window.take() {
            let frames = entry.borrow_frame_index();
            log::info!("window closed after {frames} frame(s)");
        }
        event_loop.exit();
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) {
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else { return };

        let control = entry.with_mut(|fields| {
            let mut ctx = StartCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
            };
            app.on_start(&mut ctx)
        });

        self.started = true;

        if control == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        entry.with_window(|w| w.request_redraw());
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let (app, window) = (&mut self.app, &mut self.window);
        let Some(entry) = window.as_mut() else { return };

        // Drive one frame for this window.
        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: window_id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                frame_index: *fields.frame_index,
            };
            let control = app.on_frame(&mut ctx);
            *fields.frame_index = fields.frame_index.wrapping_add(1);
            control
        });

        if control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.fatal.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => self.window = Some(entry),
            Err(err) => {
                self.fail(event_loop, err);
                return;
            }
        }

        self.start(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; no frame pacing beyond the present mode.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        // Covers exits not initiated through `shutdown` (e.g. platform quit).
        if self.started || self.window.is_some() {
            self.shutdown(event_loop);
        }
    }
}
