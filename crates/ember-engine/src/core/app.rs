use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::{FrameCtx, StartCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// Call order: `on_start` once after the window and GPU context exist, then
/// `on_window_event` / `on_frame` until a close request, then `on_exit` once
/// while the GPU context is still alive.
pub trait App {
    /// Called once, before the first frame.
    fn on_start(&mut self, ctx: &mut StartCtx<'_, '_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Called for window events.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once on shutdown. GPU resources owned by the app should be
    /// released here.
    fn on_exit(&mut self) {}
}
