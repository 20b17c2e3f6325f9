use std::fmt;

/// Fatal runtime failure, surfaced from [`Runtime::run`](super::Runtime::run).
#[derive(Debug)]
pub enum RuntimeError {
    /// The platform event loop could not be created or failed while running.
    EventLoop(winit::error::EventLoopError),
    /// The OS refused to create the window.
    CreateWindow(winit::error::OsError),
    /// No usable adapter/device/surface for the window.
    Gpu(anyhow::Error),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::EventLoop(e) => write!(f, "windowing system error: {e}"),
            RuntimeError::CreateWindow(e) => write!(f, "failed to create window: {e}"),
            RuntimeError::Gpu(e) => write!(f, "GPU initialization failed: {e:#}"),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::EventLoop(e) => Some(e),
            RuntimeError::CreateWindow(e) => Some(e),
            RuntimeError::Gpu(e) => Some(&**e),
        }
    }
}

impl From<winit::error::EventLoopError> for RuntimeError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RuntimeError::EventLoop(e)
    }
}
