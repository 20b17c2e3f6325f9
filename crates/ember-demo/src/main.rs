mod app;
mod config;
mod driver;

use ember_engine::logging::{init_logging, LoggingConfig};
use ember_engine::window::{Runtime, RuntimeError};

use crate::app::TriangleApp;
use crate::config::DemoConfig;

/// Process status for a normal close.
const EXIT_OK: i32 = 0;
/// Process status when the window system or GPU cannot be brought up.
const EXIT_STARTUP_FAILURE: i32 = -1;

fn main() {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::default();
    let result = Runtime::run(config.runtime(), config.gpu(), TriangleApp::new(config));

    if let Err(e) = &result {
        log::error!("{e}");
    }

    // The event loop, window and GPU context are gone by now.
    std::process::exit(exit_code(&result));
}

fn exit_code(result: &Result<(), RuntimeError>) -> i32 {
    match result {
        Ok(()) => EXIT_OK,
        Err(RuntimeError::EventLoop(_) | RuntimeError::CreateWindow(_) | RuntimeError::Gpu(_)) => {
            EXIT_STARTUP_FAILURE
        }
    }
}
