//! Application runner and event loop.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vkrender_platform::PlatformError;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::config::AppConfig;
use crate::context::AppContext;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls filtering; the default level is `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Run the application with the given configuration.
///
/// This function initializes logging, creates the window and Vulkan
/// instance, and runs the event loop until the window is closed. A startup
/// failure is returned after the event loop exits.
pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    init_logging();

    info!("{} starting...", config.window.title);
    info!(
        "Validation layers {} (missing layers: {:?}, missing extensions: {:?})",
        if config.validation { "requested" } else { "disabled" },
        config.validation_policy,
        config.extension_policy,
    );

    let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut runner = AppRunner {
        config,
        ctx: None,
        startup_error: None,
    };

    event_loop
        .run_app(&mut runner)
        .map_err(|e| PlatformError::EventLoop(e.to_string()))?;

    match runner.startup_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Internal application runner that implements winit's ApplicationHandler.
struct AppRunner {
    config: AppConfig,
    ctx: Option<AppContext>,
    startup_error: Option<anyhow::Error>,
}

impl AppRunner {
    fn shutdown(&mut self) {
        if self.ctx.take().is_some() {
            info!("Cleanup complete");
        }
    }
}

impl ApplicationHandler for AppRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.ctx.is_some() || self.startup_error.is_some() {
            return;
        }

        info!("Creating application state...");

        match AppContext::new(event_loop, &self.config) {
            Ok(ctx) => {
                self.ctx = Some(ctx);
                info!("Application ready!");
            }
            Err(e) => {
                error!("Failed to initialize application: {e}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        if ctx.window.window().id() != id {
            return;
        }

        if matches!(event, WindowEvent::CloseRequested) {
            info!("Close requested");
            self.shutdown();
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}
