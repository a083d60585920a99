//! Platform abstraction for vkrender.
//!
//! Provides window creation via winit and access to the raw handles Vulkan
//! needs to talk to the window system.

use std::sync::Arc;

use raw_window_handle::{HasDisplayHandle, RawDisplayHandle};
use thiserror::Error;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Window creation failed: {0}")]
    WindowCreation(String),
    #[error("Event loop error: {0}")]
    EventLoop(String),
    #[error("Window handle unavailable: {0}")]
    Handle(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Platform configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Vulkan Test".to_string(),
            width: 800,
            height: 600,
            resizable: false,
        }
    }
}

/// An owned application window.
///
/// The native window is released when this value is dropped.
pub struct AppWindow {
    window: Arc<Window>,
}

impl AppWindow {
    /// Create a window on the active event loop.
    pub fn create(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(PhysicalSize::new(config.width.max(1), config.height.max(1)))
            .with_resizable(config.resizable);

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;

        tracing::info!(
            width = config.width,
            height = config.height,
            "Window \"{}\" created",
            config.title
        );

        Ok(Self {
            window: Arc::new(window),
        })
    }

    /// The underlying winit window.
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Raw display handle for Vulkan surface and extension queries.
    pub fn raw_display_handle(&self) -> Result<RawDisplayHandle> {
        self.window
            .display_handle()
            .map(|handle| handle.as_raw())
            .map_err(|e| PlatformError::Handle(e.to_string()))
    }
}

impl Drop for AppWindow {
    fn drop(&mut self) {
        tracing::debug!("Window destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_fixed_size() {
        let config = PlatformConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert!(!config.resizable);
        assert_eq!(config.title, "Vulkan Test");
    }
}
