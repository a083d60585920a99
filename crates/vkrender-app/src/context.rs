//! Application context.

use vkrender_gpu::VulkanInstance;
use vkrender_platform::AppWindow;
use winit::event_loop::ActiveEventLoop;

use crate::config::AppConfig;

/// Resources owned by a running application.
///
/// Fields drop in declaration order: the Vulkan instance is destroyed
/// before the window it was created for.
pub struct AppContext {
    /// Vulkan instance.
    pub instance: VulkanInstance,
    /// The window.
    pub window: AppWindow,
}

impl AppContext {
    /// Create the window, then the Vulkan instance.
    ///
    /// If instance creation fails the window is released before returning.
    pub(crate) fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> anyhow::Result<Self> {
        let window = AppWindow::create(event_loop, &config.window)?;
        let display = window.raw_display_handle()?;

        let instance = VulkanInstance::new(&config.instance_config(), display)?;

        if config.validation && !instance.validation_enabled() {
            tracing::warn!("Validation requested but running without validation layers");
        }

        Ok(Self { instance, window })
    }
}
