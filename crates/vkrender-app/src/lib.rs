//! Application framework for vkrender.
//!
//! This crate handles the startup sequence:
//! - Logging initialization
//! - Window creation
//! - Vulkan instance creation with layer and extension checks
//! - Event loop handling until the window is closed
//!
//! # Example
//!
//! ```no_run
//! use vkrender_app::{run_app, AppConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     run_app(AppConfig::new("Vulkan Test").with_validation(true))
//! }
//! ```

mod config;
mod context;
mod runner;

pub use config::AppConfig;
pub use context::AppContext;
pub use runner::{init_logging, run_app};

// Re-export commonly used types for convenience
pub use vkrender_core::MissingCapabilityPolicy;
pub use vkrender_gpu::VulkanInstance;
pub use vkrender_platform::{AppWindow, PlatformConfig};
