//! GPU error types.

use ash::vk;
use thiserror::Error;

/// GPU-related errors.
#[derive(Error, Debug)]
pub enum GpuError {
    /// Vulkan error, including failed capability queries.
    #[error("Vulkan error: {0}")]
    Vulkan(#[from] vk::Result),

    /// The Vulkan loader could not be found or loaded.
    #[error("Failed to load Vulkan: {0}")]
    Loading(String),

    /// A required layer or extension is missing.
    #[error(transparent)]
    Capability(#[from] vkrender_core::Error),

    /// Window handle could not be used for Vulkan.
    #[error("Window handle error: {0}")]
    WindowHandle(String),

    /// Name could not be passed to Vulkan.
    #[error("Invalid name {0:?}: contains an interior NUL byte")]
    InvalidName(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, GpuError>;
