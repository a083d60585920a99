//! Vulkan layer for vkrender.
//!
//! This crate provides:
//! - Vulkan entry loading and instance creation
//! - Layer and instance extension queries against the driver
//! - Negotiation of required capabilities before the instance is created

pub mod error;
pub mod instance;
pub mod query;
pub mod support;

pub use error::{GpuError, Result};
pub use instance::{InstanceConfig, VulkanInstance};
pub use query::CapabilityQuery;
pub use support::{resolve_instance_capabilities, CapabilityPlan, EnabledCapabilities};
