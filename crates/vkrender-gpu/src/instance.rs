//! Vulkan instance creation.

use std::ffi::{c_char, CStr, CString};

use ash::vk;
use raw_window_handle::RawDisplayHandle;
use vkrender_core::{CapabilityKind, MissingCapabilityPolicy, RequiredSet};

use crate::error::{GpuError, Result};
use crate::support::{resolve_instance_capabilities, CapabilityPlan, EnabledCapabilities};

/// Validation layers to enable when validation is requested.
pub fn validation_layers() -> Vec<&'static CStr> {
    vec![
        // Standard validation layer
        c"VK_LAYER_KHRONOS_validation",
    ]
}

/// Extensions required on top of what the window system asks for.
pub fn platform_instance_extensions() -> Vec<&'static CStr> {
    vec![
        // Required for MoltenVK on macOS
        #[cfg(target_os = "macos")]
        ash::khr::portability_enumeration::NAME,
    ]
}

/// Instance extensions the window system needs to present to this display.
pub fn surface_extensions(display: RawDisplayHandle) -> Result<Vec<String>> {
    let names = ash_window::enumerate_required_extensions(display)?;

    Ok(names
        .iter()
        .map(|&ptr| {
            // SAFETY: ash-window returns pointers to static NUL-terminated names.
            unsafe { CStr::from_ptr(ptr) }
                .to_string_lossy()
                .into_owned()
        })
        .collect())
}

/// Instance creation parameters.
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    pub app_name: String,
    pub app_version: u32,
    pub engine_name: String,
    pub engine_version: u32,
    pub api_version: u32,
    /// Request the validation layers.
    pub validation: bool,
    /// What to do when a validation layer is missing.
    pub validation_policy: MissingCapabilityPolicy,
    /// What to do when a window-system extension is missing.
    pub extension_policy: MissingCapabilityPolicy,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            app_name: "Vulkan Test".to_string(),
            app_version: vk::make_api_version(0, 1, 0, 0),
            engine_name: "No Engine".to_string(),
            engine_version: vk::make_api_version(0, 1, 0, 0),
            api_version: vk::API_VERSION_1_0,
            validation: cfg!(debug_assertions),
            validation_policy: MissingCapabilityPolicy::Abort,
            extension_policy: MissingCapabilityPolicy::Warn,
        }
    }
}

impl InstanceConfig {
    /// Build the capability plan for a window system requiring `surface_extensions`.
    pub fn capability_plan(&self, surface_extensions: Vec<String>) -> CapabilityPlan {
        let layers = if self.validation {
            RequiredSet::new(
                CapabilityKind::Layer,
                validation_layers()
                    .into_iter()
                    .map(|name| name.to_string_lossy().into_owned()),
            )
        } else {
            RequiredSet::empty(CapabilityKind::Layer)
        };

        let extensions = RequiredSet::new(
            CapabilityKind::InstanceExtension,
            surface_extensions.into_iter().chain(
                platform_instance_extensions()
                    .into_iter()
                    .map(|name| name.to_string_lossy().into_owned()),
            ),
        );

        CapabilityPlan {
            layers,
            extensions,
            layer_policy: self.validation_policy,
            extension_policy: self.extension_policy,
        }
    }
}

/// An owned Vulkan instance. The instance is destroyed on drop.
pub struct VulkanInstance {
    // Entry must outlive the instance
    #[allow(dead_code)]
    entry: ash::Entry,
    instance: ash::Instance,
    enabled: EnabledCapabilities,
}

impl VulkanInstance {
    /// Load Vulkan, negotiate capabilities and create the instance.
    pub fn new(config: &InstanceConfig, display: RawDisplayHandle) -> Result<Self> {
        // SAFETY: Loading the system Vulkan library has no further preconditions.
        let entry = unsafe { ash::Entry::load() }.map_err(|e| GpuError::Loading(e.to_string()))?;

        let plan = config.capability_plan(surface_extensions(display)?);
        let enabled = resolve_instance_capabilities(&entry, &plan)?;

        // SAFETY: The entry was just loaded.
        let instance = unsafe { create_instance(&entry, config, &enabled)? };

        tracing::info!(
            layers = enabled.layers.len(),
            extensions = enabled.extensions.len(),
            "Vulkan instance created"
        );

        Ok(Self {
            entry,
            instance,
            enabled,
        })
    }

    /// Get the Vulkan instance handle.
    pub fn instance(&self) -> &ash::Instance {
        &self.instance
    }

    /// Layers and extensions that were enabled at creation.
    pub fn enabled(&self) -> &EnabledCapabilities {
        &self.enabled
    }

    /// Whether the validation layer ended up enabled.
    pub fn validation_enabled(&self) -> bool {
        validation_layers().iter().any(|layer| {
            let layer = layer.to_string_lossy();
            self.enabled.layers.iter().any(|enabled| *enabled == layer)
        })
    }
}

impl Drop for VulkanInstance {
    fn drop(&mut self) {
        // SAFETY: No child objects are created from this instance.
        unsafe {
            self.instance.destroy_instance(None);
        }
        tracing::debug!("Vulkan instance destroyed");
    }
}

fn to_c_strings(names: &[String]) -> Result<Vec<CString>> {
    names
        .iter()
        .map(|name| CString::new(name.as_str()).map_err(|_| GpuError::InvalidName(name.clone())))
        .collect()
}

/// Create a Vulkan instance with the given layers and extensions.
///
/// # Safety
/// The entry must be a valid Vulkan entry point.
unsafe fn create_instance(
    entry: &ash::Entry,
    config: &InstanceConfig,
    enabled: &EnabledCapabilities,
) -> Result<ash::Instance> {
    let app_name = CString::new(config.app_name.as_str())
        .map_err(|_| GpuError::InvalidName(config.app_name.clone()))?;
    let engine_name = CString::new(config.engine_name.as_str())
        .map_err(|_| GpuError::InvalidName(config.engine_name.clone()))?;

    let app_info = vk::ApplicationInfo::default()
        .application_name(&app_name)
        .application_version(config.app_version)
        .engine_name(&engine_name)
        .engine_version(config.engine_version)
        .api_version(config.api_version);

    let layers = to_c_strings(&enabled.layers)?;
    let extensions = to_c_strings(&enabled.extensions)?;
    let layer_names: Vec<*const c_char> = layers.iter().map(|l| l.as_ptr()).collect();
    let extension_names: Vec<*const c_char> = extensions.iter().map(|e| e.as_ptr()).collect();

    #[cfg(target_os = "macos")]
    let create_flags = vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR;
    #[cfg(not(target_os = "macos"))]
    let create_flags = vk::InstanceCreateFlags::empty();

    let create_info = vk::InstanceCreateInfo::default()
        .application_info(&app_info)
        .enabled_extension_names(&extension_names)
        .enabled_layer_names(&layer_names)
        .flags(create_flags);

    // SAFETY: Caller guarantees the entry is valid; all pointers outlive the call.
    let instance = unsafe { entry.create_instance(&create_info, None)? };

    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_bootstrap_app() {
        let config = InstanceConfig::default();
        assert_eq!(config.app_name, "Vulkan Test");
        assert_eq!(config.engine_name, "No Engine");
        assert_eq!(config.api_version, vk::API_VERSION_1_0);
        assert_eq!(vk::api_version_major(config.app_version), 1);
        assert_eq!(config.validation_policy, MissingCapabilityPolicy::Abort);
        assert_eq!(config.extension_policy, MissingCapabilityPolicy::Warn);
    }

    #[test]
    fn plan_includes_validation_layer_when_enabled() {
        let config = InstanceConfig {
            validation: true,
            ..Default::default()
        };
        let plan = config.capability_plan(vec!["VK_KHR_surface".to_string()]);
        assert_eq!(
            plan.layers.iter().collect::<Vec<_>>(),
            ["VK_LAYER_KHRONOS_validation"]
        );
        assert_eq!(plan.layer_policy, MissingCapabilityPolicy::Abort);
        assert_eq!(plan.extensions.iter().next(), Some("VK_KHR_surface"));
    }

    #[test]
    fn plan_has_no_layers_without_validation() {
        let config = InstanceConfig {
            validation: false,
            ..Default::default()
        };
        let plan = config.capability_plan(vec![
            "VK_KHR_surface".to_string(),
            "VK_KHR_xlib_surface".to_string(),
        ]);
        assert!(plan.layers.is_empty());
        assert_eq!(
            plan.extensions.len(),
            2 + platform_instance_extensions().len()
        );
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = to_c_strings(&["bad\0name".to_string()]).unwrap_err();
        assert!(matches!(err, GpuError::InvalidName(_)));
    }
}
