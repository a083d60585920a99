//! Driver capability queries.

use std::ffi::CStr;

use crate::error::Result;
use vkrender_core::AvailableSet;

/// Source of the layers and instance extensions the driver offers.
///
/// Every call queries afresh; implementations must not cache.
pub trait CapabilityQuery {
    /// Instance layers installed on this system.
    fn available_layers(&self) -> Result<AvailableSet>;

    /// Instance extensions exposed by the implementation and implicit layers.
    fn available_instance_extensions(&self) -> Result<AvailableSet>;
}

impl CapabilityQuery for ash::Entry {
    fn available_layers(&self) -> Result<AvailableSet> {
        // SAFETY: The entry holds loaded global function pointers.
        let layers = unsafe { self.enumerate_instance_layer_properties()? };

        Ok(layers
            .iter()
            .map(|props| {
                // SAFETY: Vulkan guarantees layer_name is NUL-terminated.
                unsafe { CStr::from_ptr(props.layer_name.as_ptr()) }
                    .to_string_lossy()
                    .into_owned()
            })
            .collect())
    }

    fn available_instance_extensions(&self) -> Result<AvailableSet> {
        // SAFETY: The entry holds loaded global function pointers.
        let extensions = unsafe { self.enumerate_instance_extension_properties(None)? };

        Ok(extensions
            .iter()
            .map(|ext| {
                // SAFETY: Vulkan guarantees extension_name is NUL-terminated.
                unsafe { CStr::from_ptr(ext.extension_name.as_ptr()) }
                    .to_string_lossy()
                    .into_owned()
            })
            .collect())
    }
}
