//! Startup configuration.

use vkrender_core::MissingCapabilityPolicy;
use vkrender_gpu::InstanceConfig;
use vkrender_platform::PlatformConfig;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Window settings.
    pub window: PlatformConfig,
    /// Enable Vulkan validation layers (default: debug builds only).
    pub validation: bool,
    /// Policy when a requested validation layer is missing.
    pub validation_policy: MissingCapabilityPolicy,
    /// Policy when a window-system instance extension is missing.
    pub extension_policy: MissingCapabilityPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: PlatformConfig::default(),
            validation: cfg!(debug_assertions),
            validation_policy: MissingCapabilityPolicy::Abort,
            extension_policy: MissingCapabilityPolicy::Warn,
        }
    }
}

impl AppConfig {
    /// Create a new config with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.window.title = title.into();
        config
    }

    /// Set the window dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Allow or forbid window resizing.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.window.resizable = resizable;
        self
    }

    /// Enable or disable validation layers.
    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    /// Set the policy for missing validation layers.
    pub fn with_validation_policy(mut self, policy: MissingCapabilityPolicy) -> Self {
        self.validation_policy = policy;
        self
    }

    /// Set the policy for missing instance extensions.
    pub fn with_extension_policy(mut self, policy: MissingCapabilityPolicy) -> Self {
        self.extension_policy = policy;
        self
    }

    /// Apply command line overrides. Unknown arguments are ignored.
    pub fn apply_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();

        let mut i = 0;
        while i < args.len() {
            let value: Option<&str> = args.get(i + 1).map(|v| v.as_ref());
            match args[i].as_ref() {
                "--validation" => self.validation = true,
                "--no-validation" => self.validation = false,
                "--strict-extensions" => self.extension_policy = MissingCapabilityPolicy::Abort,
                "--lenient-validation" => self.validation_policy = MissingCapabilityPolicy::Warn,
                "--width" => {
                    if let Some(v) = value.and_then(|v| v.parse().ok()) {
                        self.window.width = v;
                        i += 1;
                    }
                }
                "--height" => {
                    if let Some(v) = value.and_then(|v| v.parse().ok()) {
                        self.window.height = v;
                        i += 1;
                    }
                }
                "--title" => {
                    if let Some(v) = value {
                        self.window.title = v.to_string();
                        i += 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }

        self
    }

    /// Parameters for creating the Vulkan instance.
    pub fn instance_config(&self) -> InstanceConfig {
        InstanceConfig {
            app_name: self.window.title.clone(),
            validation: self.validation,
            validation_policy: self.validation_policy,
            extension_policy: self.extension_policy,
            ..Default::default()
        }
    }
}
