//! Instance capability resolution.
//!
//! Checks the layers and extensions an instance needs against what the
//! driver reports, and applies the configured policy to each kind.

use tracing::{debug, info};
use vkrender_core::{negotiate, MissingCapabilityPolicy, RequiredSet};

use crate::error::Result;
use crate::query::CapabilityQuery;

/// Everything an instance requires, and how strictly.
#[derive(Debug, Clone)]
pub struct CapabilityPlan {
    /// Layers to enable (validation layers when validation is on).
    pub layers: RequiredSet,
    /// Instance extensions the window system needs.
    pub extensions: RequiredSet,
    /// Policy for missing layers.
    pub layer_policy: MissingCapabilityPolicy,
    /// Policy for missing instance extensions.
    pub extension_policy: MissingCapabilityPolicy,
}

/// Names that passed negotiation and will be enabled on the instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledCapabilities {
    pub layers: Vec<String>,
    pub extensions: Vec<String>,
}

/// Negotiate the plan against the driver.
///
/// Query failures are returned unchanged. Missing capabilities fail only
/// when the policy for their kind is [`MissingCapabilityPolicy::Abort`].
pub fn resolve_instance_capabilities<Q>(query: &Q, plan: &CapabilityPlan) -> Result<EnabledCapabilities>
where
    Q: CapabilityQuery + ?Sized,
{
    let layers = if plan.layers.is_empty() {
        debug!("No layers requested");
        Vec::new()
    } else {
        let available = query.available_layers()?;
        let result = negotiate(&plan.layers, &available);
        info!("{}", result.summary());
        result.apply(plan.layer_policy)?
    };

    let available = query.available_instance_extensions()?;
    info!("Available instance extensions ({}):", available.len());
    for name in available.sorted() {
        info!("\t{name}");
    }

    let result = negotiate(&plan.extensions, &available);
    info!("{}", result.summary());
    let extensions = result.apply(plan.extension_policy)?;

    Ok(EnabledCapabilities { layers, extensions })
}
