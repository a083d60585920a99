//! Capability negotiation.
//!
//! Layers and extensions are requested by name. Before a resource that needs
//! them is created, the names the application requires are checked against
//! the names the driver or window system reports as available.
//!
//! [`negotiate`] never fails: it always produces a [`NegotiationResult`] and
//! leaves the decision about fatality to the caller, usually through
//! [`NegotiationResult::apply`] with a [`MissingCapabilityPolicy`].

use std::fmt;

use hashbrown::HashSet;

use crate::error::{Error, Result};

/// What kind of named capability a set holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// Instance layer, e.g. `VK_LAYER_KHRONOS_validation`.
    Layer,
    /// Instance extension, e.g. `VK_KHR_surface`.
    InstanceExtension,
    /// Device extension, e.g. `VK_KHR_swapchain`.
    DeviceExtension,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Layer => "layer",
            Self::InstanceExtension => "instance extension",
            Self::DeviceExtension => "device extension",
        };
        f.write_str(name)
    }
}

/// What to do when a negotiation comes back unsatisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingCapabilityPolicy {
    /// Log every missing capability and continue with the ones that are present.
    Warn,
    /// Fail with [`Error::MissingCapability`].
    #[default]
    Abort,
}

/// Capabilities the application needs, in the order they were declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredSet {
    kind: CapabilityKind,
    names: Vec<String>,
}

impl RequiredSet {
    /// Create a required set. Repeated names keep their first position.
    pub fn new<I, S>(kind: CapabilityKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self {
            kind,
            names: unique,
        }
    }

    /// Create an empty required set, which is always satisfied.
    pub fn empty(kind: CapabilityKind) -> Self {
        Self {
            kind,
            names: Vec::new(),
        }
    }

    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over the names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Capabilities reported by the driver or window system at query time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableSet {
    names: HashSet<String>,
}

impl AvailableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in lexical order, for stable log output.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for AvailableSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of checking a [`RequiredSet`] against an [`AvailableSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiationResult {
    kind: CapabilityKind,
    satisfied: Vec<String>,
    missing: Vec<String>,
}

impl NegotiationResult {
    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// True when every required capability was found.
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }

    /// Required names that were found, in required order.
    pub fn satisfied(&self) -> &[String] {
        &self.satisfied
    }

    /// Required names that were not found, in required order.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// One-line human readable report.
    pub fn summary(&self) -> String {
        let found = self.satisfied.len();
        let total = found + self.missing.len();
        if self.is_satisfied() {
            format!("{}: {found}/{total} required available", self.kind)
        } else {
            format!(
                "{}: {found}/{total} required available, missing [{}]",
                self.kind,
                self.missing.join(", ")
            )
        }
    }

    /// Turn the result into the list of names to enable.
    ///
    /// A satisfied result yields every required name regardless of policy.
    pub fn apply(self, policy: MissingCapabilityPolicy) -> Result<Vec<String>> {
        if self.is_satisfied() {
            return Ok(self.satisfied);
        }

        match policy {
            MissingCapabilityPolicy::Abort => Err(Error::MissingCapability {
                kind: self.kind,
                missing: self.missing,
            }),
            MissingCapabilityPolicy::Warn => {
                for name in &self.missing {
                    tracing::warn!("Required {} {} not available, skipping", self.kind, name);
                }
                Ok(self.satisfied)
            }
        }
    }
}

/// Check every required capability against the available set.
///
/// All missing names are collected; the check does not stop at the first one.
pub fn negotiate(required: &RequiredSet, available: &AvailableSet) -> NegotiationResult {
    let (satisfied, missing): (Vec<String>, Vec<String>) = required
        .names
        .iter()
        .cloned()
        .partition(|name| available.contains(name));

    for name in &missing {
        tracing::debug!(kind = %required.kind, name = %name, "capability missing");
    }

    NegotiationResult {
        kind: required.kind,
        satisfied,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALIDATION: &str = "VK_LAYER_KHRONOS_validation";

    fn layers(names: &[&str]) -> RequiredSet {
        RequiredSet::new(CapabilityKind::Layer, names.iter().copied())
    }

    fn available(names: &[&str]) -> AvailableSet {
        names.iter().copied().collect()
    }

    #[test]
    fn validation_layer_present() {
        let result = negotiate(
            &layers(&[VALIDATION]),
            &available(&[VALIDATION, "VK_LAYER_other"]),
        );
        assert!(result.is_satisfied());
        assert_eq!(result.satisfied(), [VALIDATION]);
        assert!(result.missing().is_empty());
    }

    #[test]
    fn validation_layer_absent() {
        let result = negotiate(&layers(&[VALIDATION]), &available(&["VK_LAYER_other"]));
        assert!(!result.is_satisfied());
        assert_eq!(result.missing(), [VALIDATION]);
    }

    #[test]
    fn empty_required_is_satisfied() {
        assert!(negotiate(&layers(&[]), &available(&[])).is_satisfied());
        assert!(negotiate(&layers(&[]), &available(&["a", "b"])).is_satisfied());
        assert!(negotiate(&RequiredSet::empty(CapabilityKind::Layer), &AvailableSet::new())
            .is_satisfied());
    }

    #[test]
    fn empty_available_fails_nonempty_required() {
        let result = negotiate(&layers(&["a"]), &AvailableSet::new());
        assert!(!result.is_satisfied());
        assert_eq!(result.missing(), ["a"]);
    }

    #[test]
    fn exact_match_only() {
        assert!(!negotiate(&layers(&["Foo"]), &available(&["foo"])).is_satisfied());
        assert!(!negotiate(&layers(&["Foo"]), &available(&["Foo "])).is_satisfied());
        assert!(negotiate(&layers(&["Foo"]), &available(&["Foo"])).is_satisfied());
    }

    #[test]
    fn reports_every_missing_name_in_required_order() {
        let result = negotiate(&layers(&["c", "a", "x", "b"]), &available(&["a"]));
        assert_eq!(result.satisfied(), ["a"]);
        assert_eq!(result.missing(), ["c", "x", "b"]);
    }

    #[test]
    fn order_does_not_change_outcome() {
        let forward = negotiate(&layers(&["a", "b", "c"]), &available(&["c", "b", "a"]));
        let reverse = negotiate(&layers(&["c", "b", "a"]), &available(&["a", "b", "c"]));
        assert!(forward.is_satisfied());
        assert!(reverse.is_satisfied());

        let forward = negotiate(&layers(&["a", "z"]), &available(&["a", "b"]));
        let reverse = negotiate(&layers(&["z", "a"]), &available(&["b", "a"]));
        assert_eq!(forward.is_satisfied(), reverse.is_satisfied());
    }

    #[test]
    fn repeated_negotiation_is_stable() {
        let required = layers(&[VALIDATION, "VK_LAYER_missing"]);
        let available = available(&[VALIDATION]);
        let first = negotiate(&required, &available);
        for _ in 0..4 {
            assert_eq!(negotiate(&required, &available), first);
        }
    }

    #[test]
    fn inputs_are_left_untouched() {
        let required = layers(&["a", "b"]);
        let available = available(&["b"]);
        let before = (required.clone(), available.clone());
        let _ = negotiate(&required, &available);
        assert_eq!((required, available), before);
    }

    #[test]
    fn duplicate_required_names_collapse() {
        let required = layers(&["a", "b", "a"]);
        assert_eq!(required.iter().collect::<Vec<_>>(), ["a", "b"]);
        let result = negotiate(&required, &AvailableSet::new());
        assert_eq!(result.missing(), ["a", "b"]);
    }

    #[test]
    fn abort_policy_errors_on_missing() {
        let result = negotiate(&layers(&[VALIDATION]), &available(&["VK_LAYER_other"]));
        let err = result.apply(MissingCapabilityPolicy::Abort).unwrap_err();
        assert_eq!(
            err,
            Error::MissingCapability {
                kind: CapabilityKind::Layer,
                missing: vec![VALIDATION.to_string()],
            }
        );
        insta::assert_snapshot!(
            err.to_string(),
            @"required layer(s) not available: VK_LAYER_KHRONOS_validation"
        );
    }

    #[test]
    fn warn_policy_keeps_satisfied_subset() {
        let required = RequiredSet::new(
            CapabilityKind::InstanceExtension,
            ["VK_KHR_surface", "VK_KHR_xlib_surface"],
        );
        let result = negotiate(&required, &available(&["VK_KHR_surface"]));
        let enabled = result.apply(MissingCapabilityPolicy::Warn).unwrap();
        assert_eq!(enabled, ["VK_KHR_surface"]);
    }

    #[test]
    fn satisfied_result_ignores_policy() {
        for policy in [MissingCapabilityPolicy::Warn, MissingCapabilityPolicy::Abort] {
            let result = negotiate(&layers(&["a", "b"]), &available(&["a", "b"]));
            assert_eq!(result.apply(policy).unwrap(), ["a", "b"]);
        }
    }

    #[test]
    fn summary_lines() {
        let satisfied = negotiate(
            &RequiredSet::new(
                CapabilityKind::InstanceExtension,
                ["VK_KHR_surface", "VK_KHR_wayland_surface"],
            ),
            &available(&["VK_KHR_surface", "VK_KHR_wayland_surface"]),
        );
        insta::assert_snapshot!(satisfied.summary(), @"instance extension: 2/2 required available");

        let unsatisfied = negotiate(&layers(&[VALIDATION]), &available(&["VK_LAYER_other"]));
        insta::assert_snapshot!(
            unsatisfied.summary(),
            @"layer: 0/1 required available, missing [VK_LAYER_KHRONOS_validation]"
        );
    }

    #[test]
    fn available_set_sorted_view() {
        let set = available(&["b", "c", "a"]);
        assert_eq!(set.sorted(), ["a", "b", "c"]);
        assert_eq!(set.len(), 3);
    }
}
