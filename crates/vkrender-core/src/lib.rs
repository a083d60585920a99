//! Core types for vkrender.
//!
//! This crate provides the pieces shared by every other crate:
//! - Capability sets (required and available) and their negotiation
//! - The policy applied when a required capability is missing
//! - Common error types

pub mod capability;
pub mod error;

pub use capability::{
    negotiate, AvailableSet, CapabilityKind, MissingCapabilityPolicy, NegotiationResult,
    RequiredSet,
};
pub use error::{Error, Result};
