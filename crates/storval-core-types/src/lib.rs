//! Core types shared across storval crates
//!
//! This crate provides foundational types used by the validation engine,
//! its logging facility and the command-line front end:
//!
//! - **Feature gates**: `Feature` identifiers, the `FeatureGate` oracle trait
//!   and the set-backed `FeatureSet` implementation
//! - **Schema constants**: Canonical field keys and event names

pub mod features;
pub mod schema;

pub use features::{Feature, FeatureGate, FeatureSet, UnknownFeature};
