//! storval core - validation engine for storage resource descriptors
//!
//! This crate provides:
//! - Field paths and the ordered field-error list every check reports into
//! - The typed descriptor model (StorageClass, VolumeAttachment, CSINode,
//!   CSIDriver, CSIStorageCapacity) with JSON/YAML decoding
//! - Reusable rule blocks: naming, uniqueness, size quotas, immutability
//! - One create/update rule set per kind behind [`ResourceValidator`]
//! - The error facility for operational failures and the logging facility
//!
//! Validation never fails: every problem becomes a [`FieldError`] and an
//! empty [`ErrorList`] means the descriptor was accepted.

pub mod errors;
pub mod field;
pub mod logging_facility;
pub mod model;
pub mod options;
pub mod rules;
pub mod validation;

pub use errors::{Result, StorvalError};
pub use field::{ErrorKind, ErrorList, FieldError, FieldPath, Limit};
pub use model::{Descriptor, Document};
pub use options::ValidationOptions;
pub use storval_core_types::{Feature, FeatureGate, FeatureSet};
pub use validation::ResourceValidator;
