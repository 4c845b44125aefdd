//! Create and update rule sets, one per descriptor kind.

pub mod csi_driver;
pub mod csi_node;
pub mod csi_storage_capacity;
pub mod descriptor;
pub mod storage_class;
pub mod volume_attachment;

use storval_core_types::FeatureGate;

use crate::field::ErrorList;
use crate::options::ValidationOptions;

/// Deterministic create/update validation for one descriptor kind
///
/// Both entry points are pure: the result depends only on the descriptors,
/// the feature gates and the options. An empty list means acceptance.
pub trait ResourceValidator {
    /// Validate a descriptor that is being created
    fn validate_create(&self, gates: &dyn FeatureGate, options: &ValidationOptions) -> ErrorList;

    /// Validate `self` as a replacement for `old`
    ///
    /// Runs the create rules on `self` first, then metadata-update rules and
    /// the kind's immutability checks.
    fn validate_update(
        &self,
        old: &Self,
        gates: &dyn FeatureGate,
        options: &ValidationOptions,
    ) -> ErrorList;
}
