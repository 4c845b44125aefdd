//! Kind dispatch for [`Descriptor`], with structured logging around each call.

use std::time::Instant;

use storval_core_types::schema::{OP_VALIDATE_CREATE, OP_VALIDATE_UPDATE};
use storval_core_types::FeatureGate;

use super::ResourceValidator;
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::model::Descriptor;
use crate::options::ValidationOptions;
use crate::{log_op_end, log_op_start};

impl Descriptor {
    fn create_errors(&self, gates: &dyn FeatureGate, options: &ValidationOptions) -> ErrorList {
        match self {
            Descriptor::StorageClass(d) => d.validate_create(gates, options),
            Descriptor::VolumeAttachment(d) => d.validate_create(gates, options),
            Descriptor::CsiNode(d) => d.validate_create(gates, options),
            Descriptor::CsiDriver(d) => d.validate_create(gates, options),
            Descriptor::CsiStorageCapacity(d) => d.validate_create(gates, options),
        }
    }

    fn update_errors(
        &self,
        old: &Descriptor,
        gates: &dyn FeatureGate,
        options: &ValidationOptions,
    ) -> ErrorList {
        match (self, old) {
            (Descriptor::StorageClass(new), Descriptor::StorageClass(old)) => {
                new.validate_update(old, gates, options)
            }
            (Descriptor::VolumeAttachment(new), Descriptor::VolumeAttachment(old)) => {
                new.validate_update(old, gates, options)
            }
            (Descriptor::CsiNode(new), Descriptor::CsiNode(old)) => {
                new.validate_update(old, gates, &options.for_csi_node_update(old))
            }
            (Descriptor::CsiDriver(new), Descriptor::CsiDriver(old)) => {
                new.validate_update(old, gates, options)
            }
            (Descriptor::CsiStorageCapacity(new), Descriptor::CsiStorageCapacity(old)) => {
                new.validate_update(old, gates, options)
            }
            (new, old) => FieldError::internal(
                &FieldPath::new("kind"),
                format!(
                    "cannot update a {} with a {} descriptor",
                    old.kind(),
                    new.kind()
                ),
            )
            .into(),
        }
    }
}

impl ResourceValidator for Descriptor {
    fn validate_create(&self, gates: &dyn FeatureGate, options: &ValidationOptions) -> ErrorList {
        let start = Instant::now();
        log_op_start!(
            OP_VALIDATE_CREATE,
            kind = self.kind(),
            name = self.metadata().name.as_str()
        );
        let errs = self.create_errors(gates, options);
        log_op_end!(
            OP_VALIDATE_CREATE,
            start,
            kind = self.kind(),
            name = self.metadata().name.as_str(),
            error_count = errs.len()
        );
        errs
    }

    fn validate_update(
        &self,
        old: &Self,
        gates: &dyn FeatureGate,
        options: &ValidationOptions,
    ) -> ErrorList {
        let start = Instant::now();
        log_op_start!(
            OP_VALIDATE_UPDATE,
            kind = self.kind(),
            name = self.metadata().name.as_str()
        );
        let errs = self.update_errors(old, gates, options);
        log_op_end!(
            OP_VALIDATE_UPDATE,
            start,
            kind = self.kind(),
            name = self.metadata().name.as_str(),
            error_count = errs.len()
        );
        errs
    }
}
