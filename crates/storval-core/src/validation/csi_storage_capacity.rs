use storval_core_types::FeatureGate;

use super::ResourceValidator;
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::model::CsiStorageCapacity;
use crate::options::ValidationOptions;
use crate::rules::naming::name_is_dns_subdomain;
use crate::rules::selectors::validate_label_selector;
use crate::rules::{
    immutable_field, invalid_each, validate_object_meta, validate_object_meta_update,
};

impl ResourceValidator for CsiStorageCapacity {
    fn validate_create(&self, _gates: &dyn FeatureGate, _options: &ValidationOptions) -> ErrorList {
        let mut errs = validate_object_meta(
            &self.metadata,
            true,
            name_is_dns_subdomain,
            &FieldPath::new("metadata"),
        );
        errs.append(validate_label_selector(
            self.node_topology.as_ref(),
            &FieldPath::new("nodeTopology"),
        ));
        errs.append(invalid_each(
            &FieldPath::new("storageClassName"),
            &self.storage_class_name,
            name_is_dns_subdomain(&self.storage_class_name, false),
        ));
        if let Some(capacity) = self.capacity.as_ref().filter(|q| q.is_negative()) {
            errs.push(FieldError::invalid(
                &FieldPath::new("capacity"),
                capacity.as_str(),
                "must be greater than or equal to 0",
            ));
        }
        errs
    }

    fn validate_update(
        &self,
        old: &Self,
        gates: &dyn FeatureGate,
        options: &ValidationOptions,
    ) -> ErrorList {
        let mut errs = self.validate_create(gates, options);
        errs.append(validate_object_meta_update(
            &self.metadata,
            &old.metadata,
            &FieldPath::new("metadata"),
        ));
        errs.extend(immutable_field(
            &self.node_topology,
            &old.node_topology,
            &FieldPath::new("nodeTopology"),
        ));
        errs.extend(immutable_field(
            &self.storage_class_name,
            &old.storage_class_name,
            &FieldPath::new("storageClassName"),
        ));
        errs
    }
}
