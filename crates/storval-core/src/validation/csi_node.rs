use storval_core_types::FeatureGate;

use super::ResourceValidator;
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::model::{CsiNode, CsiNodeDriver};
use crate::options::ValidationOptions;
use crate::rules::naming::{node_name, qualified_name};
use crate::rules::quota::{CSI_NODE_ID_LONGER_MAX_LENGTH, CSI_NODE_ID_MAX_LENGTH};
use crate::rules::{
    diff_keyed_entries, invalid_each, validate_csi_driver_name, validate_nonnegative,
    validate_object_meta, validate_object_meta_update, ExactKeys, UniquenessDetector,
};

/// Whether `node_id` only fits under the relaxed ceiling
pub fn has_long_node_id(node_id: &str) -> bool {
    node_id.len() > CSI_NODE_ID_MAX_LENGTH
}

fn validate_node_id(
    node_id: &str,
    options: &ValidationOptions,
    path: &FieldPath,
) -> Option<FieldError> {
    if node_id.is_empty() {
        return Some(FieldError::required(path, ""));
    }
    let max = if options.allow_long_node_id {
        CSI_NODE_ID_LONGER_MAX_LENGTH
    } else {
        CSI_NODE_ID_MAX_LENGTH
    };
    if node_id.len() > max {
        return Some(FieldError::invalid(
            path,
            node_id,
            format!("must be {} characters or less", max),
        ));
    }
    None
}

fn validate_topology_keys(keys: &[String], path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    let mut seen = UniquenessDetector::exact();
    for (j, key) in keys.iter().enumerate() {
        let key_path = path.index(j);
        if key.is_empty() {
            errs.push(FieldError::required(&key_path, ""));
        } else if let Some(dup) = seen.observe(key.as_str(), &key_path, key.as_str()) {
            errs.push(dup);
        } else {
            errs.append(invalid_each(&key_path, key, qualified_name(key)));
        }
    }
    errs
}

fn validate_driver<'a>(
    driver: &'a CsiNodeDriver,
    names: &mut UniquenessDetector<ExactKeys<&'a str>>,
    options: &ValidationOptions,
    path: &FieldPath,
) -> ErrorList {
    let name_path = path.child("name");
    let mut errs = validate_csi_driver_name(&driver.name, &name_path);
    errs.extend(validate_node_id(&driver.node_id, options, &path.child("nodeID")));
    if let Some(count) = driver.allocatable.as_ref().and_then(|a| a.count) {
        errs.extend(validate_nonnegative(
            i64::from(count),
            &path.child("allocatable").child("count"),
        ));
    }
    errs.extend(names.observe(driver.name.as_str(), &name_path, driver.name.as_str()));
    errs.append(validate_topology_keys(
        &driver.topology_keys,
        &path.child("topologyKeys"),
    ));
    errs
}

impl ResourceValidator for CsiNode {
    fn validate_create(&self, _gates: &dyn FeatureGate, options: &ValidationOptions) -> ErrorList {
        let mut errs = validate_object_meta(
            &self.metadata,
            false,
            node_name,
            &FieldPath::new("metadata"),
        );
        let drivers_path = FieldPath::new("spec").child("drivers");
        let mut names = UniquenessDetector::exact();
        for (i, driver) in self.spec.drivers.iter().enumerate() {
            errs.append(validate_driver(
                driver,
                &mut names,
                options,
                &drivers_path.index(i),
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
        errs.append(diff_keyed_entries(
            &self.spec.drivers,
            &old.spec.drivers,
            |driver| driver.name.clone(),
            &FieldPath::new("spec").child("drivers"),
        ));
        errs
    }
}
