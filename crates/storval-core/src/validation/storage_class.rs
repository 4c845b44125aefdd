use storval_core_types::FeatureGate;

use super::ResourceValidator;
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::model::StorageClass;
use crate::options::ValidationOptions;
use crate::rules::naming::{name_is_dns_subdomain, qualified_name};
use crate::rules::selectors::validate_allowed_topologies;
use crate::rules::{
    forbid_change, immutable_field, invalid_each, validate_object_meta,
    validate_object_meta_update, MapQuota,
};

pub const SUPPORTED_RECLAIM_POLICIES: [&str; 2] = ["Delete", "Retain"];
pub const SUPPORTED_VOLUME_BINDING_MODES: [&str; 2] = ["Immediate", "WaitForFirstConsumer"];

fn validate_provisioner(provisioner: &str, path: &FieldPath) -> ErrorList {
    if provisioner.is_empty() {
        return FieldError::required(path, "").into();
    }
    invalid_each(path, provisioner, qualified_name(&provisioner.to_lowercase()))
}

fn validate_parameters(
    params: &std::collections::BTreeMap<String, String>,
    path: &FieldPath,
) -> ErrorList {
    let quota = MapQuota::PROVISIONER_PARAMETERS;
    if let Some(err) = quota.check_entry_count(params, path) {
        return err.into();
    }
    let mut errs = ErrorList::new();
    for key in params.keys().filter(|k| k.is_empty()) {
        errs.push(FieldError::invalid(path, key.as_str(), "field can not be empty."));
    }
    errs.extend(quota.check_total_bytes(params, path));
    errs
}

fn validate_reclaim_policy(policy: Option<&str>, path: &FieldPath) -> Option<FieldError> {
    let policy = policy.filter(|p| !p.is_empty())?;
    if SUPPORTED_RECLAIM_POLICIES.contains(&policy) {
        return None;
    }
    Some(FieldError::not_supported(
        path,
        policy,
        &SUPPORTED_RECLAIM_POLICIES,
    ))
}

fn validate_volume_binding_mode(mode: Option<&str>, path: &FieldPath) -> Option<FieldError> {
    match mode {
        None => Some(FieldError::required(path, "")),
        Some(mode) if SUPPORTED_VOLUME_BINDING_MODES.contains(&mode) => None,
        Some(mode) => Some(FieldError::not_supported(
            path,
            mode,
            &SUPPORTED_VOLUME_BINDING_MODES,
        )),
    }
}

impl ResourceValidator for StorageClass {
    fn validate_create(&self, _gates: &dyn FeatureGate, _options: &ValidationOptions) -> ErrorList {
        let mut errs = validate_object_meta(
            &self.metadata,
            false,
            name_is_dns_subdomain,
            &FieldPath::new("metadata"),
        );
        errs.append(validate_provisioner(
            &self.provisioner,
            &FieldPath::new("provisioner"),
        ));
        errs.append(validate_parameters(
            &self.parameters,
            &FieldPath::new("parameters"),
        ));
        errs.extend(validate_reclaim_policy(
            self.reclaim_policy.as_deref(),
            &FieldPath::new("reclaimPolicy"),
        ));
        errs.extend(validate_volume_binding_mode(
            self.volume_binding_mode.as_deref(),
            &FieldPath::new("volumeBindingMode"),
        ));
        errs.append(validate_allowed_topologies(
            &self.allowed_topologies,
            &FieldPath::new("allowedTopologies"),
        ));
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
        errs.extend(forbid_change(
            &self.parameters,
            &old.parameters,
            &FieldPath::new("parameters"),
            "updates to parameters are forbidden.",
        ));
        errs.extend(forbid_change(
            &self.provisioner,
            &old.provisioner,
            &FieldPath::new("provisioner"),
            "updates to provisioner are forbidden.",
        ));
        errs.extend(forbid_change(
            &self.reclaim_policy,
            &old.reclaim_policy,
            &FieldPath::new("reclaimPolicy"),
            "updates to reclaimPolicy are forbidden.",
        ));
        errs.extend(immutable_field(
            &self.volume_binding_mode,
            &old.volume_binding_mode,
            &FieldPath::new("volumeBindingMode"),
        ));
        errs
    }
}
