//! Rules for persistent volume specs embedded inline in an attachment.

use super::naming::name_is_dns_subdomain;
use super::{invalid_each, validate_csi_driver_name};
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::model::{CsiPersistentVolumeSource, PersistentVolumeSpec};

pub const SUPPORTED_ACCESS_MODES: [&str; 4] = [
    "ReadWriteOnce",
    "ReadOnlyMany",
    "ReadWriteMany",
    "ReadWriteOncePod",
];
pub const SUPPORTED_PV_RECLAIM_POLICIES: [&str; 3] = ["Delete", "Recycle", "Retain"];
pub const SUPPORTED_VOLUME_MODES: [&str; 2] = ["Block", "Filesystem"];

const INLINE_FORBIDDEN: &str = "may not be specified in the context of inline volumes";

/// Validate a volume spec that lives inside another object
pub fn validate_inline_volume_spec(spec: &PersistentVolumeSpec, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();

    let modes_path = path.child("accessModes");
    if spec.access_modes.is_empty() {
        errs.push(FieldError::required(&modes_path, ""));
    }
    for (i, mode) in spec.access_modes.iter().enumerate() {
        if !SUPPORTED_ACCESS_MODES.contains(&mode.as_str()) {
            errs.push(FieldError::not_supported(
                &modes_path.index(i),
                mode.as_str(),
                &SUPPORTED_ACCESS_MODES,
            ));
        }
    }

    if spec.claim_ref.is_some() {
        errs.push(FieldError::forbidden(&path.child("claimRef"), INLINE_FORBIDDEN));
    }
    if !spec.capacity.is_empty() {
        errs.push(FieldError::forbidden(&path.child("capacity"), INLINE_FORBIDDEN));
    }
    if spec.csi.is_none() {
        errs.push(FieldError::required(
            &path.child("csi"),
            "has to be specified in the context of inline volumes",
        ));
    }

    if let Some(policy) = spec
        .persistent_volume_reclaim_policy
        .as_deref()
        .filter(|p| !p.is_empty())
    {
        if !SUPPORTED_PV_RECLAIM_POLICIES.contains(&policy) {
            errs.push(FieldError::not_supported(
                &path.child("persistentVolumeReclaimPolicy"),
                policy,
                &SUPPORTED_PV_RECLAIM_POLICIES,
            ));
        }
    }

    if !spec.storage_class_name.is_empty() {
        errs.append(invalid_each(
            &path.child("storageClassName"),
            &spec.storage_class_name,
            name_is_dns_subdomain(&spec.storage_class_name, false),
        ));
    }

    if let Some(mode) = spec.volume_mode.as_deref() {
        if !SUPPORTED_VOLUME_MODES.contains(&mode) {
            errs.push(FieldError::not_supported(
                &path.child("volumeMode"),
                mode,
                &SUPPORTED_VOLUME_MODES,
            ));
        }
    }

    if let Some(csi) = &spec.csi {
        errs.append(validate_csi_source(csi, &path.child("csi")));
    }

    errs
}

fn validate_csi_source(csi: &CsiPersistentVolumeSource, path: &FieldPath) -> ErrorList {
    let mut errs = validate_csi_driver_name(&csi.driver, &path.child("driver"));
    if csi.volume_handle.is_empty() {
        errs.push(FieldError::required(&path.child("volumeHandle"), ""));
    }
    errs
}
