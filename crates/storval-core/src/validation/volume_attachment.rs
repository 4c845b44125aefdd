use storval_core_types::{Feature, FeatureGate};

use super::ResourceValidator;
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::model::{
    VolumeAttachment, VolumeAttachmentSource, VolumeAttachmentSpec, VolumeAttachmentStatus,
    VolumeError,
};
use crate::options::ValidationOptions;
use crate::rules::naming::{name_is_dns_subdomain, node_name};
use crate::rules::quota::{check_scalar_bytes, MAX_VOLUME_ERROR_MESSAGE_BYTES};
use crate::rules::volume::validate_inline_volume_spec;
use crate::rules::{
    immutable_field, invalid_each, validate_csi_driver_name, validate_object_meta,
    validate_object_meta_update, MapQuota,
};

const EXACTLY_ONE_SOURCE: &str =
    "must specify exactly one of inlineVolumeSpec and persistentVolumeName";
const PV_NAME_WITHOUT_MIGRATION: &str =
    "must specify persistentVolumeName when CSIMigration feature is disabled";

fn validate_source(
    source: &VolumeAttachmentSource,
    gates: &dyn FeatureGate,
    path: &FieldPath,
) -> ErrorList {
    match (&source.persistent_volume_name, &source.inline_volume_spec) {
        (None, None) => {
            let detail = if gates.enabled(Feature::CsiMigration) {
                EXACTLY_ONE_SOURCE
            } else {
                PV_NAME_WITHOUT_MIGRATION
            };
            FieldError::required(path, detail).into()
        }
        (Some(_), Some(_)) => FieldError::forbidden(path, EXACTLY_ONE_SOURCE).into(),
        (Some(name), None) => {
            if name.is_empty() {
                return FieldError::required(
                    &path.child("persistentVolumeName"),
                    "must specify non empty persistentVolumeName",
                )
                .into();
            }
            ErrorList::new()
        }
        (None, Some(spec)) => validate_inline_volume_spec(spec, &path.child("inlineVolumeSpec")),
    }
}

fn validate_spec(spec: &VolumeAttachmentSpec, gates: &dyn FeatureGate, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    if spec.attacher.is_empty() {
        errs.push(FieldError::required(&path.child("attacher"), ""));
    }
    errs.append(validate_source(&spec.source, gates, &path.child("source")));
    errs.append(invalid_each(
        &path.child("nodeName"),
        &spec.node_name,
        node_name(&spec.node_name, false),
    ));
    errs
}

fn validate_volume_error(err: Option<&VolumeError>, path: &FieldPath) -> Option<FieldError> {
    let err = err?;
    check_scalar_bytes(
        &err.message,
        MAX_VOLUME_ERROR_MESSAGE_BYTES,
        &path.child("message"),
    )
}

fn validate_status(status: &VolumeAttachmentStatus, path: &FieldPath) -> ErrorList {
    let mut errs = MapQuota::ATTACHMENT_METADATA
        .enforce(&status.attachment_metadata, &path.child("attachmentMetadata"));
    errs.extend(validate_volume_error(
        status.attach_error.as_ref(),
        &path.child("attachError"),
    ));
    errs.extend(validate_volume_error(
        status.detach_error.as_ref(),
        &path.child("detachError"),
    ));
    errs
}

/// Extra checks for attachments submitted through the v1 API
///
/// An empty attacher was already reported as required by the base rules.
fn validate_v1(attachment: &VolumeAttachment) -> ErrorList {
    let mut errs = ErrorList::new();
    let spec = &attachment.spec;
    if !spec.attacher.is_empty() {
        errs.append(validate_csi_driver_name(
            &spec.attacher,
            &FieldPath::new("spec").child("attacher"),
        ));
    }
    if let Some(pv_name) = &spec.source.persistent_volume_name {
        if !pv_name.is_empty() {
            errs.append(invalid_each(
                &FieldPath::new("spec").child("source").child("persistentVolumeName"),
                pv_name,
                name_is_dns_subdomain(pv_name, false),
            ));
        }
    }
    errs
}

impl ResourceValidator for VolumeAttachment {
    fn validate_create(&self, gates: &dyn FeatureGate, options: &ValidationOptions) -> ErrorList {
        let mut errs = validate_object_meta(
            &self.metadata,
            false,
            name_is_dns_subdomain,
            &FieldPath::new("metadata"),
        );
        errs.append(validate_spec(&self.spec, gates, &FieldPath::new("spec")));
        errs.append(validate_status(&self.status, &FieldPath::new("status")));
        if options.enforce_v1_attachment_rules {
            errs.append(validate_v1(self));
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
        errs.extend(immutable_field(&self.spec, &old.spec, &FieldPath::new("spec")));
        errs
    }
}
