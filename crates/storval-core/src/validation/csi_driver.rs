use storval_core_types::{Feature, FeatureGate};

use super::ResourceValidator;
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::model::{CsiDriver, CsiDriverSpec, TokenRequest};
use crate::options::ValidationOptions;
use crate::rules::naming::name_is_dns_subdomain;
use crate::rules::{
    immutable_field, validate_object_meta, validate_object_meta_update, UniquenessDetector,
};

pub const SUPPORTED_FS_GROUP_POLICIES: [&str; 3] = ["ReadWriteOnceWithFSType", "File", "None"];
pub const SUPPORTED_LIFECYCLE_MODES: [&str; 2] = ["Persistent", "Ephemeral"];

const MIN_TOKEN_EXPIRATION_SECONDS: i64 = 10 * 60;
const MAX_TOKEN_EXPIRATION_SECONDS: i64 = 1 << 32;

fn validate_token_requests(requests: &[TokenRequest], path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    let mut audiences = UniquenessDetector::exact();
    for (i, request) in requests.iter().enumerate() {
        let request_path = path.index(i);
        if let Some(dup) = audiences.observe(
            request.audience.as_str(),
            &request_path.child("audience"),
            request.audience.as_str(),
        ) {
            errs.push(dup);
            continue;
        }
        let Some(seconds) = request.expiration_seconds else {
            continue;
        };
        let seconds_path = request_path.child("expirationSeconds");
        if seconds < MIN_TOKEN_EXPIRATION_SECONDS {
            errs.push(FieldError::invalid(
                &seconds_path,
                seconds,
                "may not specify a duration less than 10 minutes",
            ));
        }
        if seconds > MAX_TOKEN_EXPIRATION_SECONDS {
            errs.push(FieldError::invalid(
                &seconds_path,
                seconds,
                "may not specify a duration larger than 2^32 seconds",
            ));
        }
    }
    errs
}

fn validate_spec(spec: &CsiDriverSpec, gates: &dyn FeatureGate, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    if spec.attach_required.is_none() {
        errs.push(FieldError::required(&path.child("attachRequired"), ""));
    }
    if spec.pod_info_on_mount.is_none() {
        errs.push(FieldError::required(&path.child("podInfoOnMount"), ""));
    }
    if spec.storage_capacity.is_none() && gates.enabled(Feature::CsiStorageCapacity) {
        errs.push(FieldError::required(&path.child("storageCapacity"), ""));
    }
    if let Some(policy) = spec.fs_group_policy.as_deref() {
        if !SUPPORTED_FS_GROUP_POLICIES.contains(&policy) {
            errs.push(FieldError::not_supported(
                &path.child("fsGroupPolicy"),
                policy,
                &SUPPORTED_FS_GROUP_POLICIES,
            ));
        }
    }
    errs.append(validate_token_requests(
        &spec.token_requests,
        &path.child("tokenRequests"),
    ));
    let modes_path = path.child("volumeLifecycleModes");
    for (i, mode) in spec.volume_lifecycle_modes.iter().enumerate() {
        if !SUPPORTED_LIFECYCLE_MODES.contains(&mode.as_str()) {
            errs.push(FieldError::not_supported(
                &modes_path.index(i),
                mode.as_str(),
                &SUPPORTED_LIFECYCLE_MODES,
            ));
        }
    }
    errs
}

impl ResourceValidator for CsiDriver {
    fn validate_create(&self, gates: &dyn FeatureGate, _options: &ValidationOptions) -> ErrorList {
        let mut errs = validate_object_meta(
            &self.metadata,
            false,
            name_is_dns_subdomain,
            &FieldPath::new("metadata"),
        );
        errs.append(validate_spec(&self.spec, gates, &FieldPath::new("spec")));
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
        let spec = FieldPath::new("spec");
        let (new, old) = (&self.spec, &old.spec);
        errs.extend(immutable_field(
            &new.attach_required,
            &old.attach_required,
            &spec.child("attachRequired"),
        ));
        errs.extend(immutable_field(
            &new.fs_group_policy,
            &old.fs_group_policy,
            &spec.child("fsGroupPolicy"),
        ));
        errs.extend(immutable_field(
            &new.pod_info_on_mount,
            &old.pod_info_on_mount,
            &spec.child("podInfoOnMount"),
        ));
        errs.extend(immutable_field(
            &new.volume_lifecycle_modes,
            &old.volume_lifecycle_modes,
            &spec.child("volumeLifecycleModes"),
        ));
        errs.extend(immutable_field(
            &new.storage_capacity,
            &old.storage_capacity,
            &spec.child("storageCapacity"),
        ));
        errs
    }
}
