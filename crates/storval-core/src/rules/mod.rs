//! Reusable rule building blocks shared by the resource validators.

pub mod immutability;
pub mod meta;
pub mod naming;
pub mod quota;
pub mod selectors;
pub mod uniqueness;
pub mod volume;

pub use immutability::{diff_keyed_entries, forbid_change, immutable_field, FIELD_IS_IMMUTABLE};
pub use meta::{validate_object_meta, validate_object_meta_update};
pub use naming::NameFn;
pub use quota::MapQuota;
pub use uniqueness::{ExactKeys, SeenSet, StructuralKeys, UniquenessDetector};

use crate::field::{ErrorList, FieldError, FieldPath};

/// Map each naming message to an `Invalid` error at `path`
pub fn invalid_each(path: &FieldPath, value: &str, messages: Vec<String>) -> ErrorList {
    messages
        .into_iter()
        .map(|msg| FieldError::invalid(path, value, msg))
        .collect()
}

/// `Invalid` "must be greater than or equal to 0" for negative numbers
pub fn validate_nonnegative(value: i64, path: &FieldPath) -> Option<FieldError> {
    if value < 0 {
        return Some(FieldError::invalid(
            path,
            value,
            "must be greater than or equal to 0",
        ));
    }
    None
}

/// CSI driver names: required, at most 63 bytes, and a DNS-1123 subdomain
/// once lower-cased
pub fn validate_csi_driver_name(name: &str, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    if name.is_empty() {
        errs.push(FieldError::required(path, ""));
        return errs;
    }
    errs.extend(quota::check_scalar_bytes(
        name,
        quota::CSI_DRIVER_NAME_MAX_LENGTH,
        path,
    ));
    errs.append(invalid_each(
        path,
        name,
        naming::dns1123_subdomain(&name.to_lowercase()),
    ));
    errs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ErrorKind, Limit};

    #[test]
    fn test_csi_driver_name_empty_is_required_only() {
        let errs = validate_csi_driver_name("", &FieldPath::new("name"));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.iter().next().unwrap().kind(), ErrorKind::Required);
    }

    #[test]
    fn test_csi_driver_name_case_insensitive() {
        assert!(validate_csi_driver_name("EBS.csi.AWS.com", &FieldPath::new("name")).is_empty());
    }

    #[test]
    fn test_csi_driver_name_too_long() {
        let name = format!("{}.com", "a".repeat(60));
        let errs = validate_csi_driver_name(&name, &FieldPath::new("name"));
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.iter().next().unwrap().limit(), Some(Limit::Bytes(63)));
    }

    #[test]
    fn test_csi_driver_name_invalid_characters() {
        let errs = validate_csi_driver_name("bad_driver", &FieldPath::new("name"));
        assert_eq!(errs.of_kind(ErrorKind::Invalid).len(), 1);
    }

    #[test]
    fn test_nonnegative() {
        let path = FieldPath::new("count");
        assert!(validate_nonnegative(0, &path).is_none());
        assert!(validate_nonnegative(-1, &path).is_some());
    }
}
