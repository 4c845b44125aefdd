//! Object metadata rules shared by every kind.

use super::immutability::immutable_field;
use super::naming::{dns1123_label, qualified_name, NameFn};
use super::selectors::validate_labels;
use super::{invalid_each, validate_nonnegative, MapQuota};
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::model::ObjectMeta;

/// Create-time metadata checks
///
/// `name_fn` is the kind's object-name validator; it is applied to `name`
/// and, with prefix semantics, to `generateName`.
pub fn validate_object_meta(
    meta: &ObjectMeta,
    namespaced: bool,
    name_fn: NameFn,
    path: &FieldPath,
) -> ErrorList {
    let mut errs = ErrorList::new();

    if !meta.generate_name.is_empty() {
        errs.append(invalid_each(
            &path.child("generateName"),
            &meta.generate_name,
            name_fn(&meta.generate_name, true),
        ));
    }
    let name_path = path.child("name");
    if meta.name.is_empty() {
        if meta.generate_name.is_empty() {
            errs.push(FieldError::required(
                &name_path,
                "name or generateName is required",
            ));
        }
    } else {
        errs.append(invalid_each(&name_path, &meta.name, name_fn(&meta.name, false)));
    }

    errs.extend(validate_nonnegative(meta.generation, &path.child("generation")));

    let namespace_path = path.child("namespace");
    if namespaced {
        if meta.namespace.is_empty() {
            errs.push(FieldError::required(&namespace_path, ""));
        } else {
            errs.append(invalid_each(
                &namespace_path,
                &meta.namespace,
                dns1123_label(&meta.namespace),
            ));
        }
    } else if !meta.namespace.is_empty() {
        errs.push(FieldError::forbidden(
            &namespace_path,
            "not allowed on this type",
        ));
    }

    errs.append(validate_labels(&meta.labels, &path.child("labels")));

    let annotations_path = path.child("annotations");
    for key in meta.annotations.keys() {
        errs.append(invalid_each(
            &annotations_path.key(key),
            key,
            qualified_name(&key.to_lowercase()),
        ));
    }
    errs.extend(MapQuota::ANNOTATIONS.check_total_bytes(&meta.annotations, &annotations_path));

    errs
}

/// Update-time metadata checks: identity fields are fixed and the
/// generation never goes backwards
pub fn validate_object_meta_update(new: &ObjectMeta, old: &ObjectMeta, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();

    if new.generation < old.generation {
        errs.push(FieldError::invalid(
            &path.child("generation"),
            new.generation,
            "must not be decremented",
        ));
    }

    errs.extend(immutable_field(&new.name, &old.name, &path.child("name")));
    errs.extend(immutable_field(&new.namespace, &old.namespace, &path.child("namespace")));
    errs.extend(immutable_field(&new.uid, &old.uid, &path.child("uid")));
    errs.extend(immutable_field(
        &new.creation_timestamp,
        &old.creation_timestamp,
        &path.child("creationTimestamp"),
    ));

    errs
}
