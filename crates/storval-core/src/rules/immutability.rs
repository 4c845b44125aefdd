//! Update-time comparisons between a previous and a candidate descriptor.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::hash::Hash;

use crate::field::{ErrorList, FieldError, FieldPath};

pub const FIELD_IS_IMMUTABLE: &str = "field is immutable";

fn as_bad_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// `Forbidden` when a never-changing field differs
pub fn forbid_change<T: PartialEq>(
    new: &T,
    old: &T,
    path: &FieldPath,
    detail: &str,
) -> Option<FieldError> {
    if new != old {
        return Some(FieldError::forbidden(path, detail));
    }
    None
}

/// `Invalid` "field is immutable" carrying the new value when `new` differs
/// from `old`
pub fn immutable_field<T: PartialEq + Serialize>(
    new: &T,
    old: &T,
    path: &FieldPath,
) -> Option<FieldError> {
    if new != old {
        return Some(FieldError::invalid(
            path,
            as_bad_value(new),
            FIELD_IS_IMMUTABLE,
        ));
    }
    None
}

/// Diff entries of a keyed list that exist in both versions
///
/// Each entry of `new` whose key also appears in `old` must equal the first
/// old entry with that key; a difference is reported at `path[i]`. Entries
/// present on only one side are left to create-time rules.
pub fn diff_keyed_entries<T, K, F>(new: &[T], old: &[T], key_of: F, path: &FieldPath) -> ErrorList
where
    T: PartialEq + Serialize,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut previous: HashMap<K, &T> = HashMap::with_capacity(old.len());
    for entry in old {
        previous.entry(key_of(entry)).or_insert(entry);
    }

    let mut errs = ErrorList::new();
    for (i, entry) in new.iter().enumerate() {
        if let Some(prev) = previous.get(&key_of(entry)) {
            errs.extend(immutable_field(entry, *prev, &path.index(i)));
        }
    }
    errs
}
