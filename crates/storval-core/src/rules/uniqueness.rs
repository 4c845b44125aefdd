//! Duplicate detection over collections observed one entry at a time.

use serde_json::Value;
use std::collections::HashSet;
use std::hash::Hash;

use crate::field::{FieldError, FieldPath};

/// Keys retained by a [`UniquenessDetector`]
pub trait SeenSet {
    type Key;

    fn contains(&self, key: &Self::Key) -> bool;

    fn retain(&mut self, key: Self::Key);
}

/// Hash-set membership for simple keys
#[derive(Debug)]
pub struct ExactKeys<K>(HashSet<K>);

impl<K> Default for ExactKeys<K> {
    fn default() -> Self {
        Self(HashSet::new())
    }
}

impl<K: Eq + Hash> SeenSet for ExactKeys<K> {
    type Key = K;

    fn contains(&self, key: &K) -> bool {
        self.0.contains(key)
    }

    fn retain(&mut self, key: K) {
        self.0.insert(key);
    }
}

/// Linear deep comparison against every retained value, for composite keys
/// with no useful hash
#[derive(Debug)]
pub struct StructuralKeys<K>(Vec<K>);

impl<K> Default for StructuralKeys<K> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<K: PartialEq> SeenSet for StructuralKeys<K> {
    type Key = K;

    fn contains(&self, key: &K) -> bool {
        self.0.iter().any(|seen| seen == key)
    }

    fn retain(&mut self, key: K) {
        self.0.push(key);
    }
}

/// Reports repeats of keys seen earlier in the same traversal
///
/// The first occurrence of a key is retained and never flagged. Each later
/// occurrence yields one `Duplicate` error and is not retained again.
#[derive(Debug, Default)]
pub struct UniquenessDetector<S> {
    seen: S,
}

impl<K: Eq + Hash> UniquenessDetector<ExactKeys<K>> {
    pub fn exact() -> Self {
        Self {
            seen: ExactKeys::default(),
        }
    }
}

impl<K: PartialEq> UniquenessDetector<StructuralKeys<K>> {
    pub fn structural() -> Self {
        Self {
            seen: StructuralKeys::default(),
        }
    }
}

impl<S: SeenSet> UniquenessDetector<S> {
    /// Record `key`, returning whether it had been seen before
    pub fn is_duplicate(&mut self, key: S::Key) -> bool {
        if self.seen.contains(&key) {
            return true;
        }
        self.seen.retain(key);
        false
    }

    /// Record `key`; a repeat yields a `Duplicate` error at `path`
    pub fn observe(
        &mut self,
        key: S::Key,
        path: &FieldPath,
        bad_value: impl Into<Value>,
    ) -> Option<FieldError> {
        if self.is_duplicate(key) {
            Some(FieldError::duplicate(path, bad_value))
        } else {
            None
        }
    }
}
