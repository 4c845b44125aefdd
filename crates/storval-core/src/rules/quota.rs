//! Fixed size ceilings and the two-stage map quota.

use std::collections::BTreeMap;

use crate::field::{ErrorList, FieldError, FieldPath, Limit};

pub const MAX_PROVISIONER_PARAMETER_COUNT: usize = 512;
pub const MAX_PROVISIONER_PARAMETER_BYTES: usize = 256 * (1 << 10);
pub const MAX_ATTACHMENT_METADATA_BYTES: usize = 256 * (1 << 10);
pub const MAX_ANNOTATION_BYTES: usize = 256 * (1 << 10);
pub const MAX_VOLUME_ERROR_MESSAGE_BYTES: usize = 1024;
pub const CSI_NODE_ID_MAX_LENGTH: usize = 192;
pub const CSI_NODE_ID_LONGER_MAX_LENGTH: usize = 256;
pub const CSI_DRIVER_NAME_MAX_LENGTH: usize = 63;

/// Ceilings for a bounded key/value map
///
/// The entry-count stage runs first; when it fails the byte stage is not
/// evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapQuota {
    max_entries: Option<usize>,
    max_bytes: usize,
}

impl MapQuota {
    pub const PROVISIONER_PARAMETERS: MapQuota = MapQuota {
        max_entries: Some(MAX_PROVISIONER_PARAMETER_COUNT),
        max_bytes: MAX_PROVISIONER_PARAMETER_BYTES,
    };

    pub const ATTACHMENT_METADATA: MapQuota = MapQuota {
        max_entries: None,
        max_bytes: MAX_ATTACHMENT_METADATA_BYTES,
    };

    pub const ANNOTATIONS: MapQuota = MapQuota {
        max_entries: None,
        max_bytes: MAX_ANNOTATION_BYTES,
    };

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Stage one: reject maps with too many entries
    pub fn check_entry_count(
        &self,
        map: &BTreeMap<String, String>,
        path: &FieldPath,
    ) -> Option<FieldError> {
        let max = self.max_entries?;
        if map.len() > max {
            return Some(FieldError::too_long(path, map.len(), Limit::Entries(max)));
        }
        None
    }

    /// Stage two: reject maps whose keys and values together are too large
    pub fn check_total_bytes(
        &self,
        map: &BTreeMap<String, String>,
        path: &FieldPath,
    ) -> Option<FieldError> {
        let total = total_bytes(map);
        if total > self.max_bytes {
            return Some(FieldError::too_long(
                path,
                total,
                Limit::Bytes(self.max_bytes),
            ));
        }
        None
    }

    /// Both stages in order, short-circuiting after a count failure
    pub fn enforce(&self, map: &BTreeMap<String, String>, path: &FieldPath) -> ErrorList {
        if let Some(err) = self.check_entry_count(map, path) {
            return err.into();
        }
        self.check_total_bytes(map, path).into_iter().collect()
    }
}

/// Sum of the byte lengths of every key and value
pub fn total_bytes(map: &BTreeMap<String, String>) -> usize {
    map.iter().map(|(k, v)| k.len() + v.len()).sum()
}

/// Single scalar string against its own byte ceiling
pub fn check_scalar_bytes(value: &str, max_bytes: usize, path: &FieldPath) -> Option<FieldError> {
    if value.len() > max_bytes {
        return Some(FieldError::too_long(path, value, Limit::Bytes(max_bytes)));
    }
    None
}
