//! The closed set of descriptor kinds and document decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CsiDriver, CsiNode, CsiStorageCapacity, ObjectMeta, StorageClass, VolumeAttachment};
use crate::errors::{Result, StorvalError};

/// API version whose VolumeAttachments get the stricter attacher and
/// volume-name checks
pub const STORAGE_V1: &str = "storage.k8s.io/v1";

/// Any descriptor this engine validates, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Descriptor {
    StorageClass(StorageClass),
    VolumeAttachment(VolumeAttachment),
    #[serde(rename = "CSINode")]
    CsiNode(CsiNode),
    #[serde(rename = "CSIDriver")]
    CsiDriver(CsiDriver),
    #[serde(rename = "CSIStorageCapacity")]
    CsiStorageCapacity(CsiStorageCapacity),
}

impl Descriptor {
    /// Every supported `kind` value
    pub const KINDS: [&'static str; 5] = [
        "StorageClass",
        "VolumeAttachment",
        "CSINode",
        "CSIDriver",
        "CSIStorageCapacity",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            Descriptor::StorageClass(_) => "StorageClass",
            Descriptor::VolumeAttachment(_) => "VolumeAttachment",
            Descriptor::CsiNode(_) => "CSINode",
            Descriptor::CsiDriver(_) => "CSIDriver",
            Descriptor::CsiStorageCapacity(_) => "CSIStorageCapacity",
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Descriptor::StorageClass(d) => &d.metadata,
            Descriptor::VolumeAttachment(d) => &d.metadata,
            Descriptor::CsiNode(d) => &d.metadata,
            Descriptor::CsiDriver(d) => &d.metadata,
            Descriptor::CsiStorageCapacity(d) => &d.metadata,
        }
    }

    /// Whether the kind lives inside a namespace
    pub fn is_namespaced(&self) -> bool {
        matches!(self, Descriptor::CsiStorageCapacity(_))
    }
}

/// A decoded document: the descriptor plus the envelope fields around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub api_version: Option<String>,
    pub descriptor: Descriptor,
}

impl Document {
    /// Decode a JSON document
    pub fn decode_json(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Decode a YAML document; JSON is accepted too since it is valid YAML
    pub fn decode_yaml(input: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(input)?;
        Self::from_value(value)
    }

    /// Decode an already parsed tree
    pub fn from_value(value: Value) -> Result<Self> {
        let kind = match value.get("kind") {
            Some(Value::String(kind)) => kind.clone(),
            Some(other) => {
                return Err(StorvalError::Decode {
                    format: "document",
                    message: format!("kind must be a string, got {}", other),
                })
            }
            None => {
                return Err(StorvalError::Decode {
                    format: "document",
                    message: "missing field `kind`".to_string(),
                })
            }
        };
        if !Descriptor::KINDS.contains(&kind.as_str()) {
            return Err(StorvalError::UnknownKind { kind });
        }
        let api_version = value
            .get("apiVersion")
            .and_then(Value::as_str)
            .map(str::to_string);
        let descriptor: Descriptor = serde_json::from_value(value)?;
        Ok(Self {
            api_version,
            descriptor,
        })
    }

    /// Whether this document arrived through the v1 storage API
    pub fn is_storage_v1(&self) -> bool {
        self.api_version.as_deref() == Some(STORAGE_V1)
    }
}
