use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::{ObjectMeta, PersistentVolumeSpec};

/// Request to attach a volume to, or detach it from, a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeAttachment {
    pub metadata: ObjectMeta,
    pub spec: VolumeAttachmentSpec,
    pub status: VolumeAttachmentStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeAttachmentSpec {
    pub attacher: String,
    pub source: VolumeAttachmentSource,
    pub node_name: String,
}

/// Which volume to attach, in the optional-pair wire shape
///
/// Exactly one of the two fields must be set. Producers that can should
/// build an [`AttachmentSource`] and convert it, which makes the
/// neither/both states unrepresentable; validation still checks the pair
/// because other producers emit it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeAttachmentSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent_volume_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_volume_spec: Option<Box<PersistentVolumeSpec>>,
}

/// The source of a VolumeAttachment with exactly one arm set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentSource {
    PersistentVolume(String),
    InlineVolume(Box<PersistentVolumeSpec>),
}

/// The optional pair did not hold exactly one arm
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceShapeError {
    #[error("neither persistentVolumeName nor inlineVolumeSpec is set")]
    Neither,
    #[error("both persistentVolumeName and inlineVolumeSpec are set")]
    Both,
}

impl From<AttachmentSource> for VolumeAttachmentSource {
    fn from(source: AttachmentSource) -> Self {
        match source {
            AttachmentSource::PersistentVolume(name) => Self {
                persistent_volume_name: Some(name),
                inline_volume_spec: None,
            },
            AttachmentSource::InlineVolume(spec) => Self {
                persistent_volume_name: None,
                inline_volume_spec: Some(spec),
            },
        }
    }
}

impl TryFrom<VolumeAttachmentSource> for AttachmentSource {
    type Error = SourceShapeError;

    fn try_from(pair: VolumeAttachmentSource) -> Result<Self, Self::Error> {
        match (pair.persistent_volume_name, pair.inline_volume_spec) {
            (Some(name), None) => Ok(AttachmentSource::PersistentVolume(name)),
            (None, Some(spec)) => Ok(AttachmentSource::InlineVolume(spec)),
            (None, None) => Err(SourceShapeError::Neither),
            (Some(_), Some(_)) => Err(SourceShapeError::Both),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeAttachmentStatus {
    pub attached: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attachment_metadata: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attach_error: Option<VolumeError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detach_error: Option<VolumeError>,
}

/// Last error seen while attaching or detaching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    pub message: String,
}
