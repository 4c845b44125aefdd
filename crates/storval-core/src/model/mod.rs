pub mod csi_driver;
pub mod csi_node;
pub mod csi_storage_capacity;
pub mod descriptor;
pub mod meta;
pub mod quantity;
pub mod selector;
pub mod storage_class;
pub mod volume;
pub mod volume_attachment;

pub use csi_driver::{CsiDriver, CsiDriverSpec, TokenRequest};
pub use csi_node::{CsiNode, CsiNodeDriver, CsiNodeSpec, VolumeNodeResources};
pub use csi_storage_capacity::CsiStorageCapacity;
pub use descriptor::{Descriptor, Document, STORAGE_V1};
pub use meta::ObjectMeta;
pub use quantity::{Quantity, QuantityParseError};
pub use selector::{
    LabelSelector, LabelSelectorRequirement, TopologySelectorLabelRequirement, TopologySelectorTerm,
};
pub use storage_class::StorageClass;
pub use volume::{CsiPersistentVolumeSource, ObjectReference, PersistentVolumeSpec};
pub use volume_attachment::{
    AttachmentSource, SourceShapeError, VolumeAttachment, VolumeAttachmentSource,
    VolumeAttachmentSpec, VolumeAttachmentStatus, VolumeError,
};
