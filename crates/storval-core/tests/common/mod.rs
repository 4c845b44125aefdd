use storval_core::model::{
    CsiDriver, CsiDriverSpec, CsiNode, CsiNodeDriver, CsiNodeSpec, CsiStorageCapacity,
    LabelSelector, ObjectMeta, StorageClass, TopologySelectorLabelRequirement,
    TopologySelectorTerm, VolumeAttachment, VolumeAttachmentSource, VolumeAttachmentSpec,
};
use storval_core::{ErrorKind, ErrorList, FeatureSet, ValidationOptions};

/// Every feature gate at its default state
#[allow(dead_code)]
pub fn gates() -> FeatureSet {
    FeatureSet::defaults()
}

#[allow(dead_code)]
pub fn opts() -> ValidationOptions {
    ValidationOptions::new()
}

/// Rendered paths of every error, in order
#[allow(dead_code)]
pub fn paths(errs: &ErrorList) -> Vec<String> {
    errs.iter().map(|e| e.path().render()).collect()
}

/// Kinds of every error, in order
#[allow(dead_code)]
pub fn kinds(errs: &ErrorList) -> Vec<ErrorKind> {
    errs.iter().map(|e| e.kind()).collect()
}

#[allow(dead_code)]
pub fn storage_class() -> StorageClass {
    StorageClass {
        metadata: ObjectMeta::named("fast-ssd"),
        provisioner: "ebs.csi.aws.com".to_string(),
        parameters: [("type".to_string(), "gp3".to_string())].into(),
        reclaim_policy: Some("Delete".to_string()),
        allow_volume_expansion: Some(true),
        mount_options: vec![],
        volume_binding_mode: Some("WaitForFirstConsumer".to_string()),
        allowed_topologies: vec![TopologySelectorTerm {
            match_label_expressions: vec![TopologySelectorLabelRequirement::new(
                "topology.kubernetes.io/zone",
                ["us-east-1a", "us-east-1b"],
            )],
        }],
    }
}

#[allow(dead_code)]
pub fn volume_attachment() -> VolumeAttachment {
    VolumeAttachment {
        metadata: ObjectMeta::named("csi-0123abcd"),
        spec: VolumeAttachmentSpec {
            attacher: "ebs.csi.aws.com".to_string(),
            source: VolumeAttachmentSource {
                persistent_volume_name: Some("pv-0001".to_string()),
                inline_volume_spec: None,
            },
            node_name: "node-1".to_string(),
        },
        status: Default::default(),
    }
}

#[allow(dead_code)]
pub fn csi_node_driver(name: &str) -> CsiNodeDriver {
    CsiNodeDriver {
        name: name.to_string(),
        node_id: format!("{}-node-1", name),
        topology_keys: vec!["topology.kubernetes.io/zone".to_string()],
        allocatable: None,
    }
}

#[allow(dead_code)]
pub fn csi_node() -> CsiNode {
    CsiNode {
        metadata: ObjectMeta::named("node-1"),
        spec: CsiNodeSpec {
            drivers: vec![
                csi_node_driver("ebs.csi.aws.com"),
                csi_node_driver("efs.csi.aws.com"),
            ],
        },
    }
}

#[allow(dead_code)]
pub fn csi_driver() -> CsiDriver {
    CsiDriver {
        metadata: ObjectMeta::named("ebs.csi.aws.com"),
        spec: CsiDriverSpec {
            attach_required: Some(true),
            pod_info_on_mount: Some(false),
            volume_lifecycle_modes: vec!["Persistent".to_string()],
            storage_capacity: Some(true),
            fs_group_policy: Some("File".to_string()),
            token_requests: vec![],
            requires_republish: Some(false),
        },
    }
}

#[allow(dead_code)]
pub fn storage_capacity() -> CsiStorageCapacity {
    CsiStorageCapacity {
        metadata: ObjectMeta::named("capacity-zone-a").in_namespace("kube-system"),
        node_topology: Some(LabelSelector {
            match_labels: [(
                "topology.kubernetes.io/zone".to_string(),
                "us-east-1a".to_string(),
            )]
            .into(),
            match_expressions: vec![],
        }),
        storage_class_name: "fast-ssd".to_string(),
        capacity: Some("100Gi".parse().unwrap()),
    }
}
