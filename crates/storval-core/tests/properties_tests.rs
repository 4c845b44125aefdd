#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{csi_driver, csi_node, csi_node_driver, gates, opts, storage_class, volume_attachment};
use proptest::prelude::*;
use std::collections::BTreeMap;
use storval_core::model::{AttachmentSource, Descriptor, TokenRequest};
use storval_core::rules::{MapQuota, UniquenessDetector};
use storval_core::{ErrorKind, FeatureSet, FieldPath, Limit, ResourceValidator};

fn any_descriptor() -> impl Strategy<Value = Descriptor> {
    prop_oneof![
        Just(Descriptor::StorageClass(storage_class())),
        Just(Descriptor::VolumeAttachment(volume_attachment())),
        Just(Descriptor::CsiNode(csi_node())),
        Just(Descriptor::CsiDriver(csi_driver())),
    ]
}

fn any_gates() -> impl Strategy<Value = FeatureSet> {
    (any::<bool>(), any::<bool>()).prop_map(|(migration, capacity)| {
        FeatureSet::defaults()
            .with(storval_core::Feature::CsiMigration, migration)
            .with(storval_core::Feature::CsiStorageCapacity, capacity)
    })
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent(
        descriptor in any_descriptor(),
        gates in any_gates(),
        name in "[a-zA-Z0-9._-]{0,12}",
    ) {
        let mut descriptor = descriptor;
        match &mut descriptor {
            Descriptor::StorageClass(d) => d.metadata.name = name,
            Descriptor::VolumeAttachment(d) => d.metadata.name = name,
            Descriptor::CsiNode(d) => d.metadata.name = name,
            Descriptor::CsiDriver(d) => d.metadata.name = name,
            Descriptor::CsiStorageCapacity(d) => d.metadata.name = name,
        }
        let first = descriptor.validate_create(&gates, &opts());
        let second = descriptor.validate_create(&gates, &opts());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_n_duplicates_yield_n_minus_one_errors(n in 1usize..40) {
        let mut detector = UniquenessDetector::exact();
        let path = FieldPath::new("items");
        let errors: Vec<_> = (0..n)
            .filter_map(|i| detector.observe("same", &path.index(i), "same"))
            .collect();
        prop_assert_eq!(errors.len(), n - 1);
        prop_assert!(errors.iter().all(|e| e.path() != &path.index(0)));
    }

    #[test]
    fn prop_duplicate_driver_names(n in 1usize..12) {
        let mut node = csi_node();
        node.spec.drivers = (0..n).map(|_| csi_node_driver("ebs.csi.aws.com")).collect();
        let errs = node.validate_create(&gates(), &opts());
        prop_assert_eq!(errs.len(), n - 1);
        prop_assert!(errs.iter().all(|e| e.kind() == ErrorKind::Duplicate));
    }

    #[test]
    fn prop_duplicate_token_audiences(n in 1usize..12) {
        let mut driver = csi_driver();
        driver.spec.token_requests = (0..n)
            .map(|_| TokenRequest { audience: "vault".to_string(), expiration_seconds: Some(3600) })
            .collect();
        let errs = driver.validate_create(&gates(), &opts());
        prop_assert_eq!(errs.len(), n - 1);
    }

    #[test]
    fn prop_count_stage_short_circuits(extra in 1usize..64, value_len in 0usize..2048) {
        let map: BTreeMap<String, String> = (0..512 + extra)
            .map(|i| (format!("k{}", i), "v".repeat(value_len)))
            .collect();
        let errs = MapQuota::PROVISIONER_PARAMETERS.enforce(&map, &FieldPath::new("parameters"));
        prop_assert_eq!(errs.len(), 1);
        prop_assert_eq!(errs.iter().next().unwrap().limit(), Some(Limit::Entries(512)));
    }

    #[test]
    fn prop_tagged_source_never_breaks_exclusivity(pv_name in "[a-z0-9]([-a-z0-9]{0,20}[a-z0-9])?") {
        let mut attachment = volume_attachment();
        attachment.spec.source = AttachmentSource::PersistentVolume(pv_name).into();
        let errs = attachment.validate_create(&gates(), &opts());
        let source = FieldPath::new("spec").child("source");
        prop_assert!(errs.at(&source).is_empty());
    }

    #[test]
    fn prop_surfaced_paths_are_never_root(
        descriptor in any_descriptor(),
        gates in any_gates(),
    ) {
        let mut descriptor = descriptor;
        if let Descriptor::StorageClass(sc) = &mut descriptor {
            sc.provisioner.clear();
            sc.volume_binding_mode = None;
        }
        let errs = descriptor.validate_create(&gates, &opts());
        prop_assert!(errs.iter().all(|e| !e.path().is_root()));
    }
}

#[test]
fn test_update_with_mismatched_kinds_is_internal() {
    let old = Descriptor::CsiDriver(csi_driver());
    let new = Descriptor::CsiNode(csi_node());
    let errs = new.validate_update(&old, &gates(), &opts());
    assert_eq!(errs.len(), 1);
    let err = errs.iter().next().unwrap();
    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.path().render(), "kind");
}

#[test]
fn test_descriptor_dispatch_matches_direct_call() {
    let sc = storage_class();
    let mut broken = sc.clone();
    broken.provisioner.clear();
    let direct = broken.validate_update(&sc, &gates(), &opts());
    let dispatched = Descriptor::StorageClass(broken)
        .validate_update(&Descriptor::StorageClass(sc), &gates(), &opts());
    assert_eq!(direct, dispatched);
}
