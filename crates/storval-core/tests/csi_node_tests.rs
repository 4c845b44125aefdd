#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{csi_node, csi_node_driver, gates, kinds, opts, paths};
use storval_core::model::{Descriptor, VolumeNodeResources};
use storval_core::validation::csi_node::has_long_node_id;
use storval_core::{ErrorKind, Limit, ResourceValidator, ValidationOptions};

#[test]
fn test_valid_node_is_accepted() {
    assert!(csi_node().validate_create(&gates(), &opts()).is_empty());
}

#[test]
fn test_duplicate_driver_names_report_each_later_entry() {
    let mut node = csi_node();
    let mut again = csi_node_driver("ebs.csi.aws.com");
    again.node_id = "different".to_string();
    node.spec.drivers.push(again.clone());
    node.spec.drivers.push(again);
    let errs = node.validate_create(&gates(), &opts());
    assert_eq!(
        paths(&errs),
        vec!["spec.drivers[2].name", "spec.drivers[3].name"]
    );
    assert_eq!(kinds(&errs), vec![ErrorKind::Duplicate, ErrorKind::Duplicate]);
}

#[test]
fn test_identical_keys_with_different_fields_yield_single_duplicate() {
    let mut node = csi_node();
    node.spec.drivers.truncate(1);
    let mut second = csi_node_driver("ebs.csi.aws.com");
    second.topology_keys = vec!["example.com/rack".to_string()];
    node.spec.drivers.push(second);
    let errs = node.validate_create(&gates(), &opts());
    assert_eq!(paths(&errs), vec!["spec.drivers[1].name"]);
    assert_eq!(kinds(&errs), vec![ErrorKind::Duplicate]);
}

#[test]
fn test_driver_name_rules() {
    let mut node = csi_node();
    node.spec.drivers[0].name.clear();
    node.spec.drivers[1].name = format!("{}.example.com", "d".repeat(60));
    let errs = node.validate_create(&gates(), &opts());
    assert_eq!(
        paths(&errs),
        vec!["spec.drivers[0].name", "spec.drivers[1].name"]
    );
    assert_eq!(kinds(&errs), vec![ErrorKind::Required, ErrorKind::TooLong]);
    assert_eq!(errs.iter().nth(1).unwrap().limit(), Some(Limit::Bytes(63)));
}

#[test]
fn test_node_id_required_and_bounded() {
    let mut node = csi_node();
    node.spec.drivers[0].node_id.clear();
    node.spec.drivers[1].node_id = "n".repeat(193);
    let errs = node.validate_create(&gates(), &opts());
    assert_eq!(
        paths(&errs),
        vec!["spec.drivers[0].nodeID", "spec.drivers[1].nodeID"]
    );
    assert_eq!(kinds(&errs), vec![ErrorKind::Required, ErrorKind::Invalid]);
    assert_eq!(
        errs.iter().nth(1).unwrap().detail(),
        "must be 192 characters or less"
    );
}

#[test]
fn test_long_node_id_option() {
    let mut node = csi_node();
    node.spec.drivers[0].node_id = "n".repeat(256);
    let long = ValidationOptions::new().with_long_node_id(true);
    assert!(node.validate_create(&gates(), &long).is_empty());

    node.spec.drivers[0].node_id = "n".repeat(257);
    let errs = node.validate_create(&gates(), &long);
    assert_eq!(
        errs.iter().next().unwrap().detail(),
        "must be 256 characters or less"
    );
}

#[test]
fn test_has_long_node_id() {
    assert!(!has_long_node_id(&"n".repeat(192)));
    assert!(has_long_node_id(&"n".repeat(193)));
}

#[test]
fn test_negative_allocatable_count() {
    let mut node = csi_node();
    node.spec.drivers[0].allocatable = Some(VolumeNodeResources { count: Some(-1) });
    node.spec.drivers[1].allocatable = Some(VolumeNodeResources { count: None });
    let errs = node.validate_create(&gates(), &opts());
    assert_eq!(paths(&errs), vec!["spec.drivers[0].allocatable.count"]);
    assert_eq!(kinds(&errs), vec![ErrorKind::Invalid]);
}

#[test]
fn test_topology_key_errors_are_indexed() {
    let mut node = csi_node();
    node.spec.drivers[0].topology_keys = vec![
        "topology.kubernetes.io/zone".to_string(),
        String::new(),
        "topology.kubernetes.io/zone".to_string(),
        "bad key".to_string(),
    ];
    let errs = node.validate_create(&gates(), &opts());
    assert_eq!(
        paths(&errs),
        vec![
            "spec.drivers[0].topologyKeys[1]",
            "spec.drivers[0].topologyKeys[2]",
            "spec.drivers[0].topologyKeys[3]",
        ]
    );
    assert_eq!(
        kinds(&errs),
        vec![ErrorKind::Required, ErrorKind::Duplicate, ErrorKind::Invalid]
    );
}

#[test]
fn test_same_topology_key_in_different_drivers_is_fine() {
    let node = csi_node();
    assert_eq!(
        node.spec.drivers[0].topology_keys,
        node.spec.drivers[1].topology_keys
    );
    assert!(node.validate_create(&gates(), &opts()).is_empty());
}

#[test]
fn test_node_name_metadata() {
    let mut node = csi_node();
    node.metadata.name = "Node One".to_string();
    let errs = node.validate_create(&gates(), &opts());
    assert_eq!(paths(&errs), vec!["metadata.name"]);
}

// ===== UPDATE =====

#[test]
fn test_adding_and_removing_drivers_is_allowed() {
    let old = csi_node();
    let mut new = old.clone();
    new.spec.drivers.remove(0);
    new.spec.drivers.push(csi_node_driver("fsx.csi.aws.com"));
    assert!(new.validate_update(&old, &gates(), &opts()).is_empty());
}

#[test]
fn test_changing_existing_driver_is_immutable() {
    let old = csi_node();
    let mut new = old.clone();
    new.spec.drivers.reverse();
    new.spec.drivers[0].node_id = "moved".to_string();
    let errs = new.validate_update(&old, &gates(), &opts());
    assert_eq!(paths(&errs), vec!["spec.drivers[0]"]);
    let err = errs.iter().next().unwrap();
    assert_eq!(err.kind(), ErrorKind::Invalid);
    assert_eq!(err.detail(), "field is immutable");
}

#[test]
fn test_reordering_drivers_is_not_a_change() {
    let old = csi_node();
    let mut new = old.clone();
    new.spec.drivers.reverse();
    assert!(new.validate_update(&old, &gates(), &opts()).is_empty());
}

#[test]
fn test_existing_long_node_id_stays_accepted_on_update() {
    let mut old = csi_node();
    old.spec.drivers[0].node_id = "n".repeat(200);
    let mut new = old.clone();
    new.metadata.labels.insert("pool".to_string(), "a".to_string());

    let errs = new.validate_update(&old, &gates(), &opts());
    assert_eq!(kinds(&errs), vec![ErrorKind::Invalid]);

    let relaxed = opts().for_csi_node_update(&old);
    assert!(new.validate_update(&old, &gates(), &relaxed).is_empty());

    let old = Descriptor::CsiNode(old);
    let new = Descriptor::CsiNode(new);
    assert!(new.validate_update(&old, &gates(), &opts()).is_empty());
}
