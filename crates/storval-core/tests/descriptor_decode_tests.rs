#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{gates, kinds, paths};
use storval_core::{Document, ErrorKind, ResourceValidator, ValidationOptions};

const STORAGE_CLASS_YAML: &str = r#"
apiVersion: storage.k8s.io/v1
kind: StorageClass
metadata:
  name: fast-ssd
provisioner: ebs.csi.aws.com
parameters:
  type: gp3
reclaimPolicy: Retain
volumeBindingMode: WaitForFirstConsumer
allowedTopologies:
- matchLabelExpressions:
  - key: topology.kubernetes.io/zone
    values: [us-east-1a, us-east-1b]
"#;

fn attachment_json(pv_name: &str) -> String {
    format!(
        r#"{{
  "apiVersion": "storage.k8s.io/v1",
  "kind": "VolumeAttachment",
  "metadata": {{"name": "csi-0123"}},
  "spec": {{
    "attacher": "ebs.csi.aws.com",
    "nodeName": "node-1",
    "source": {{"persistentVolumeName": "{}"}}
  }}
}}"#,
        pv_name
    )
}

#[test]
fn test_decoded_storage_class_is_accepted() {
    let doc = Document::decode_yaml(STORAGE_CLASS_YAML).unwrap();
    assert!(doc.is_storage_v1());
    let errs = doc
        .descriptor
        .validate_create(&gates(), &ValidationOptions::new());
    assert!(errs.is_empty(), "unexpected errors: {}", errs);
}

#[test]
fn test_decoded_storage_class_without_binding_mode() {
    let yaml = STORAGE_CLASS_YAML.replace("volumeBindingMode: WaitForFirstConsumer\n", "");
    let doc = Document::decode_yaml(&yaml).unwrap();
    let errs = doc
        .descriptor
        .validate_create(&gates(), &ValidationOptions::new());
    assert_eq!(paths(&errs), vec!["volumeBindingMode"]);
    assert_eq!(kinds(&errs), vec![ErrorKind::Required]);
}

#[test]
fn test_v1_rules_tighten_persistent_volume_name() {
    let doc = Document::decode_json(&attachment_json("PV_Upper")).unwrap();
    let base = doc
        .descriptor
        .validate_create(&gates(), &ValidationOptions::new());
    assert!(base.is_empty(), "unexpected errors: {}", base);

    let v1 = doc.descriptor.validate_create(
        &gates(),
        &ValidationOptions::new().with_v1_attachment_rules(doc.is_storage_v1()),
    );
    assert!(!v1.is_empty());
    assert!(paths(&v1)
        .iter()
        .all(|p| p == "spec.source.persistentVolumeName"));
}

#[test]
fn test_update_between_decoded_documents() {
    let old = Document::decode_yaml(STORAGE_CLASS_YAML).unwrap();
    let new = Document::decode_yaml(&STORAGE_CLASS_YAML.replace("Retain", "Delete")).unwrap();
    let errs = new
        .descriptor
        .validate_update(&old.descriptor, &gates(), &ValidationOptions::new());
    assert_eq!(paths(&errs), vec!["reclaimPolicy"]);
    assert_eq!(kinds(&errs), vec![ErrorKind::Forbidden]);
}

#[test]
fn test_update_across_kinds_is_internal() {
    let old = Document::decode_yaml(STORAGE_CLASS_YAML).unwrap();
    let new = Document::decode_json(&attachment_json("pv-1")).unwrap();
    let errs = new
        .descriptor
        .validate_update(&old.descriptor, &gates(), &ValidationOptions::new());
    assert_eq!(paths(&errs), vec!["kind"]);
    assert_eq!(kinds(&errs), vec![ErrorKind::Internal]);
}

#[test]
fn test_decode_failures_carry_stable_codes() {
    let cases = [
        ("kind: [not, a, string]\n", "ERR_DECODE"),
        ("kind: PersistentVolume\n", "ERR_UNKNOWN_KIND"),
        ("kind: StorageClass\nprovisioner: [1, 2]\n", "ERR_DECODE"),
    ];
    for (input, code) in cases {
        let err = Document::decode_yaml(input).unwrap_err();
        assert_eq!(err.code(), code, "input {:?}", input);
    }
}
