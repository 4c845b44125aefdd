//! Label, label-selector and topology-selector rules.

use std::collections::{BTreeMap, BTreeSet};

use super::naming::{label_value, qualified_name};
use super::{invalid_each, UniquenessDetector};
use crate::field::{ErrorList, FieldError, FieldPath};
use crate::model::{
    LabelSelector, LabelSelectorRequirement, TopologySelectorLabelRequirement,
    TopologySelectorTerm,
};

/// Canonical form of a topology term: each key with its value set
///
/// Two terms are the same selector when their canonical forms are equal,
/// whatever the order of requirements and values.
pub type CanonicalTerm = BTreeMap<String, BTreeSet<String>>;

/// Label keys are qualified names
pub fn validate_label_name(name: &str, path: &FieldPath) -> ErrorList {
    invalid_each(path, name, qualified_name(name))
}

/// Keys must be qualified names and values label values; errors are
/// addressed at the entry's key
pub fn validate_labels(labels: &BTreeMap<String, String>, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    for (key, value) in labels {
        let entry_path = path.key(key);
        errs.append(validate_label_name(key, &entry_path));
        errs.append(invalid_each(&entry_path, value, label_value(value)));
    }
    errs
}

fn validate_topology_requirement(
    req: &TopologySelectorLabelRequirement,
    path: &FieldPath,
) -> (BTreeSet<String>, ErrorList) {
    let mut errs = ErrorList::new();
    let values_path = path.child("values");
    if req.values.is_empty() {
        errs.push(FieldError::required(&values_path, ""));
    }
    let mut seen = UniquenessDetector::exact();
    for (j, value) in req.values.iter().enumerate() {
        errs.extend(seen.observe(value.as_str(), &values_path.index(j), value.as_str()));
    }
    errs.append(validate_label_name(&req.key, &path.child("key")));
    (req.values.iter().cloned().collect(), errs)
}

/// Validate one topology term and return its canonical form
pub fn validate_topology_selector_term(
    term: &TopologySelectorTerm,
    path: &FieldPath,
) -> (CanonicalTerm, ErrorList) {
    let mut errs = ErrorList::new();
    let mut canonical = CanonicalTerm::new();
    let exprs_path = path.child("matchLabelExpressions");
    let mut keys = UniquenessDetector::exact();
    for (j, req) in term.match_label_expressions.iter().enumerate() {
        let req_path = exprs_path.index(j);
        let (values, req_errs) = validate_topology_requirement(req, &req_path);
        errs.append(req_errs);
        errs.extend(keys.observe(req.key.as_str(), &req_path.child("key"), req.key.as_str()));
        canonical.insert(req.key.clone(), values);
    }
    (canonical, errs)
}

/// Validate every term, then flag terms equal to an earlier one at
/// `path[i].matchLabelExpressions`
pub fn validate_allowed_topologies(terms: &[TopologySelectorTerm], path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    let mut seen = UniquenessDetector::structural();
    for (i, term) in terms.iter().enumerate() {
        let term_path = path.index(i);
        let (canonical, term_errs) = validate_topology_selector_term(term, &term_path);
        errs.append(term_errs);
        errs.extend(seen.observe(canonical, &term_path.child("matchLabelExpressions"), ""));
    }
    errs
}

const OP_IN: &str = "In";
const OP_NOT_IN: &str = "NotIn";
const OP_EXISTS: &str = "Exists";
const OP_DOES_NOT_EXIST: &str = "DoesNotExist";

fn validate_selector_requirement(req: &LabelSelectorRequirement, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    match req.operator.as_str() {
        OP_IN | OP_NOT_IN => {
            if req.values.is_empty() {
                errs.push(FieldError::required(
                    &path.child("values"),
                    "must be specified when `operator` is 'In' or 'NotIn'",
                ));
            }
        }
        OP_EXISTS | OP_DOES_NOT_EXIST => {
            if !req.values.is_empty() {
                errs.push(FieldError::forbidden(
                    &path.child("values"),
                    "may not be specified when `operator` is 'Exists' or 'DoesNotExist'",
                ));
            }
        }
        other => errs.push(FieldError::invalid(
            &path.child("operator"),
            other,
            "not a valid selector operator",
        )),
    }
    errs.append(validate_label_name(&req.key, &path.child("key")));
    errs
}

/// Validate an optional label selector; absence is accepted
pub fn validate_label_selector(selector: Option<&LabelSelector>, path: &FieldPath) -> ErrorList {
    let mut errs = ErrorList::new();
    let Some(selector) = selector else {
        return errs;
    };
    let exprs_path = path.child("matchExpressions");
    for (i, req) in selector.match_expressions.iter().enumerate() {
        errs.append(validate_selector_requirement(req, &exprs_path.index(i)));
    }
    errs.append(validate_labels(&selector.match_labels, &path.child("matchLabels")));
    errs
}
