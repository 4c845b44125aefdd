//! Per-call validation options.

use serde::{Deserialize, Serialize};

use crate::model::CsiNode;
use crate::validation::csi_node::has_long_node_id;

/// Explicit knobs that relax or tighten individual rules
///
/// Options are passed to every entry point; nothing is read from process
/// state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Accept CSINode driver `nodeID` values up to 256 bytes instead of 192
    pub allow_long_node_id: bool,
    /// Apply the additional VolumeAttachment checks of the v1 API
    pub enforce_v1_attachment_rules: bool,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_long_node_id(mut self, allow: bool) -> Self {
        self.allow_long_node_id = allow;
        self
    }

    pub fn with_v1_attachment_rules(mut self, enforce: bool) -> Self {
        self.enforce_v1_attachment_rules = enforce;
        self
    }

    /// Options for updating `old`: objects that already store a long node ID
    /// keep being accepted even when long IDs are not otherwise allowed
    pub fn for_csi_node_update(self, old: &CsiNode) -> Self {
        let already_long = old
            .spec
            .drivers
            .iter()
            .any(|driver| has_long_node_id(&driver.node_id));
        self.with_long_node_id(self.allow_long_node_id || already_long)
    }
}
