//! Feature gates consulted by validation rules
//!
//! Rules never read global state: every validator entry point receives a
//! `&dyn FeatureGate` and queries it synchronously.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Named toggles that change which validation rules are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Allows VolumeAttachments to carry an inline volume spec instead of a
    /// persistent volume name
    #[serde(rename = "CSIMigration")]
    CsiMigration,
    /// Makes `spec.storageCapacity` mandatory on CSIDriver objects
    #[serde(rename = "CSIStorageCapacity")]
    CsiStorageCapacity,
}

impl Feature {
    /// Every known feature, in stable order
    pub const ALL: [Feature; 2] = [Feature::CsiMigration, Feature::CsiStorageCapacity];

    /// Stable identifier used in configuration files and flags
    pub fn id(&self) -> &'static str {
        match self {
            Feature::CsiMigration => "CSIMigration",
            Feature::CsiStorageCapacity => "CSIStorageCapacity",
        }
    }

    /// State assumed when no override is configured
    pub fn default_enabled(&self) -> bool {
        match self {
            Feature::CsiMigration => true,
            Feature::CsiStorageCapacity => true,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a feature identifier is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFeature(pub String);

impl fmt::Display for UnknownFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown feature gate '{}'", self.0)
    }
}

impl std::error::Error for UnknownFeature {}

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.id() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// Synchronous, side-effect-free feature-gate oracle
pub trait FeatureGate {
    /// Whether `feature` is enabled
    fn enabled(&self, feature: Feature) -> bool;
}

impl<F> FeatureGate for F
where
    F: Fn(Feature) -> bool,
{
    fn enabled(&self, feature: Feature) -> bool {
        self(feature)
    }
}

/// Feature gate backed by explicit overrides on top of per-feature defaults
///
/// Deserializes from a table of `FeatureId = bool` entries, e.g. the
/// `[features]` section of a TOML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct FeatureSet {
    overrides: BTreeMap<Feature, bool>,
}

impl FeatureSet {
    /// A set with no overrides: every feature at its default state
    pub fn defaults() -> Self {
        Self::default()
    }

    /// A set with every known feature enabled
    pub fn all_enabled() -> Self {
        Self::from_states(Feature::ALL.into_iter().map(|f| (f, true)))
    }

    /// A set with every known feature disabled
    pub fn all_disabled() -> Self {
        Self::from_states(Feature::ALL.into_iter().map(|f| (f, false)))
    }

    fn from_states(states: impl IntoIterator<Item = (Feature, bool)>) -> Self {
        Self {
            overrides: states.into_iter().collect(),
        }
    }

    /// Return a copy with `feature` forced to `enabled`
    pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
        self.overrides.insert(feature, enabled);
        self
    }

    /// Force `feature` to `enabled`
    pub fn set(&mut self, feature: Feature, enabled: bool) {
        self.overrides.insert(feature, enabled);
    }

    /// Apply every override of `other` on top of this set
    pub fn merge(&mut self, other: &FeatureSet) {
        self.overrides
            .extend(other.overrides.iter().map(|(f, on)| (*f, *on)));
    }

    /// Effective state of every known feature, in stable order
    pub fn effective(&self) -> Vec<(Feature, bool)> {
        Feature::ALL
            .into_iter()
            .map(|feature| (feature, self.enabled(feature)))
            .collect()
    }
}

impl FeatureGate for FeatureSet {
    fn enabled(&self, feature: Feature) -> bool {
        self.overrides
            .get(&feature)
            .copied()
            .unwrap_or_else(|| feature.default_enabled())
    }
}

impl TryFrom<BTreeMap<String, bool>> for FeatureSet {
    type Error = UnknownFeature;

    fn try_from(raw: BTreeMap<String, bool>) -> Result<Self, Self::Error> {
        let mut overrides = BTreeMap::new();
        for (id, enabled) in raw {
            overrides.insert(id.parse::<Feature>()?, enabled);
        }
        Ok(Self { overrides })
    }
}

impl From<FeatureSet> for BTreeMap<String, bool> {
    fn from(set: FeatureSet) -> Self {
        set.overrides
            .into_iter()
            .map(|(feature, enabled)| (feature.id().to_string(), enabled))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_ids_round_trip_through_from_str() {
        for feature in Feature::ALL {
            assert_eq!(feature.id().parse::<Feature>(), Ok(feature));
        }
    }

    #[test]
    fn test_unknown_feature_is_rejected() {
        let err = "NotAFeature".parse::<Feature>().unwrap_err();
        assert_eq!(err, UnknownFeature("NotAFeature".to_string()));
        assert!(err.to_string().contains("NotAFeature"));
    }

    #[test]
    fn test_defaults_apply_without_overrides() {
        let set = FeatureSet::defaults();
        assert!(set.enabled(Feature::CsiMigration));
        assert!(set.enabled(Feature::CsiStorageCapacity));
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let set = FeatureSet::defaults().with(Feature::CsiMigration, false);
        assert!(!set.enabled(Feature::CsiMigration));
        assert!(set.enabled(Feature::CsiStorageCapacity));
    }

    #[test]
    fn test_merge_applies_other_overrides() {
        let mut base = FeatureSet::all_disabled();
        base.merge(&FeatureSet::defaults().with(Feature::CsiStorageCapacity, true));
        assert!(!base.enabled(Feature::CsiMigration));
        assert!(base.enabled(Feature::CsiStorageCapacity));
    }

    #[test]
    fn test_closure_is_a_feature_gate() {
        let only_migration = |f: Feature| f == Feature::CsiMigration;
        assert!(only_migration.enabled(Feature::CsiMigration));
        assert!(!only_migration.enabled(Feature::CsiStorageCapacity));
    }

    #[test]
    fn test_deserialize_from_toml_table() {
        let set: FeatureSet = toml::from_str("CSIMigration = false\n").unwrap();
        assert!(!set.enabled(Feature::CsiMigration));
        assert!(set.enabled(Feature::CsiStorageCapacity));
    }

    #[test]
    fn test_deserialize_rejects_unknown_ids() {
        let result: Result<FeatureSet, _> = serde_json::from_str(r#"{"Bogus": true}"#);
        assert!(result.is_err());
    }
}
