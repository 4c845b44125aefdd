//! TOML configuration and `--feature` overrides

use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use storval_core::{Feature, FeatureSet, Result, StorvalError, ValidationOptions};

/// Shape of the configuration file
///
/// ```toml
/// [features]
/// CSIMigration = true
///
/// [options]
/// allow_long_node_id = false
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub features: FeatureSet,
    pub options: OptionsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsSection {
    pub allow_long_node_id: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StorvalError::io(path.display().to_string(), &e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| StorvalError::Config {
            message: e.to_string(),
        })
    }
}

/// Flags shared by every command that evaluates feature gates
#[derive(Debug, Args)]
pub struct GateArgs {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override a feature gate, e.g. --feature CSIMigration=false
    #[arg(long = "feature", value_name = "NAME=BOOL")]
    pub features: Vec<String>,
}

impl GateArgs {
    /// Load the configuration file, if any, and apply flag overrides on top
    pub fn resolve(&self) -> Result<(FeatureSet, ValidationOptions)> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        let mut features = config.features;
        for raw in &self.features {
            let (feature, enabled) = parse_feature_flag(raw)?;
            features.set(feature, enabled);
        }
        let options =
            ValidationOptions::new().with_long_node_id(config.options.allow_long_node_id);
        Ok((features, options))
    }
}

/// Parse `NAME=BOOL`
pub fn parse_feature_flag(raw: &str) -> Result<(Feature, bool)> {
    let (name, value) = raw.split_once('=').ok_or_else(|| StorvalError::Config {
        message: format!("expected NAME=BOOL, got '{}'", raw),
    })?;
    let feature: Feature = name.trim().parse()?;
    let enabled = value.trim().parse::<bool>().map_err(|_| StorvalError::Config {
        message: format!("feature {} must be true or false, got '{}'", feature, value),
    })?;
    Ok((feature, enabled))
}
