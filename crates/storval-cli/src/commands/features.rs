//! Feature gate listing
//!
//! Usage: storval features [--config FILE] [--feature NAME=BOOL]...

use clap::Args;
use storval_core::{Feature, FeatureGate};

use crate::config::GateArgs;

#[derive(Debug, Args)]
pub struct FeaturesArgs {
    #[command(flatten)]
    pub gates: GateArgs,
}

/// Execute features command
pub fn execute(args: FeaturesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (features, _) = args.gates.resolve()?;
    for feature in Feature::ALL {
        println!(
            "{}={} (default {})",
            feature,
            features.enabled(feature),
            feature.default_enabled()
        );
    }
    Ok(())
}
