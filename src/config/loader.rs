//! Configuration loading with defaults

use std::path::Path;

use crate::domain::Classifier;
use crate::errors::{Result, TanktrackError};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the data root, falling back to defaults.
///
/// Fields missing from config.json take their default values. A config
/// that cannot classify anything (a limited family with no markers, an
/// empty D-wall marker) is rejected.
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root)?;
    validate_config(&config)?;
    tracing::debug!(
        undo_policy = ?config.undo_policy,
        overrides = config.classification.overrides.len(),
        "loaded config"
    );
    Ok(config)
}

/// Reject rule sets that would match every tank
pub fn validate_config(config: &Config) -> Result<()> {
    let rules = &config.classification;
    if rules.dwall_marker.trim().is_empty() {
        return Err(TanktrackError::ConfigError("dwall_marker must not be empty".to_string()));
    }
    if rules.primary_sub_tank_suffix.trim().is_empty() {
        return Err(TanktrackError::ConfigError(
            "primary_sub_tank_suffix must not be empty".to_string(),
        ));
    }
    if let Some(family) = rules
        .limited_families
        .iter()
        .find(|f| f.all_of.is_empty() || f.all_of.iter().any(|m| m.is_empty()))
    {
        return Err(TanktrackError::ConfigError(format!(
            "limited family '{}' needs non-empty markers",
            family.name
        )));
    }
    Ok(())
}

/// Classifier built from the configured rules
pub fn classifier(config: &Config) -> Classifier {
    Classifier::new(config.classification.clone())
}
