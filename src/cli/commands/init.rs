//! Init command - Create the data directory with seed tanks

use std::path::Path;

use crate::config::classifier;
use crate::errors::{Result, TanktrackError};
use crate::fs::{self, JsonDirStore};
use crate::schemas::Config;
use crate::seed::seed_site;

/// Write the default config and the seed site under `<cwd>/.tanktrack`
pub async fn run(cwd: Option<&Path>, force: bool) -> Result<()> {
    let root = fs::resolve_cwd(cwd);
    let data_dir = fs::get_data_dir(&root);

    if data_dir.exists() && !force {
        return Err(TanktrackError::ConfigError(format!(
            "{} already exists; use --force to reset it",
            data_dir.display()
        )));
    }

    let config = Config::default();
    fs::write_config(&root, &config)?;

    let site = seed_site(&classifier(&config));
    let store = JsonDirStore::open(&root);
    fs::save_site(&store, &site)?;

    tracing::info!(path = %data_dir.display(), tanks = site.tank_count(), "initialized");
    println!(
        "Initialized {} with {} tanks",
        data_dir.display(),
        site.tank_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::workspace::Workspace;
    use crate::schemas::{Level, Stage, StageStatus};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_config_and_levels() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false).await.unwrap();

        assert!(fs::get_config_path(temp.path()).exists());
        for key in ["n00Tanks", "n10Tanks", "n20Tanks", "n30Tanks"] {
            assert!(fs::get_levels_dir(temp.path()).join(format!("{}.json", key)).exists());
        }

        let ws = Workspace::open(Some(temp.path())).unwrap();
        assert!(ws.site.tank_count() > 0);
        let tank = ws.tank(Level::N00, "N00-T-001").unwrap();
        assert_eq!(tank.track.status_of(Stage::FormworkRemoval), Some(StageStatus::InProgress));
    }

    #[tokio::test]
    async fn test_init_refuses_existing_without_force() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false).await.unwrap();

        let err = run(Some(temp.path()), false).await.unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
        run(Some(temp.path()), true).await.unwrap();
    }
}
