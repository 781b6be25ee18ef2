//! The loaded data root every command works against

use std::path::{Path, PathBuf};

use crate::config::{classifier, load_config};
use crate::domain::CategoryTable;
use crate::errors::{Result, TanktrackError};
use crate::fs::{self, JsonDirStore};
use crate::schemas::{Config, Level, Site, Stage, StageTrack, Tank};

/// Config, store and site of one data root, with every tank classified
#[derive(Debug)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
    pub store: JsonDirStore,
    pub site: Site,
    pub table: CategoryTable,
}

impl Workspace {
    /// Find the data root above `cwd` and load it
    pub fn open(cwd: Option<&Path>) -> Result<Self> {
        let root = fs::find_data_root(&fs::resolve_cwd(cwd))?;
        Self::open_at(root)
    }

    pub fn open_at(root: PathBuf) -> Result<Self> {
        let config = load_config(&root)?;
        let store = JsonDirStore::open(&root);
        let site = fs::load_site(&store).map_err(|e| {
            TanktrackError::wrap(e, format!("Loading tanks from {}", store.dir().display()))
        })?;
        let table = CategoryTable::build(classifier(&config), &site);
        tracing::debug!(
            root = %root.display(),
            tanks = site.tank_count(),
            classified = table.len(),
            "opened workspace"
        );
        Ok(Workspace {
            root,
            config,
            store,
            site,
            table,
        })
    }

    pub fn tank(&self, level: Level, id: &str) -> Result<&Tank> {
        self.site
            .level(level)
            .get(id)
            .ok_or_else(|| TanktrackError::TankNotFound {
                level: level.short_name().to_string(),
                id: id.to_string(),
            })
    }

    /// Persist a tank and replace it in the loaded site
    pub fn save_tank(&mut self, level: Level, tank: Tank) -> Result<()> {
        fs::save(&self.store, level, &tank.id, &tank)?;
        self.table.register(level, &tank);
        self.site.insert(level, tank);
        Ok(())
    }
}

pub fn parse_level(input: &str) -> Result<Level> {
    input.parse::<Level>().map_err(TanktrackError::InvalidLevel)
}

pub fn parse_stage(input: &str) -> Result<Stage> {
    input.parse::<Stage>().map_err(TanktrackError::InvalidStage)
}

/// Map a 1-based `--sub` number to a sub-tank index
pub fn sub_index(tank: &Tank, sub: Option<usize>) -> Result<Option<usize>> {
    let Some(number) = sub else {
        return Ok(None);
    };
    if !tank.is_grouped() {
        return Err(TanktrackError::SubTankNotFound(format!("{} has no sub-tanks", tank.id)));
    }
    if number == 0 || number > tank.sub_tanks.len() {
        return Err(TanktrackError::SubTankNotFound(format!(
            "{} has sub-tanks 1..={}, got {}",
            tank.id,
            tank.sub_tanks.len(),
            number
        )));
    }
    Ok(Some(number - 1))
}

/// Like `sub_index`, but a grouped tank must name a sub-tank
pub fn target_index(tank: &Tank, sub: Option<usize>) -> Result<Option<usize>> {
    let index = sub_index(tank, sub)?;
    if tank.is_grouped() && index.is_none() {
        return Err(TanktrackError::SubTankNotFound(format!(
            "{} is grouped; pass --sub 1..={}",
            tank.id,
            tank.sub_tanks.len()
        )));
    }
    Ok(index)
}

/// The track and id a sub-tank index refers to
pub fn target(tank: &Tank, index: Option<usize>) -> (&str, &StageTrack) {
    match index.and_then(|i| tank.sub_tanks.get(i)) {
        Some(sub) => (&sub.id, &sub.track),
        None => (&tank.id, &tank.track),
    }
}
