//! List command - Tanks with their color status and current stage

use std::path::Path;

use serde::Serialize;

use crate::cli::print_json;
use crate::cli::workspace::{parse_level, Workspace};
use crate::domain::{
    color_status, default_active_index, display_stage, has_completed_ladder_installation,
    CategoryTable, ColorStatus,
};
use crate::errors::Result;
use crate::schemas::{Level, Site, Stage, LEVELS};

/// One line of the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    pub level: Level,
    pub id: String,
    pub name: String,
    pub status: ColorStatus,
    pub current_stage: Option<Stage>,
    pub sub_tanks: usize,
    pub ladder_installed: bool,
}

/// Rows for the given levels, in level then id order
pub fn list_rows(site: &Site, table: &CategoryTable, levels: &[Level]) -> Vec<ListRow> {
    levels
        .iter()
        .flat_map(|&level| {
            site.level(level).values().map(move |tank| {
                let active = tank
                    .is_grouped()
                    .then(|| default_active_index(level, tank, table));
                ListRow {
                    level,
                    id: tank.id.clone(),
                    name: tank.name.clone(),
                    status: color_status(level, tank, table),
                    current_stage: display_stage(tank, active),
                    sub_tanks: tank.sub_tanks.len(),
                    ladder_installed: has_completed_ladder_installation(tank),
                }
            })
        })
        .collect()
}

/// List tanks, optionally restricted to one level
pub async fn run(cwd: Option<&Path>, level: Option<&str>, json: bool) -> Result<()> {
    let levels = match level {
        Some(level) => vec![parse_level(level)?],
        None => LEVELS.to_vec(),
    };

    let ws = Workspace::open(cwd)?;
    let rows = list_rows(&ws.site, &ws.table, &levels);

    if json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No tanks found.");
        return Ok(());
    }

    println!(
        "{:<5} {:<22} {:<28} {:<14} {:<32} {}",
        "Level", "ID", "Name", "Status", "Stage", "Ladder"
    );
    for row in &rows {
        let stage = row
            .current_stage
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "-".to_string());
        let id = if row.sub_tanks > 0 {
            format!("{} [{}]", row.id, row.sub_tanks)
        } else {
            row.id.clone()
        };
        let ladder = if row.ladder_installed { "yes" } else { "" };
        println!(
            "{:<5} {:<22} {:<28} {:<14} {:<32} {}",
            row.level.short_name(),
            id,
            row.name,
            row.status.to_string(),
            stage,
            ladder
        );
    }
    Ok(())
}
