//! Show command - Progress of a tank or one of its sub-tanks

use std::path::Path;

use serde::Serialize;

use crate::cli::print_json;
use crate::cli::workspace::{parse_level, sub_index, Workspace};
use crate::domain::{applicable_stages, color_status, CategoryTable, ColorStatus};
use crate::errors::Result;
use crate::schemas::{Level, Stage, StageStatus, StageTrack, Tank, TankCategory, TankProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRow {
    pub stage: Stage,
    /// `None` when the track has no entry for an applicable stage
    pub status: Option<StageStatus>,
}

/// Progress of one entity that carries a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackView {
    pub id: String,
    pub name: String,
    pub category: TankCategory,
    pub pump_pit: bool,
    pub current_stage: Option<Stage>,
    pub stages: Vec<StageRow>,
}

impl TrackView {
    fn new(id: &str, name: &str, profile: TankProfile, track: &StageTrack) -> Self {
        let stages = applicable_stages(&profile)
            .into_iter()
            .map(|stage| StageRow {
                stage,
                status: track.status_of(stage),
            })
            .collect();
        TrackView {
            id: id.to_string(),
            name: name.to_string(),
            category: profile.category,
            pump_pit: profile.pump_pit,
            current_stage: track.current_stage,
            stages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TankView {
    pub level: Level,
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub status: ColorStatus,
    pub tracks: Vec<TrackView>,
}

/// View of a tank; `index` narrows a grouped tank to one sub-tank
pub fn tank_view(
    level: Level,
    tank: &Tank,
    index: Option<usize>,
    table: &CategoryTable,
) -> TankView {
    let tracks = if tank.is_grouped() {
        tank.sub_tanks
            .iter()
            .enumerate()
            .filter(|(i, _)| index.map_or(true, |wanted| wanted == *i))
            .map(|(_, sub)| {
                let profile = table.sub_tank_profile(level, tank, sub);
                TrackView::new(&sub.id, &sub.name, profile, &sub.track)
            })
            .collect()
    } else {
        let profile = table.tank_profile(level, tank);
        vec![TrackView::new(&tank.id, &tank.name, profile, &tank.track)]
    };

    TankView {
        level,
        id: tank.id.clone(),
        name: tank.name.clone(),
        kind: tank.kind.clone(),
        location: tank.location.clone(),
        status: color_status(level, tank, table),
        tracks,
    }
}

fn print_track(view: &TrackView) {
    let pump_pit = if view.pump_pit { ", pump pit" } else { "" };
    println!("{} {} ({}{})", view.id, view.name, view.category, pump_pit);
    for row in &view.stages {
        let marker = if view.current_stage == Some(row.stage) { ">" } else { " " };
        let status = row
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "missing".to_string());
        println!("  {} {:<32} {}", marker, row.stage.label(), status);
    }
}

/// Show the tank, or sub-tank `sub` (1-based) of a grouped tank
pub async fn run(
    cwd: Option<&Path>,
    level: &str,
    id: &str,
    sub: Option<usize>,
    json: bool,
) -> Result<()> {
    let level = parse_level(level)?;
    let ws = Workspace::open(cwd)?;
    let tank = ws.tank(level, id)?;
    let index = sub_index(tank, sub)?;

    let view = tank_view(level, tank, index, &ws.table);
    if json {
        return print_json(&view);
    }

    println!("{} - {} [{}]", view.id, view.name, view.status);
    println!("Type: {}  Location: {}  Level: {}", view.kind, view.location, level.short_name());
    for track in &view.tracks {
        println!();
        print_track(track);
    }
    Ok(())
}
