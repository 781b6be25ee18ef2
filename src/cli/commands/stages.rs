//! Stages command - Applicable stages and classification of a tank

use std::path::Path;

use crate::cli::workspace::{parse_level, sub_index, Workspace};
use crate::domain::{applicable_stages, is_inspection_stage};
use crate::errors::Result;

pub async fn run(cwd: Option<&Path>, level: &str, id: &str, sub: Option<usize>) -> Result<()> {
    let level = parse_level(level)?;
    let ws = Workspace::open(cwd)?;
    let tank = ws.tank(level, id)?;

    let (target_id, profile) = match sub_index(tank, sub)? {
        Some(index) => {
            let sub_tank = &tank.sub_tanks[index];
            (sub_tank.id.as_str(), ws.table.sub_tank_profile(level, tank, sub_tank))
        }
        None => (tank.id.as_str(), ws.table.tank_profile(level, tank)),
    };

    let pump_pit = if profile.pump_pit { " (pump pit)" } else { "" };
    println!("{}: {}{}", target_id, profile.category, pump_pit);
    if tank.is_grouped() && sub.is_none() {
        println!("Progress is tracked per sub-tank; pass --sub 1..={}", tank.sub_tanks.len());
    }
    for (i, stage) in applicable_stages(&profile).into_iter().enumerate() {
        let tag = if is_inspection_stage(stage) { "  [inspection]" } else { "" };
        println!("{:>3}. {}{}", i + 1, stage.label(), tag);
    }
    Ok(())
}
