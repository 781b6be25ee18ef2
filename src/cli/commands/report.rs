//! Report command - Tanks ready for inspection across all levels

use std::path::Path;

use crate::cli::print_json;
use crate::cli::workspace::Workspace;
use crate::domain::inspection_report;
use crate::errors::Result;

pub async fn run(cwd: Option<&Path>, json: bool) -> Result<()> {
    let ws = Workspace::open(cwd)?;
    let report = inspection_report(&ws.site, &ws.table);
    tracing::debug!(
        ready = report.ready.len(),
        pending = report.pending_count,
        complete = report.complete_count,
        "built inspection report"
    );

    if json {
        return print_json(&report);
    }

    println!("Inspection report ({})", report.generated_at);
    if report.ready.is_empty() {
        println!("No tanks are waiting for inspection.");
    }
    for entry in &report.ready {
        println!("{:<5} {:<22} {}", entry.level.short_name(), entry.tank_id, entry.tank_name);
        for waiting in &entry.waiting {
            println!("      {:<24} {}", waiting.id, waiting.stage.label());
        }
    }
    println!(
        "{} ready, {} in progress, {} complete",
        report.ready.len(),
        report.pending_count,
        report.complete_count
    );
    Ok(())
}
