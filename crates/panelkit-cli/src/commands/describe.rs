//! Describe command - declare a panel on a file and report its structure.

use std::path::PathBuf;

use colored::Colorize;
use panelkit::{PanelConfig, PanelSession, Severity};

use crate::cli::PanelFlags;
use crate::load;

use super::panel_from_flags;

pub fn run(
    file: PathBuf,
    flags: PanelFlags,
    force_uniqueness_check: bool,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = load::read_table(&file)?;
    let panel = panel_from_flags(&flags)?;

    let session =
        PanelSession::with_config(PanelConfig::new().with_announce_declarations(verbose));
    let (declared, report) = session.declare_with_report(table, panel, force_uniqueness_check)?;
    let Some(panel) = declared.panel() else {
        return Err("declaration did not attach panel metadata".into());
    };

    if json_output {
        let column_types: serde_json::Map<String, serde_json::Value> = panel
            .panel_columns()
            .into_iter()
            .map(|col| {
                let ty = declared.table().column_type(&col).unwrap_or_default();
                (col, serde_json::json!(ty))
            })
            .collect();

        let status = serde_json::json!({
            "file": file.display().to_string(),
            "rows": declared.row_count(),
            "columns": declared.table().column_count(),
            "panel": panel,
            "column_types": column_types,
            "duplicate_rows": report.duplicate_rows,
            "diagnostics": report.diagnostics,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {} ({} rows, {} columns)",
        "Panel structure for".cyan().bold(),
        file.display().to_string().white(),
        declared.row_count(),
        declared.table().column_count()
    );
    println!();

    println!("{}", panel.summary(&session.config().null_marker));
    for col in panel.panel_columns() {
        let ty = declared.table().column_type(&col).unwrap_or_default();
        println!("  {:<20} {}", col, ty.label().dimmed());
    }
    if panel.is_ordinal_time() && panel.t.is_some() {
        println!("  {}", "time is ordinal (d = 0)".dimmed());
    }

    match report.duplicate_rows {
        Some(0) => println!(
            "\n{} (i, t) uniquely identifies rows",
            "OK".green().bold()
        ),
        Some(n) => println!(
            "\n{} {} rows repeat an earlier (i, t) combination",
            "Warning:".yellow().bold(),
            n.to_string().white().bold()
        ),
        None => {}
    }

    for diag in &report.diagnostics {
        let label = match diag.severity {
            Severity::Warning => diag.severity.label().yellow(),
            Severity::Info => diag.severity.label().blue(),
        };
        println!("  [{}] {}", label, diag.message);
        if !diag.evidence.sample_rows.is_empty() {
            let rows: Vec<String> = diag
                .evidence
                .sample_rows
                .iter()
                .map(|r| r.to_string())
                .collect();
            println!("    {} {}", "rows:".dimmed(), rows.join(", "));
        }
    }

    Ok(())
}
