use crate::{CommandFailure, OutputMode, emit_success};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use owo_colors::OwoColorize;
use uspa_records::config::{self, UspaConfig};
use uspa_records::storage::schema::{self, TABLE_NAME};
use uspa_records::ui::{self, Icons, banner, info, section, success, summary_row};
use uspa_records::{Dialect, IndexedColumn, SchemaReport, SqliteStore};

fn print_report(report: &SchemaReport) {
    section("Indexes");
    println!("{}", ui::report_table(report));
    section("Summary");
    summary_row("Table:", if report.table_present { "present" } else { "missing" });
    summary_row("Columns:", &format!("{}/{}", report.columns.len(), schema::COLUMNS.len()));
    summary_row("Rows:", &report.rows.to_string());
    for column in report.missing_columns() {
        ui::warn(&format!("Missing column: {}", column));
    }
}

pub fn run_init(output_mode: OutputMode, database: &Path) -> anyhow::Result<()> {
    tracing::info!("Applying schema to {:?}", database);
    config::ensure_db_dir(database)?;
    let store = SqliteStore::open(database)?;
    let report = store.inspect()?;

    if output_mode.is_human() {
        ui::header(&format!("Initializing {}", TABLE_NAME));
        info("Database", &database.display().to_string());
        print_report(&report);
        println!();
        success("Schema applied (re-running is a no-op)");
    } else {
        emit_success(output_mode, "init", serde_json::to_value(&report)?)?;
    }
    Ok(())
}

pub fn run_schema(output_mode: OutputMode, dialect: Dialect) -> anyhow::Result<()> {
    let script = schema::render_script(dialect);

    if output_mode.is_human() {
        ui::sql(&script);
    } else {
        let data = serde_json::json!({
            "dialect": dialect,
            "statements": schema::all_schema_statements(dialect),
        });
        emit_success(output_mode, "schema", data)?;
    }
    Ok(())
}

pub fn run_inspect(output_mode: OutputMode, database: &Path) -> anyhow::Result<()> {
    let store = SqliteStore::open_existing(database)?;
    let report = store.inspect()?;

    if output_mode.is_human() {
        banner(
            &format!("{} {}", Icons::DATABASE, TABLE_NAME.bold().style(ui::theme().info.clone())),
            &database.display().to_string(),
        );
        print_report(&report);
        println!();
    }

    // Checked before emitting so JSON mode prints exactly one envelope
    if let Some(missing) = report.describe_missing() {
        return Err(CommandFailure {
            command: "inspect",
            message: format!("schema incomplete: {} (run `uspa-records init`)", missing),
            data: serde_json::to_value(&report)?,
        }
        .into());
    }

    if output_mode.is_human() {
        success("Table and all indexes present");
    } else {
        emit_success(output_mode, "inspect", serde_json::to_value(&report)?)?;
    }
    Ok(())
}

pub fn run_lookup(
    output_mode: OutputMode,
    database: &Path,
    column: &str,
    value: &str,
    limit: usize,
) -> anyhow::Result<()> {
    let column = IndexedColumn::from_str(column)?;
    let filter = column.parse_value(value)?;
    let store = SqliteStore::open_existing(database)?;
    let records = store.find_by(column, &filter, Some(limit))?;
    tracing::debug!("{} row(s) where {} = {}", records.len(), column, filter);

    if output_mode.is_human() {
        println!("{} {} = {} (limit: {})", Icons::SEARCH, column, filter, limit);
        if records.is_empty() {
            println!("{} No records found.", Icons::CROSS);
        } else {
            println!("{}", ui::records_table(&records));
            let flagged = records.iter().filter(|r| r.has_record).count();
            summary_row(&format!("{} Records:", Icons::TROPHY), &flagged.to_string());
            summary_row("Rows:", &records.len().to_string());
        }
    } else {
        emit_success(output_mode, "lookup", serde_json::to_value(&records)?)?;
    }
    Ok(())
}

pub fn run_config(output_mode: OutputMode, path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config::default_config_path);
    let config = UspaConfig {
        database: Some(config::default_database_path().display().to_string()),
        dialect: Some(Dialect::default()),
    };
    config::write_config(&path, &config, force)?;

    if output_mode.is_human() {
        success(&format!("Wrote {}", path.display()));
        println!("{} {}", Icons::GEAR, ui::dim(&toml::to_string_pretty(&config)?));
    } else {
        emit_success(output_mode, "config", serde_json::json!({ "path": path }))?;
    }
    Ok(())
}

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        banner(
            &format!("{}", "uspa-records".bold().style(ui::theme().info.clone())),
            &format!("Version {}", env!("CARGO_PKG_VERSION").bold())
        );
    } else {
        let data = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        });
        emit_success(output_mode, "version", data)?;
    }
    Ok(())
}
