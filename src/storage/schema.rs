//! Database schema definitions
//!
//! The table is declared once as column and index descriptors and rendered
//! per dialect. Every statement carries an existence check so the whole
//! script can be re-run as a no-op.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Name of the records table
pub const TABLE_NAME: &str = "uspa_records";

/// Semantic column types, mapped to concrete SQL types per dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-incrementing integer primary key
    Serial,
    Text,
    Decimal,
    /// Boolean defaulting to false
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub ty: ColumnType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub column: &'static str,
}

const fn col(name: &'static str, ty: ColumnType) -> ColumnDef {
    ColumnDef { name, ty }
}

const fn idx(name: &'static str, column: &'static str) -> IndexDef {
    IndexDef { name, column }
}

/// Columns of `uspa_records`, in declaration order
pub const COLUMNS: &[ColumnDef] = &[
    col("id", ColumnType::Serial),
    col("division", ColumnType::Text),
    col("weight_class", ColumnType::Text),
    col("lift", ColumnType::Text),
    col("name", ColumnType::Text),
    col("kilos", ColumnType::Decimal),
    col("pounds", ColumnType::Decimal),
    // Free-form text, not a temporal type
    col("date", ColumnType::Text),
    col("location", ColumnType::Text),
    col("event", ColumnType::Text),
    col("status", ColumnType::Text),
    col("has_record", ColumnType::Flag),
];

/// Single-column secondary indexes
pub const INDEXES: &[IndexDef] = &[
    idx("idx_uspa_records_location", "location"),
    idx("idx_uspa_records_event", "event"),
    idx("idx_uspa_records_status", "status"),
    idx("idx_uspa_records_division", "division"),
    idx("idx_uspa_records_weight_class", "weight_class"),
    idx("idx_uspa_records_has_record", "has_record"),
];

/// SQL flavour a schema script is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Sqlite,
    /// Managed Postgres, the production target
    #[default]
    Postgres,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
        }
    }

    /// Column type clause for this dialect
    pub fn column_type(&self, ty: ColumnType) -> &'static str {
        match (self, ty) {
            (Dialect::Sqlite, ColumnType::Serial) => "INTEGER PRIMARY KEY AUTOINCREMENT",
            (Dialect::Postgres, ColumnType::Serial) => "BIGSERIAL PRIMARY KEY",
            (_, ColumnType::Text) => "TEXT",
            (_, ColumnType::Decimal) => "NUMERIC",
            (_, ColumnType::Flag) => "BOOLEAN DEFAULT FALSE",
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "postgres" | "postgresql" | "pg" | "supabase" => Ok(Dialect::Postgres),
            _ => Err(Error::InvalidDialect(s.to_string())),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `CREATE TABLE IF NOT EXISTS` for the records table
pub fn create_table_sql(dialect: Dialect) -> String {
    let columns: Vec<String> = COLUMNS
        .iter()
        .map(|c| format!("    {} {}", c.name, dialect.column_type(c.ty)))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        TABLE_NAME,
        columns.join(",\n")
    )
}

/// `CREATE INDEX IF NOT EXISTS` for one index. Both dialects share the syntax.
pub fn create_index_sql(index: &IndexDef, _dialect: Dialect) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {}({})",
        index.name, TABLE_NAME, index.column
    )
}

/// All schema creation statements, table first
pub fn all_schema_statements(dialect: Dialect) -> Vec<String> {
    let mut stmts = vec![create_table_sql(dialect)];
    stmts.extend(INDEXES.iter().map(|i| create_index_sql(i, dialect)));
    stmts
}

/// Statements joined into a script for a database console
pub fn render_script(dialect: Dialect) -> String {
    let mut script = format!("-- {} schema ({})\n\n", TABLE_NAME, dialect);
    for stmt in all_schema_statements(dialect) {
        script.push_str(&stmt);
        script.push_str(";\n\n");
    }
    script.truncate(script.trim_end().len());
    script.push('\n');
    script
}
