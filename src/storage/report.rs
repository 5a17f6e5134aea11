//! Catalog inspection results

use serde::Serialize;
use super::schema::{COLUMNS, INDEXES, TABLE_NAME};

/// What the live catalog holds for `uspa_records`, compared against the
/// declared schema
#[derive(Debug, Clone, Serialize)]
pub struct SchemaReport {
    pub table_present: bool,
    /// Column names found on the table
    pub columns: Vec<String>,
    /// Explicit index names found on the table
    pub indexes: Vec<String>,
    pub rows: usize,
}

impl SchemaReport {
    /// Declared columns absent from the table
    pub fn missing_columns(&self) -> Vec<&'static str> {
        COLUMNS
            .iter()
            .map(|c| c.name)
            .filter(|name| !self.columns.iter().any(|c| c == name))
            .collect()
    }

    /// Declared indexes absent from the table
    pub fn missing_indexes(&self) -> Vec<&'static str> {
        INDEXES
            .iter()
            .map(|i| i.name)
            .filter(|name| !self.indexes.iter().any(|i| i == name))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.table_present && self.missing_columns().is_empty() && self.missing_indexes().is_empty()
    }

    /// What is missing, or `None` when the schema is complete
    pub fn describe_missing(&self) -> Option<String> {
        if !self.table_present {
            return Some(format!("table {} is missing", TABLE_NAME));
        }

        let mut parts = Vec::new();
        let columns = self.missing_columns();
        if !columns.is_empty() {
            parts.push(format!("missing columns [{}]", columns.join(", ")));
        }
        let indexes = self.missing_indexes();
        if !indexes.is_empty() {
            parts.push(format!("missing indexes [{}]", indexes.join(", ")));
        }

        if parts.is_empty() { None } else { Some(parts.join("; ")) }
    }
}

impl std::fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Schema Report:")?;
        writeln!(f, "  Table {}: {}", TABLE_NAME, if self.table_present { "present" } else { "missing" })?;
        writeln!(f, "  Columns: {}/{}", COLUMNS.len() - self.missing_columns().len(), COLUMNS.len())?;
        writeln!(f, "  Indexes: {}/{}", INDEXES.len() - self.missing_indexes().len(), INDEXES.len())?;
        write!(f, "  Rows: {}", self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_report() -> SchemaReport {
        SchemaReport {
            table_present: true,
            columns: COLUMNS.iter().map(|c| c.name.to_string()).collect(),
            indexes: INDEXES.iter().map(|i| i.name.to_string()).collect(),
            rows: 0,
        }
    }

    #[test]
    fn test_complete_report() {
        let report = full_report();
        assert!(report.is_complete());
        assert!(report.describe_missing().is_none());
        assert!(report.to_string().contains("Indexes: 6/6"));
    }

    #[test]
    fn test_missing_parts() {
        let mut report = full_report();
        report.indexes.retain(|i| i != "idx_uspa_records_status");
        report.columns.retain(|c| c != "pounds");

        assert!(!report.is_complete());
        assert_eq!(report.missing_indexes(), vec!["idx_uspa_records_status"]);
        assert_eq!(report.missing_columns(), vec!["pounds"]);
        assert_eq!(
            report.describe_missing().unwrap(),
            "missing columns [pounds]; missing indexes [idx_uspa_records_status]"
        );
    }

    #[test]
    fn test_missing_columns_only() {
        let mut report = full_report();
        report.columns.retain(|c| c != "date");

        let message = report.describe_missing().unwrap();
        assert_eq!(message, "missing columns [date]");
        assert!(!message.contains("indexes"));
    }

    #[test]
    fn test_absent_table() {
        let report = SchemaReport {
            table_present: false,
            columns: Vec::new(),
            indexes: Vec::new(),
            rows: 0,
        };
        assert!(!report.is_complete());
        assert_eq!(report.missing_indexes().len(), 6);
        assert!(report.to_string().contains("missing"));
        assert_eq!(report.describe_missing().unwrap(), "table uspa_records is missing");
    }
}
