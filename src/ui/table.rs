use tabled::{settings::Style, Table, Tabled};
use crate::record::UspaRecord;
use crate::storage::SchemaReport;
use crate::storage::schema::INDEXES;

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Division")]
    division: String,
    #[tabled(rename = "Class")]
    weight_class: String,
    #[tabled(rename = "Lift")]
    lift: String,
    #[tabled(rename = "Kg")]
    kilos: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Record")]
    has_record: String,
}

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

impl From<&UspaRecord> for RecordRow {
    fn from(r: &UspaRecord) -> Self {
        Self {
            id: r.id,
            name: cell(&r.name),
            division: cell(&r.division),
            weight_class: cell(&r.weight_class),
            lift: cell(&r.lift),
            kilos: r.kilos.map(|k| k.to_string()).unwrap_or_else(|| "-".to_string()),
            date: cell(&r.date),
            location: cell(&r.location),
            has_record: if r.has_record { "yes".to_string() } else { "no".to_string() },
        }
    }
}

pub fn records_table(records: &[UspaRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct IndexRow {
    #[tabled(rename = "Index")]
    name: String,
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Present")]
    present: String,
}

/// One row per declared index, marking whether the catalog has it
pub fn report_table(report: &SchemaReport) -> String {
    let missing = report.missing_indexes();
    let rows: Vec<IndexRow> = INDEXES
        .iter()
        .map(|i| IndexRow {
            name: i.name.to_string(),
            column: i.column.to_string(),
            present: if missing.contains(&i.name) { "no".to_string() } else { "yes".to_string() },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FilterValue, IndexedColumn, NewRecord};
    use crate::storage::SqliteStore;

    #[test]
    fn test_records_table() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .insert_record(&NewRecord::new().with_name("Jane Doe").with_location("texas"))
            .unwrap();
        let records = store
            .find_by(IndexedColumn::Location, &FilterValue::Text("texas".into()), None)
            .unwrap();

        let table = records_table(&records);
        assert!(table.contains("Jane Doe"));
        assert!(table.contains("Location"));
        assert!(records_table(&[]).is_empty());
    }

    #[test]
    fn test_report_table() {
        let store = SqliteStore::open_in_memory().unwrap();
        let table = report_table(&store.inspect().unwrap());
        assert!(table.contains("idx_uspa_records_weight_class"));
        assert!(!table.contains(" no "));
    }
}
