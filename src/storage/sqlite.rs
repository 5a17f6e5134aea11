//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, ToSql, params};
use rusqlite::types::ValueRef;
use crate::{Error, Result};
use crate::record::{FilterValue, IndexedColumn, NewRecord, UspaRecord};
use super::report::SchemaReport;
use super::schema::{self, Dialect, TABLE_NAME};

const SELECT_COLUMNS: &str = "id, division, weight_class, lift, name, kilos, pounds, date, location, event, status, has_record";

/// SQLite-backed store for `uspa_records`
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist) and apply the schema
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an existing database file as-is, without touching its schema
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatabaseNotFound(path.display().to_string()));
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Apply the schema. Every statement has an existence check, so repeated
    /// calls leave the database unchanged.
    pub fn initialize_schema(&self) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for stmt in schema::all_schema_statements(Dialect::Sqlite) {
            tracing::debug!("{}", stmt);
            tx.execute(&stmt, [])?;
        }
        tx.commit()?;
        tracing::info!("Schema for {} applied", TABLE_NAME);
        Ok(())
    }

    // ========== Record Operations ==========

    /// Insert a record and return the id assigned by the engine
    pub fn insert_record(&self, record: &NewRecord) -> Result<i64> {
        let mut columns = vec![
            "division", "weight_class", "lift", "name", "kilos", "pounds",
            "date", "location", "event", "status",
        ];
        let mut values: Vec<&dyn ToSql> = vec![
            &record.division,
            &record.weight_class,
            &record.lift,
            &record.name,
            &record.kilos,
            &record.pounds,
            &record.date,
            &record.location,
            &record.event,
            &record.status,
        ];

        // Omitted entirely so the column default applies
        if let Some(has_record) = &record.has_record {
            columns.push("has_record");
            values.push(has_record);
        }

        let placeholders: Vec<String> = (1..=values.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE_NAME,
            columns.join(", "),
            placeholders.join(", ")
        );

        self.conn.execute(&sql, values.as_slice())?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a record by id
    pub fn get_record(&self, id: i64) -> Result<Option<UspaRecord>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", SELECT_COLUMNS, TABLE_NAME);
        self.conn
            .query_row(&sql, [id], |row| self.row_to_record(row))
            .optional()
            .map_err(Into::into)
    }

    /// Find records whose indexed column equals `value`, ordered by id
    pub fn find_by(
        &self,
        column: IndexedColumn,
        value: &FilterValue,
        limit: Option<usize>,
    ) -> Result<Vec<UspaRecord>> {
        let param: &dyn ToSql = match (column.is_boolean(), value) {
            (true, FilterValue::Bool(b)) => b,
            (false, FilterValue::Text(s)) => s,
            _ => {
                return Err(Error::InvalidFilter(format!(
                    "value '{}' does not match the type of {}",
                    value, column
                )));
            }
        };

        // LIMIT -1 is unbounded in SQLite
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1 ORDER BY id LIMIT ?2",
            SELECT_COLUMNS,
            TABLE_NAME,
            column.as_str()
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params![param, limit], |row| self.row_to_record(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Count all records
    pub fn count_records(&self) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", TABLE_NAME);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Helper to convert a row to a UspaRecord.
    ///
    /// NUMERIC and BOOLEAN affinity still admit text written by other tools,
    /// so the weight and flag columns are decoded leniently.
    fn row_to_record(&self, row: &rusqlite::Row) -> rusqlite::Result<UspaRecord> {
        Ok(UspaRecord {
            id: row.get(0)?,
            division: row.get(1)?,
            weight_class: row.get(2)?,
            lift: row.get(3)?,
            name: row.get(4)?,
            kilos: decimal_from(row.get_ref(5)?),
            pounds: decimal_from(row.get_ref(6)?),
            date: row.get(7)?,
            location: row.get(8)?,
            event: row.get(9)?,
            status: row.get(10)?,
            has_record: flag_from(row.get_ref(11)?),
        })
    }

    // ========== Catalog Operations ==========

    /// Whether the records table exists
    pub fn table_exists(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [TABLE_NAME],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Column names of the records table, in table order
    pub fn table_columns(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
        let columns = stmt
            .query_map([TABLE_NAME], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(columns)
    }

    /// Explicitly created indexes on the records table (autoindexes have no SQL)
    pub fn index_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = ?1 AND sql IS NOT NULL ORDER BY name",
        )?;
        let names = stmt
            .query_map([TABLE_NAME], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Read the live catalog back into a report
    pub fn inspect(&self) -> Result<SchemaReport> {
        let table_present = self.table_exists()?;
        if !table_present {
            return Ok(SchemaReport {
                table_present,
                columns: Vec::new(),
                indexes: Vec::new(),
                rows: 0,
            });
        }

        Ok(SchemaReport {
            table_present,
            columns: self.table_columns()?,
            indexes: self.index_names()?,
            rows: self.count_records()?,
        })
    }
}

/// Unparseable text and blobs read as NULL
fn decimal_from(value: ValueRef<'_>) -> Option<f64> {
    match value {
        ValueRef::Integer(i) => Some(i as f64),
        ValueRef::Real(f) => Some(f),
        ValueRef::Text(t) => std::str::from_utf8(t).ok()?.trim().parse().ok(),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

/// Anything not recognisably true reads as false
fn flag_from(value: ValueRef<'_>) -> bool {
    match value {
        ValueRef::Integer(i) => i != 0,
        ValueRef::Real(f) => f != 0.0,
        ValueRef::Text(t) => matches!(
            std::str::from_utf8(t).map(|s| s.trim().to_lowercase()).as_deref(),
            Ok("true" | "t" | "1" | "yes" | "y")
        ),
        ValueRef::Null | ValueRef::Blob(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(name: &str, location: &str) -> NewRecord {
        NewRecord::new()
            .with_division("Open")
            .with_weight_class("82.5kg")
            .with_lift("Squat")
            .with_name(name)
            .with_weights(250.0, 551.2)
            .with_date("03/15/2024")
            .with_location(location)
            .with_event("raw-powerlifting")
            .with_status("drug-tested")
    }

    fn count_tables(store: &SqliteStore) -> i64 {
        store
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [TABLE_NAME],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.db");

        let store = SqliteStore::open(&path).unwrap();
        store.initialize_schema().unwrap();
        drop(store);

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(count_tables(&store), 1);
        assert_eq!(store.index_names().unwrap().len(), 6);
        assert!(store.inspect().unwrap().is_complete());
    }

    #[test]
    fn test_has_record_defaults_to_false() {
        let store = SqliteStore::open_in_memory().unwrap();

        let id = store.insert_record(&sample_record("Jane Doe", "texas")).unwrap();
        let record = store.get_record(id).unwrap().unwrap();
        assert!(!record.has_record);

        let raw: i64 = store
            .conn
            .query_row("SELECT has_record FROM uspa_records WHERE id = ?1", [id], |row| row.get(0))
            .unwrap();
        assert_eq!(raw, 0);

        let id = store
            .insert_record(&sample_record("John Roe", "texas").with_has_record(true))
            .unwrap();
        assert!(store.get_record(id).unwrap().unwrap().has_record);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let store = SqliteStore::open_in_memory().unwrap();

        let ids: Vec<i64> = (0..5)
            .map(|i| store.insert_record(&sample_record(&format!("lifter {}", i), "ohio")).unwrap())
            .collect();

        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(store.count_records().unwrap(), 5);
    }

    #[test]
    fn test_all_columns_accept_null() {
        let store = SqliteStore::open_in_memory().unwrap();

        let id = store.insert_record(&NewRecord::new()).unwrap();
        let record = store.get_record(id).unwrap().unwrap();

        assert_eq!(record.id, id);
        assert!(record.division.is_none());
        assert!(record.kilos.is_none());
        assert!(record.date.is_none());
        assert!(record.status.is_none());
        assert!(!record.has_record);
    }

    #[test]
    fn test_find_by_indexed_column() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.insert_record(&sample_record("A", "texas")).unwrap();
        store.insert_record(&sample_record("B", "national").with_has_record(true)).unwrap();
        store.insert_record(&sample_record("C", "texas").with_status("non-tested")).unwrap();

        let texas = store
            .find_by(IndexedColumn::Location, &FilterValue::Text("texas".into()), None)
            .unwrap();
        assert_eq!(texas.len(), 2);
        assert!(texas.iter().all(|r| r.location.as_deref() == Some("texas")));

        let tested = store
            .find_by(IndexedColumn::Status, &FilterValue::Text("drug-tested".into()), Some(10))
            .unwrap();
        assert_eq!(tested.len(), 2);

        let records = store
            .find_by(IndexedColumn::HasRecord, &FilterValue::Bool(true), None)
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("B"));

        let limited = store
            .find_by(IndexedColumn::WeightClass, &FilterValue::Text("82.5kg".into()), Some(1))
            .unwrap();
        assert_eq!(limited.len(), 1);

        let none = store
            .find_by(IndexedColumn::Location, &FilterValue::Text("Some Venue".into()), None)
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_find_by_rejects_mismatched_filter() {
        let store = SqliteStore::open_in_memory().unwrap();

        let err = store
            .find_by(IndexedColumn::HasRecord, &FilterValue::Text("true".into()), None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFilter(_)));

        let err = store
            .find_by(IndexedColumn::Event, &FilterValue::Bool(false), None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidFilter(_)));
    }

    #[test]
    fn test_weights_round_trip_as_decimals() {
        let store = SqliteStore::open_in_memory().unwrap();

        let id = store
            .insert_record(&NewRecord::new().with_weights(227.5, 501.5))
            .unwrap();
        let record = store.get_record(id).unwrap().unwrap();
        assert_eq!(record.kilos, Some(227.5));
        assert_eq!(record.pounds, Some(501.5));

        // Whole numbers are stored as integers under NUMERIC affinity
        let id = store.insert_record(&NewRecord::new().with_weights(200.0, 440.0)).unwrap();
        assert_eq!(store.get_record(id).unwrap().unwrap().kilos, Some(200.0));
    }

    #[test]
    fn test_externally_written_text_values() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO uspa_records (name, kilos, pounds, location, has_record) VALUES ('A', 'N/A', ' 501.5 ', 'texas', 'true')",
                [],
            )
            .unwrap();
        store
            .conn
            .execute(
                "INSERT INTO uspa_records (name, location, has_record) VALUES ('B', 'texas', 'no')",
                [],
            )
            .unwrap();

        let records = store
            .find_by(IndexedColumn::Location, &FilterValue::Text("texas".into()), None)
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].kilos.is_none());
        assert_eq!(records[0].pounds, Some(501.5));
        assert!(records[0].has_record);
        assert!(!records[1].has_record);
    }

    #[test]
    fn test_inspect_partial_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.db");

        {
            let conn = Connection::open(&path).unwrap();
            conn.execute(&schema::create_table_sql(Dialect::Sqlite), []).unwrap();
            conn.execute(&schema::create_index_sql(&schema::INDEXES[0], Dialect::Sqlite), [])
                .unwrap();
        }

        let store = SqliteStore::open_existing(&path).unwrap();
        let report = store.inspect().unwrap();
        assert!(report.table_present);
        assert!(report.missing_columns().is_empty());
        assert_eq!(report.missing_indexes().len(), 5);
        assert!(!report.is_complete());

        store.initialize_schema().unwrap();
        assert!(store.inspect().unwrap().is_complete());
    }

    #[test]
    fn test_open_existing_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteStore::open_existing(&dir.path().join("absent.db"));
        assert!(matches!(result, Err(Error::DatabaseNotFound(_))));
    }

    #[test]
    fn test_inspect_empty_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("PRAGMA user_version = 1")
            .unwrap();

        let store = SqliteStore::open_existing(&path).unwrap();
        let report = store.inspect().unwrap();
        assert!(!report.table_present);
        assert_eq!(report.rows, 0);
    }
}
