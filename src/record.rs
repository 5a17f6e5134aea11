//! Record types for the `uspa_records` table
//!
//! A record is one competitive-lifting result. Apart from the engine-assigned
//! `id`, every column is nullable and unconstrained; the values mirror what the
//! records site exports (division, weight class, lift, lifter, weights, date)
//! plus the page coordinates it was collected from (location, event, status).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A stored row of `uspa_records`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UspaRecord {
    /// Assigned by the storage engine on insert, never changes
    pub id: i64,
    pub division: Option<String>,
    pub weight_class: Option<String>,
    pub lift: Option<String>,
    /// Athlete name
    pub name: Option<String>,
    pub kilos: Option<f64>,
    pub pounds: Option<f64>,
    /// Free-form date text as exported by the records site
    pub date: Option<String>,
    pub location: Option<String>,
    pub event: Option<String>,
    pub status: Option<String>,
    /// A stored NULL reads back as `false`
    pub has_record: bool,
}

/// Insert payload for a new row.
///
/// `id` is never supplied. `has_record: None` leaves the column out of the
/// insert so the column default (`false`) applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub division: Option<String>,
    pub weight_class: Option<String>,
    pub lift: Option<String>,
    pub name: Option<String>,
    pub kilos: Option<f64>,
    pub pounds: Option<f64>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub event: Option<String>,
    pub status: Option<String>,
    pub has_record: Option<bool>,
}

impl NewRecord {
    /// Create an empty record (every column NULL or defaulted)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = Some(division.into());
        self
    }

    pub fn with_weight_class(mut self, weight_class: impl Into<String>) -> Self {
        self.weight_class = Some(weight_class.into());
        self
    }

    pub fn with_lift(mut self, lift: impl Into<String>) -> Self {
        self.lift = Some(lift.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set both weights at once
    pub fn with_weights(mut self, kilos: f64, pounds: f64) -> Self {
        self.kilos = Some(kilos);
        self.pounds = Some(pounds);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_has_record(mut self, has_record: bool) -> Self {
        self.has_record = Some(has_record);
        self
    }
}

/// Columns that carry a secondary index and can be used for lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexedColumn {
    Location,
    Event,
    Status,
    Division,
    WeightClass,
    HasRecord,
}

impl IndexedColumn {
    /// Column name as it appears in the table
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexedColumn::Location => "location",
            IndexedColumn::Event => "event",
            IndexedColumn::Status => "status",
            IndexedColumn::Division => "division",
            IndexedColumn::WeightClass => "weight_class",
            IndexedColumn::HasRecord => "has_record",
        }
    }

    /// Get all indexed columns, in index declaration order
    pub fn all() -> &'static [IndexedColumn] {
        &[
            IndexedColumn::Location,
            IndexedColumn::Event,
            IndexedColumn::Status,
            IndexedColumn::Division,
            IndexedColumn::WeightClass,
            IndexedColumn::HasRecord,
        ]
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, IndexedColumn::HasRecord)
    }

    /// Parse a raw command-line value into a filter for this column.
    ///
    /// Text columns take the value verbatim; `has_record` needs a boolean.
    pub fn parse_value(&self, raw: &str) -> Result<FilterValue> {
        if !self.is_boolean() {
            return Ok(FilterValue::Text(raw.to_string()));
        }

        match raw.trim().to_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" => Ok(FilterValue::Bool(true)),
            "false" | "f" | "0" | "no" | "n" => Ok(FilterValue::Bool(false)),
            _ => Err(Error::InvalidFilter(format!(
                "{} expects a boolean, got '{}'",
                self.as_str(),
                raw
            ))),
        }
    }
}

impl FromStr for IndexedColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "location" => Ok(IndexedColumn::Location),
            "event" => Ok(IndexedColumn::Event),
            "status" => Ok(IndexedColumn::Status),
            "division" => Ok(IndexedColumn::Division),
            "weight_class" | "weight-class" | "weightclass" => Ok(IndexedColumn::WeightClass),
            "has_record" | "has-record" | "hasrecord" => Ok(IndexedColumn::HasRecord),
            _ => Err(Error::InvalidColumn(s.to_string())),
        }
    }
}

impl std::fmt::Display for IndexedColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value to match against an indexed column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
}

impl std::fmt::Display for FilterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::Text(s) => write!(f, "{}", s),
            FilterValue::Bool(b) => write!(f, "{}", b),
        }
    }
}
