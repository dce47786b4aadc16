//! In-memory columnar batch exchanged between pipeline stages and the store.

use serde::{Deserialize, Serialize};

use crate::{TradingDay, ValidationError};

/// Provider column label, possibly two-level (primary plus sub-label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLabel {
    pub primary: String,
    pub detail: Option<String>,
}

impl ColumnLabel {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            detail: None,
        }
    }

    pub fn nested(primary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            detail: Some(detail.into()),
        }
    }
}

/// Named numeric column; a missing observation is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl SeriesColumn {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// One date spine plus ordered value columns, all of spine length.
///
/// Column order is provider order and is significant: it breaks ties in
/// price-column resolution and fixes the persisted table layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesTable {
    dates: Vec<TradingDay>,
    columns: Vec<SeriesColumn>,
}

impl SeriesTable {
    pub fn new(
        dates: Vec<TradingDay>,
        columns: Vec<SeriesColumn>,
    ) -> Result<Self, ValidationError> {
        for column in &columns {
            if column.values.len() != dates.len() {
                return Err(ValidationError::ColumnLengthMismatch {
                    column: column.name.clone(),
                    len: column.values.len(),
                    expected: dates.len(),
                });
            }
        }
        Ok(Self { dates, columns })
    }

    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[TradingDay] {
        &self.dates
    }

    pub fn columns(&self) -> &[SeriesColumn] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> impl Iterator<Item = &mut SeriesColumn> {
        self.columns.iter_mut()
    }

    pub fn column(&self, name: &str) -> Option<&SeriesColumn> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| column.name.clone())
            .collect()
    }

    /// Rename a column in place; returns false when `from` does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.columns.iter_mut().find(|column| column.name == from) {
            Some(column) => {
                column.name = to.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn push_column(&mut self, column: SeriesColumn) -> Result<(), ValidationError> {
        if column.values.len() != self.dates.len() {
            return Err(ValidationError::ColumnLengthMismatch {
                column: column.name,
                len: column.values.len(),
                expected: self.dates.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }
}

/// One materialized row read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub date: TradingDay,
    pub values: Vec<(String, Option<f64>)>,
}

impl SeriesRow {
    /// Value of a named column; an absent column reads as a missing value.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(column, _)| column == name)
            .and_then(|(_, value)| *value)
    }
}
