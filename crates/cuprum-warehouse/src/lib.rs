mod migrations;
mod runs;

use std::fs;
use std::path::PathBuf;

use cuprum_core::{SeriesColumn, SeriesRow, SeriesTable, TradingDay};
use duckdb::{Connection, ToSql};
use thiserror::Error;

pub use runs::RunRecord;

const INSERT_CHUNK_ROWS: usize = 500;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    DuckDb(#[from] duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("table '{table}' does not exist")]
    TableMissing { table: String },

    #[error("table '{table}' has an unusable schema: {detail}")]
    Schema { table: String, detail: String },
}

/// Store location, threaded explicitly into every component entry point.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("data/cuprum.duckdb"),
        }
    }
}

/// Single-connection DuckDB store holding the named price tables.
///
/// Single-writer by contract: callers must run pipelines serially against
/// one database file; concurrent runs are not guarded against.
pub struct PriceStore {
    connection: Connection,
}

impl PriceStore {
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let connection = Connection::open(&config.db_path)?;
        migrations::apply_migrations(&connection)?;
        Ok(Self { connection })
    }

    pub fn table_exists(&self, name: &str) -> Result<bool, StoreError> {
        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = '{}'",
            escape_sql_string(name)
        );
        let count: i64 = self.connection.query_row(sql.as_str(), [], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Wholesale table replacement: stage rows into a shadow table, then
    /// drop-and-rename inside one transaction. On any failure the previous
    /// table survives intact; an absent table stays a valid retriable state.
    pub fn replace_table(&self, name: &str, table: &SeriesTable) -> Result<(), StoreError> {
        ensure_table_name(name)?;
        let staging = format!("{name}__staging");

        self.connection.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<(), StoreError> {
            // Leftover staging from an interrupted run
            self.connection
                .execute_batch(&format!("DROP TABLE IF EXISTS {}", quote_identifier(&staging)))?;

            let mut create = format!(
                "CREATE TABLE {} (date DATE",
                quote_identifier(&staging)
            );
            for column in table.columns() {
                create.push_str(&format!(", {} DOUBLE", quote_identifier(&column.name)));
            }
            create.push(')');
            self.connection.execute_batch(&create)?;

            for chunk_start in (0..table.len()).step_by(INSERT_CHUNK_ROWS) {
                let chunk_end = (chunk_start + INSERT_CHUNK_ROWS).min(table.len());
                let mut insert = format!("INSERT INTO {} VALUES ", quote_identifier(&staging));
                for index in chunk_start..chunk_end {
                    if index > chunk_start {
                        insert.push(',');
                    }
                    insert.push_str(&format!(
                        "(DATE '{}'",
                        escape_sql_string(&table.dates()[index].format_iso())
                    ));
                    for column in table.columns() {
                        insert.push(',');
                        insert.push_str(&sql_value_f64(column.values[index]));
                    }
                    insert.push(')');
                }
                self.connection.execute_batch(&insert)?;
            }

            self.connection
                .execute_batch(&format!("DROP TABLE IF EXISTS {}", quote_identifier(name)))?;
            self.connection.execute_batch(&format!(
                "ALTER TABLE {} RENAME TO {}",
                quote_identifier(&staging),
                quote_identifier(name)
            ))?;
            Ok(())
        })();

        finalize_transaction(&self.connection, result)
    }

    /// All rows of `name`, ordered ascending by date.
    pub fn read_all(&self, name: &str) -> Result<SeriesTable, StoreError> {
        let value_columns = self.value_columns(name)?;

        let select = build_select(name, &value_columns, "ASC", None);
        let mut statement = self.connection.prepare(&select)?;
        let mut cursor = statement.query([] as [&dyn ToSql; 0])?;

        let mut dates = Vec::new();
        let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); value_columns.len()];
        while let Some(row) = cursor.next()? {
            let date: String = row.get(0)?;
            dates.push(parse_stored_date(name, &date)?);
            for (index, column_values) in values.iter_mut().enumerate() {
                column_values.push(row.get::<_, Option<f64>>(index + 1)?);
            }
        }

        let columns = value_columns
            .into_iter()
            .zip(values)
            .map(|(column_name, column_values)| SeriesColumn::new(column_name, column_values))
            .collect();
        SeriesTable::new(dates, columns).map_err(|error| StoreError::Schema {
            table: name.to_owned(),
            detail: error.to_string(),
        })
    }

    /// Row with the maximum date, or `None` when the table is empty.
    pub fn read_latest(&self, name: &str) -> Result<Option<SeriesRow>, StoreError> {
        let value_columns = self.value_columns(name)?;

        let select = build_select(name, &value_columns, "DESC", Some(1));
        let mut statement = self.connection.prepare(&select)?;
        let mut cursor = statement.query([] as [&dyn ToSql; 0])?;

        let Some(row) = cursor.next()? else {
            return Ok(None);
        };

        let date: String = row.get(0)?;
        let date = parse_stored_date(name, &date)?;
        let mut pairs = Vec::with_capacity(value_columns.len());
        for (index, column_name) in value_columns.into_iter().enumerate() {
            pairs.push((column_name, row.get::<_, Option<f64>>(index + 1)?));
        }
        Ok(Some(SeriesRow { date, values: pairs }))
    }

    pub fn count_rows(&self, name: &str) -> Result<i64, StoreError> {
        if !self.table_exists(name)? {
            return Err(StoreError::TableMissing {
                table: name.to_owned(),
            });
        }
        let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(name));
        let count: i64 = self.connection.query_row(sql.as_str(), [], |row| row.get(0))?;
        Ok(count)
    }

    /// Value column names in stored order, checking presence of the table
    /// and its date spine.
    fn value_columns(&self, name: &str) -> Result<Vec<String>, StoreError> {
        if !self.table_exists(name)? {
            return Err(StoreError::TableMissing {
                table: name.to_owned(),
            });
        }

        let sql = format!(
            "SELECT column_name FROM information_schema.columns WHERE table_name = '{}' ORDER BY ordinal_position",
            escape_sql_string(name)
        );
        let mut statement = self.connection.prepare(&sql)?;
        let mut cursor = statement.query([] as [&dyn ToSql; 0])?;
        let mut all_columns = Vec::new();
        while let Some(row) = cursor.next()? {
            all_columns.push(row.get::<_, String>(0)?);
        }

        if !all_columns.iter().any(|column| column == "date") {
            return Err(StoreError::Schema {
                table: name.to_owned(),
                detail: String::from("missing 'date' column"),
            });
        }

        Ok(all_columns
            .into_iter()
            .filter(|column| column != "date")
            .collect())
    }
}

fn build_select(name: &str, value_columns: &[String], order: &str, limit: Option<usize>) -> String {
    let mut select = String::from("SELECT CAST(date AS VARCHAR)");
    for column in value_columns {
        select.push_str(&format!(", {}", quote_identifier(column)));
    }
    select.push_str(&format!(
        " FROM {} ORDER BY date {order}",
        quote_identifier(name)
    ));
    if let Some(limit) = limit {
        select.push_str(&format!(" LIMIT {limit}"));
    }
    select
}

fn parse_stored_date(table: &str, value: &str) -> Result<TradingDay, StoreError> {
    TradingDay::parse(value).map_err(|error| StoreError::Schema {
        table: table.to_owned(),
        detail: error.to_string(),
    })
}

fn ensure_table_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        && name.chars().next().is_some_and(|ch| !ch.is_ascii_digit());
    if !valid {
        return Err(StoreError::Schema {
            table: name.to_owned(),
            detail: String::from("table name must be an identifier of ascii letters, digits, and underscores"),
        });
    }
    Ok(())
}

fn finalize_transaction<T>(
    connection: &Connection,
    result: Result<T, StoreError>,
) -> Result<T, StoreError> {
    match result {
        Ok(value) => {
            connection.execute_batch("COMMIT")?;
            Ok(value)
        }
        Err(error) => {
            let _ = connection.execute_batch("ROLLBACK");
            Err(error)
        }
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub(crate) fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

fn sql_value_f64(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => value.to_string(),
        _ => String::from("NULL"),
    }
}
