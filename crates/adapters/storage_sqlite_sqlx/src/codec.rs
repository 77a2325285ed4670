//! Column decoding helpers shared by the row wrappers.

use std::str::FromStr;

use hbnb_domain::time::{self, Timestamp};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Read a text column and parse it, reporting failures as decode errors.
pub(crate) fn parse_column<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.try_get(column)?;
    T::from_str(&text).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Read an RFC 3339 timestamp column.
pub(crate) fn timestamp_column(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let text: String = row.try_get(column)?;
    time::parse(&text).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
