//! `SQLite` implementation of the state repository.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hbnb_app::ports::Repository;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::StateId;
use hbnb_domain::record::Record;
use hbnb_domain::state::State;
use hbnb_domain::time;

use crate::codec::{parse_column, timestamp_column};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`State`].
struct Wrapper(State);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<State> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(State {
            id: parse_column(row, "id")?,
            name: row.try_get("name")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO states (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM states WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM states ORDER BY rowid";
const COUNT: &str = "SELECT COUNT(*) FROM states";
const UPDATE: &str = "UPDATE states SET name = ?, updated_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM states WHERE id = ?";

/// `SQLite`-backed state repository.
#[derive(Clone)]
pub struct SqliteStateRepository {
    pool: SqlitePool,
}

impl SqliteStateRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<State> for SqliteStateRepository {
    async fn create(&self, state: State) -> Result<State, HbnbError> {
        sqlx::query(INSERT)
            .bind(state.id.to_string())
            .bind(&state.name)
            .bind(time::format(state.created_at))
            .bind(time::format(state.updated_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(state)
    }

    async fn get_by_id(&self, id: StateId) -> Result<Option<State>, HbnbError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<State>, HbnbError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn count(&self) -> Result<usize, HbnbError> {
        let (count,): (i64,) = sqlx::query_as(COUNT)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn update(&self, state: State) -> Result<State, HbnbError> {
        let result = sqlx::query(UPDATE)
            .bind(&state.name)
            .bind(time::format(state.updated_at))
            .bind(state.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::new(State::KIND, state.id).into());
        }
        Ok(state)
    }

    async fn delete(&self, id: StateId) -> Result<(), HbnbError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
