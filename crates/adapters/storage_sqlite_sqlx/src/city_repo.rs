//! `SQLite` implementation of [`CityRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hbnb_app::ports::{CityRepository, Repository};
use hbnb_domain::city::City;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{CityId, StateId};
use hbnb_domain::record::Record;
use hbnb_domain::time;

use crate::codec::{parse_column, timestamp_column};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`City`].
struct Wrapper(City);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<City> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(City {
            id: parse_column(row, "id")?,
            state_id: parse_column(row, "state_id")?,
            name: row.try_get("name")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO cities (id, state_id, name, created_at, updated_at) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM cities WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM cities ORDER BY rowid";
const SELECT_BY_STATE: &str = "SELECT * FROM cities WHERE state_id = ? ORDER BY rowid";
const COUNT: &str = "SELECT COUNT(*) FROM cities";
const UPDATE: &str = "UPDATE cities SET name = ?, updated_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM cities WHERE id = ?";

/// `SQLite`-backed city repository.
#[derive(Clone)]
pub struct SqliteCityRepository {
    pool: SqlitePool,
}

impl SqliteCityRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<City> for SqliteCityRepository {
    async fn create(&self, city: City) -> Result<City, HbnbError> {
        sqlx::query(INSERT)
            .bind(city.id.to_string())
            .bind(city.state_id.to_string())
            .bind(&city.name)
            .bind(time::format(city.created_at))
            .bind(time::format(city.updated_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(city)
    }

    async fn get_by_id(&self, id: CityId) -> Result<Option<City>, HbnbError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<City>, HbnbError> {
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

    async fn update(&self, city: City) -> Result<City, HbnbError> {
        let result = sqlx::query(UPDATE)
            .bind(&city.name)
            .bind(time::format(city.updated_at))
            .bind(city.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::new(City::KIND, city.id).into());
        }
        Ok(city)
    }

    async fn delete(&self, id: CityId) -> Result<(), HbnbError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

impl CityRepository for SqliteCityRepository {
    async fn find_by_state(&self, state_id: StateId) -> Result<Vec<City>, HbnbError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_STATE)
            .bind(state_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}
