//! `SQLite` implementation of the amenity repository.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hbnb_app::ports::Repository;
use hbnb_domain::amenity::Amenity;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::AmenityId;
use hbnb_domain::record::Record;
use hbnb_domain::time;

use crate::codec::{parse_column, timestamp_column};
use crate::error::StorageError;

struct Wrapper(Amenity);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Amenity> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Amenity {
            id: parse_column(row, "id")?,
            name: row.try_get("name")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO amenities (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM amenities WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM amenities ORDER BY rowid";
const COUNT: &str = "SELECT COUNT(*) FROM amenities";
const UPDATE: &str = "UPDATE amenities SET name = ?, updated_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM amenities WHERE id = ?";

/// `SQLite`-backed amenity repository.
#[derive(Clone)]
pub struct SqliteAmenityRepository {
    pool: SqlitePool,
}

impl SqliteAmenityRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Amenity> for SqliteAmenityRepository {
    async fn create(&self, amenity: Amenity) -> Result<Amenity, HbnbError> {
        sqlx::query(INSERT)
            .bind(amenity.id.to_string())
            .bind(&amenity.name)
            .bind(time::format(amenity.created_at))
            .bind(time::format(amenity.updated_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(amenity)
    }

    async fn get_by_id(&self, id: AmenityId) -> Result<Option<Amenity>, HbnbError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Amenity>, HbnbError> {
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

    async fn update(&self, amenity: Amenity) -> Result<Amenity, HbnbError> {
        let result = sqlx::query(UPDATE)
            .bind(&amenity.name)
            .bind(time::format(amenity.updated_at))
            .bind(amenity.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::new(Amenity::KIND, amenity.id).into());
        }
        Ok(amenity)
    }

    async fn delete(&self, id: AmenityId) -> Result<(), HbnbError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteAmenityRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteAmenityRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn should_round_trip_amenity() {
        let repo = setup().await;
        let wifi = Amenity::builder().name("Wifi").build().unwrap();

        repo.create(wifi.clone()).await.unwrap();

        assert_eq!(repo.get_by_id(wifi.id).await.unwrap(), Some(wifi));
    }

    #[tokio::test]
    async fn should_rename_amenity() {
        let repo = setup().await;
        let mut wifi = Amenity::builder().name("Wifi").build().unwrap();
        repo.create(wifi.clone()).await.unwrap();

        wifi.name = "Fiber".to_string();
        repo.update(wifi.clone()).await.unwrap();

        let fetched = repo.get_by_id(wifi.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Fiber");
    }
}
