//! `SQLite` implementation of [`PlaceRepository`].
//!
//! Linked amenity ids live in a JSON array column; lookups by amenity go
//! through `json_each`.

use std::collections::BTreeSet;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hbnb_app::ports::{PlaceRepository, Repository};
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{AmenityId, CityId, PlaceId, UserId};
use hbnb_domain::place::Place;
use hbnb_domain::record::Record;
use hbnb_domain::time;

use crate::codec::{parse_column, timestamp_column};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Place`].
struct Wrapper(Place);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Place> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let amenities_json: String = row.try_get("amenities")?;
        let amenities: BTreeSet<AmenityId> = serde_json::from_str(&amenities_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Place {
            id: parse_column(row, "id")?,
            city_id: parse_column(row, "city_id")?,
            user_id: parse_column(row, "user_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            number_rooms: row.try_get("number_rooms")?,
            number_bathrooms: row.try_get("number_bathrooms")?,
            max_guest: row.try_get("max_guest")?,
            price_by_night: row.try_get("price_by_night")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            amenities,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO places (id, city_id, user_id, name, description, number_rooms, number_bathrooms,
        max_guest, price_by_night, latitude, longitude, amenities, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM places WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM places ORDER BY rowid";
const SELECT_BY_CITY: &str = "SELECT * FROM places WHERE city_id = ? ORDER BY rowid";
const SELECT_BY_USER: &str = "SELECT * FROM places WHERE user_id = ? ORDER BY rowid";
const SELECT_BY_AMENITY: &str = r"
    SELECT * FROM places
    WHERE EXISTS (SELECT 1 FROM json_each(places.amenities) WHERE json_each.value = ?)
    ORDER BY rowid
";
const COUNT: &str = "SELECT COUNT(*) FROM places";

const UPDATE: &str = r"
    UPDATE places
    SET name = ?, description = ?, number_rooms = ?, number_bathrooms = ?, max_guest = ?,
        price_by_night = ?, latitude = ?, longitude = ?, amenities = ?, updated_at = ?
    WHERE id = ?
";

const DELETE_BY_ID: &str = "DELETE FROM places WHERE id = ?";

/// `SQLite`-backed place repository.
#[derive(Clone)]
pub struct SqlitePlaceRepository {
    pool: SqlitePool,
}

impl SqlitePlaceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_by(&self, query: &'static str, key: String) -> Result<Vec<Place>, HbnbError> {
        let rows: Vec<Wrapper> = sqlx::query_as(query)
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

impl Repository<Place> for SqlitePlaceRepository {
    async fn create(&self, place: Place) -> Result<Place, HbnbError> {
        let amenities_json = serde_json::to_string(&place.amenities).map_err(StorageError::from)?;

        sqlx::query(INSERT)
            .bind(place.id.to_string())
            .bind(place.city_id.to_string())
            .bind(place.user_id.to_string())
            .bind(&place.name)
            .bind(place.description.as_deref())
            .bind(place.number_rooms)
            .bind(place.number_bathrooms)
            .bind(place.max_guest)
            .bind(place.price_by_night)
            .bind(place.latitude)
            .bind(place.longitude)
            .bind(&amenities_json)
            .bind(time::format(place.created_at))
            .bind(time::format(place.updated_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(place)
    }

    async fn get_by_id(&self, id: PlaceId) -> Result<Option<Place>, HbnbError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Place>, HbnbError> {
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

    async fn update(&self, place: Place) -> Result<Place, HbnbError> {
        let amenities_json = serde_json::to_string(&place.amenities).map_err(StorageError::from)?;

        let result = sqlx::query(UPDATE)
            .bind(&place.name)
            .bind(place.description.as_deref())
            .bind(place.number_rooms)
            .bind(place.number_bathrooms)
            .bind(place.max_guest)
            .bind(place.price_by_night)
            .bind(place.latitude)
            .bind(place.longitude)
            .bind(&amenities_json)
            .bind(time::format(place.updated_at))
            .bind(place.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::new(Place::KIND, place.id).into());
        }
        Ok(place)
    }

    async fn delete(&self, id: PlaceId) -> Result<(), HbnbError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

impl PlaceRepository for SqlitePlaceRepository {
    async fn find_by_city(&self, city_id: CityId) -> Result<Vec<Place>, HbnbError> {
        self.fetch_by(SELECT_BY_CITY, city_id.to_string()).await
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Place>, HbnbError> {
        self.fetch_by(SELECT_BY_USER, user_id.to_string()).await
    }

    async fn find_by_amenity(&self, amenity_id: AmenityId) -> Result<Vec<Place>, HbnbError> {
        self.fetch_by(SELECT_BY_AMENITY, amenity_id.to_string()).await
    }
}
