//! `SQLite` implementation of the user repository.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hbnb_app::ports::Repository;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::UserId;
use hbnb_domain::record::Record;
use hbnb_domain::time;
use hbnb_domain::user::User;

use crate::codec::{parse_column, timestamp_column};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<User> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(User {
            id: parse_column(row, "id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO users (id, email, password_hash, first_name, last_name, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str = "SELECT * FROM users WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM users ORDER BY rowid";
const COUNT: &str = "SELECT COUNT(*) FROM users";

const UPDATE: &str = r"
    UPDATE users
    SET password_hash = ?, first_name = ?, last_name = ?, updated_at = ?
    WHERE id = ?
";

const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";

/// `SQLite`-backed user repository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<User> for SqliteUserRepository {
    async fn create(&self, user: User) -> Result<User, HbnbError> {
        sqlx::query(INSERT)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.first_name.as_deref())
            .bind(user.last_name.as_deref())
            .bind(time::format(user.created_at))
            .bind(time::format(user.updated_at))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, HbnbError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<User>, HbnbError> {
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

    async fn update(&self, user: User) -> Result<User, HbnbError> {
        let result = sqlx::query(UPDATE)
            .bind(&user.password_hash)
            .bind(user.first_name.as_deref())
            .bind(user.last_name.as_deref())
            .bind(time::format(user.updated_at))
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError::new(User::KIND, user.id).into());
        }
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), HbnbError> {
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

    async fn setup() -> SqliteUserRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteUserRepository::new(db.pool().clone())
    }

    fn test_user() -> User {
        User::builder()
            .email("betty@holberton.io")
            .password_hash("$argon2id$v=19$stub")
            .last_name("Holberton")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_keep_password_hash_and_optional_names() {
        let repo = setup().await;
        let user = test_user();

        repo.create(user.clone()).await.unwrap();

        let fetched = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.password_hash, "$argon2id$v=19$stub");
        assert_eq!(fetched.first_name, None);
        assert_eq!(fetched.last_name.as_deref(), Some("Holberton"));
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn should_update_profile_but_not_email() {
        let repo = setup().await;
        let mut user = test_user();
        repo.create(user.clone()).await.unwrap();

        user.first_name = Some("Betty".to_string());
        user.email = "other@holberton.io".to_string();
        repo.update(user.clone()).await.unwrap();

        let fetched = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.first_name.as_deref(), Some("Betty"));
        assert_eq!(fetched.email, "betty@holberton.io");
    }

    #[tokio::test]
    async fn should_count_users() {
        let repo = setup().await;
        repo.create(test_user()).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
