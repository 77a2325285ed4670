//! User service: registration and profile management.
//!
//! Passwords are hashed with argon2 (random salt per hash) before they reach
//! a repository.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::UserId;
use hbnb_domain::record::Record;
use hbnb_domain::time::now;
use hbnb_domain::user::{NewUser, User, UserPatch};

use crate::ports::{PlaceRepository, UserRepository};

fn hash_password(password: &str) -> Result<String, HbnbError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| HbnbError::Internal(Box::new(err)))
}

/// Application service for user CRUD operations.
pub struct UserService<UR, PR> {
    users: UR,
    places: PR,
}

impl<UR, PR> UserService<UR, PR>
where
    UR: UserRepository,
    PR: PlaceRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(users: UR, places: PR) -> Self {
        Self { users, places }
    }

    /// Register a user, hashing the password.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when the email or password is empty,
    /// [`HbnbError::Internal`] if hashing fails, or a storage error from the
    /// repository.
    #[tracing::instrument(skip_all)]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, HbnbError> {
        let NewUser {
            email,
            password,
            first_name,
            last_name,
        } = new_user;
        let mut builder = User::builder().email(email);
        if !password.is_empty() {
            builder = builder.password_hash(hash_password(&password)?);
        }
        if let Some(first_name) = first_name {
            builder = builder.first_name(first_name);
        }
        if let Some(last_name) = last_name {
            builder = builder.last_name(last_name);
        }
        let user = builder.build()?;
        tracing::debug!(user_id = %user.id, "registering user");
        self.users.create(user).await
    }

    /// Look up a user by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_user(&self, id: UserId) -> Result<User, HbnbError> {
        self.users
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new(User::KIND, id).into())
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_users(&self) -> Result<Vec<User>, HbnbError> {
        self.users.get_all().await
    }

    /// Number of stored users.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn count_users(&self) -> Result<usize, HbnbError> {
        self.users.count().await
    }

    /// Apply a patch to an existing user; a new password is rehashed.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the user does not exist,
    /// [`HbnbError::Validation`] if the patch empties the password, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, HbnbError> {
        let mut user = self.get_user(id).await?;
        user.apply(patch, now(), hash_password)?;
        self.users.update(user).await
    }

    /// Delete a user and the places they own.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the user does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<(), HbnbError> {
        let user = self.get_user(id).await?;
        for place in self.places.find_by_user(user.id).await? {
            self.places.delete(place.id).await?;
        }
        self.users.delete(user.id).await
    }
}
