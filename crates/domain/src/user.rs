//! User: the owner of places.

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::UserId;
use crate::record::impl_record;
use crate::time::{Timestamp, now};

/// A registered user.
///
/// Only the password hash is stored, and it never appears in the JSON
/// representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl_record!(User, UserId, "User");

impl User {
    /// Create a builder for constructing a [`User`].
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when `email` or the password hash is empty.
    pub fn validate(&self) -> Result<(), HbnbError> {
        if self.email.is_empty() {
            return Err(ValidationError::MissingField("email").into());
        }
        if self.password_hash.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        Ok(())
    }

    /// Apply a client patch and bump `updated_at`.
    ///
    /// A new password goes through `hash` before it is stored.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when the new password is empty, or
    /// whatever `hash` returns.
    pub fn apply<H>(&mut self, patch: UserPatch, at: Timestamp, hash: H) -> Result<(), HbnbError>
    where
        H: FnOnce(&str) -> Result<String, HbnbError>,
    {
        let mut next = self.clone();
        if let Some(password) = patch.password {
            if password.is_empty() {
                return Err(ValidationError::MissingField("password").into());
            }
            next.password_hash = hash(&password)?;
        }
        if let Some(first_name) = patch.first_name {
            next.first_name = Some(first_name);
        }
        if let Some(last_name) = patch.last_name {
            next.last_name = Some(last_name);
        }
        next.updated_at = at;
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Client-writable attributes of a [`User`]. The email is fixed at creation.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Attributes accepted when registering a [`User`]. The plain-text password
/// is hashed before anything is stored.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Step-by-step builder for [`User`].
#[derive(Debug, Default)]
pub struct UserBuilder {
    id: Option<UserId>,
    email: Option<String>,
    password_hash: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl UserBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Consume the builder, validate, and return a [`User`].
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if `email` or the password hash is
    /// missing or empty.
    pub fn build(self) -> Result<User, HbnbError> {
        let ts = now();
        let user = User {
            id: self.id.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password_hash: self.password_hash.unwrap_or_default(),
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: ts,
            updated_at: ts,
        };
        user.validate()?;
        Ok(user)
    }
}
