//! Amenity: a feature a place can offer (wifi, pool, …).

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::AmenityId;
use crate::record::impl_record;
use crate::time::{Timestamp, now};

/// A named feature linked to places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: AmenityId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl_record!(Amenity, AmenityId, "Amenity");

impl Amenity {
    /// Create a builder for constructing an [`Amenity`].
    #[must_use]
    pub fn builder() -> AmenityBuilder {
        AmenityBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HbnbError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        Ok(())
    }

    /// Apply a client patch and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when the patch empties `name`.
    pub fn apply(&mut self, patch: AmenityPatch, at: Timestamp) -> Result<(), HbnbError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        next.updated_at = at;
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Client-writable attributes of an [`Amenity`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AmenityPatch {
    pub name: Option<String>,
}

/// Step-by-step builder for [`Amenity`].
#[derive(Debug, Default)]
pub struct AmenityBuilder {
    id: Option<AmenityId>,
    name: Option<String>,
}

impl AmenityBuilder {
    #[must_use]
    pub fn id(mut self, id: AmenityId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return an [`Amenity`].
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Amenity, HbnbError> {
        let ts = now();
        let amenity = Amenity {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            created_at: ts,
            updated_at: ts,
        };
        amenity.validate()?;
        Ok(amenity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_amenity_with_name() {
        let amenity = Amenity::builder().name("Wifi").build().unwrap();
        assert_eq!(amenity.name, "Wifi");
    }

    #[test]
    fn should_reject_empty_name() {
        let result = Amenity::builder().name("").build();
        assert!(result.is_err());
    }
}
