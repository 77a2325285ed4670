//! Place: a rental listing in a [`City`](crate::city::City), owned by a
//! [`User`](crate::user::User).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::{AmenityId, CityId, PlaceId, UserId};
use crate::record::impl_record;
use crate::time::{Timestamp, now};

/// A place to stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub city_id: CityId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub number_rooms: u32,
    pub number_bathrooms: u32,
    pub max_guest: u32,
    pub price_by_night: u32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub amenities: BTreeSet<AmenityId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl_record!(Place, PlaceId, "Place");

impl Place {
    /// Create a builder for constructing a [`Place`].
    #[must_use]
    pub fn builder() -> PlaceBuilder {
        PlaceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when:
    /// - `name` is empty
    /// - `latitude` is outside `[-90, 90]`
    /// - `longitude` is outside `[-180, 180]`
    pub fn validate(&self) -> Result<(), HbnbError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if let Some(latitude) = self.latitude {
            if !(-90.0..=90.0).contains(&latitude) {
                return Err(ValidationError::InvalidField {
                    field: "latitude",
                    reason: "must be between -90 and 90",
                }
                .into());
            }
        }
        if let Some(longitude) = self.longitude {
            if !(-180.0..=180.0).contains(&longitude) {
                return Err(ValidationError::InvalidField {
                    field: "longitude",
                    reason: "must be between -180 and 180",
                }
                .into());
            }
        }
        Ok(())
    }

    /// Apply a client patch and bump `updated_at`.
    ///
    /// Ownership (`city_id`, `user_id`) is not patchable.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when the patched place breaks an
    /// invariant; the place is left unchanged.
    pub fn apply(&mut self, patch: PlacePatch, at: Timestamp) -> Result<(), HbnbError> {
        let mut next = self.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(description) = patch.description {
            next.description = Some(description);
        }
        if let Some(number_rooms) = patch.number_rooms {
            next.number_rooms = number_rooms;
        }
        if let Some(number_bathrooms) = patch.number_bathrooms {
            next.number_bathrooms = number_bathrooms;
        }
        if let Some(max_guest) = patch.max_guest {
            next.max_guest = max_guest;
        }
        if let Some(price_by_night) = patch.price_by_night {
            next.price_by_night = price_by_night;
        }
        if let Some(latitude) = patch.latitude {
            next.latitude = Some(latitude);
        }
        if let Some(longitude) = patch.longitude {
            next.longitude = Some(longitude);
        }
        next.updated_at = at;
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Whether the place offers every amenity in `wanted`.
    #[must_use]
    pub fn has_amenities(&self, wanted: &[AmenityId]) -> bool {
        wanted.iter().all(|id| self.amenities.contains(id))
    }

    /// Link an amenity. Returns `false` when it was already linked.
    pub fn link_amenity(&mut self, amenity_id: AmenityId, at: Timestamp) -> bool {
        let inserted = self.amenities.insert(amenity_id);
        if inserted {
            self.updated_at = at;
        }
        inserted
    }

    /// Unlink an amenity. Returns `false` when it was not linked.
    pub fn unlink_amenity(&mut self, amenity_id: AmenityId, at: Timestamp) -> bool {
        let removed = self.amenities.remove(&amenity_id);
        if removed {
            self.updated_at = at;
        }
        removed
    }
}

/// Client-writable attributes of a [`Place`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number_rooms: Option<u32>,
    pub number_bathrooms: Option<u32>,
    pub max_guest: Option<u32>,
    pub price_by_night: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Step-by-step builder for [`Place`].
#[derive(Debug, Default)]
pub struct PlaceBuilder {
    id: Option<PlaceId>,
    city_id: Option<CityId>,
    user_id: Option<UserId>,
    name: Option<String>,
    description: Option<String>,
    number_rooms: u32,
    number_bathrooms: u32,
    max_guest: u32,
    price_by_night: u32,
    latitude: Option<f64>,
    longitude: Option<f64>,
    amenities: BTreeSet<AmenityId>,
}

impl PlaceBuilder {
    #[must_use]
    pub fn id(mut self, id: PlaceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn city_id(mut self, city_id: CityId) -> Self {
        self.city_id = Some(city_id);
        self
    }

    #[must_use]
    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn number_rooms(mut self, number_rooms: u32) -> Self {
        self.number_rooms = number_rooms;
        self
    }

    #[must_use]
    pub fn number_bathrooms(mut self, number_bathrooms: u32) -> Self {
        self.number_bathrooms = number_bathrooms;
        self
    }

    #[must_use]
    pub fn max_guest(mut self, max_guest: u32) -> Self {
        self.max_guest = max_guest;
        self
    }

    #[must_use]
    pub fn price_by_night(mut self, price_by_night: u32) -> Self {
        self.price_by_night = price_by_night;
        self
    }

    #[must_use]
    pub fn latitude(mut self, latitude: f64) -> Self {
        self.latitude = Some(latitude);
        self
    }

    #[must_use]
    pub fn longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }

    /// Take every attribute the patch sets.
    #[must_use]
    pub fn patch(mut self, patch: PlacePatch) -> Self {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        self.number_rooms = patch.number_rooms.unwrap_or(self.number_rooms);
        self.number_bathrooms = patch.number_bathrooms.unwrap_or(self.number_bathrooms);
        self.max_guest = patch.max_guest.unwrap_or(self.max_guest);
        self.price_by_night = patch.price_by_night.unwrap_or(self.price_by_night);
        if patch.latitude.is_some() {
            self.latitude = patch.latitude;
        }
        if patch.longitude.is_some() {
            self.longitude = patch.longitude;
        }
        self
    }

    #[must_use]
    pub fn amenity(mut self, amenity_id: AmenityId) -> Self {
        self.amenities.insert(amenity_id);
        self
    }

    /// Consume the builder, validate, and return a [`Place`].
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if `city_id`, `user_id` or `name` is
    /// missing, or if [`Place::validate`] fails.
    pub fn build(self) -> Result<Place, HbnbError> {
        let city_id = self
            .city_id
            .ok_or(ValidationError::MissingField("city_id"))?;
        let user_id = self
            .user_id
            .ok_or(ValidationError::MissingField("user_id"))?;
        let ts = now();
        let place = Place {
            id: self.id.unwrap_or_default(),
            city_id,
            user_id,
            name: self.name.unwrap_or_default(),
            description: self.description,
            number_rooms: self.number_rooms,
            number_bathrooms: self.number_bathrooms,
            max_guest: self.max_guest,
            price_by_night: self.price_by_night,
            latitude: self.latitude,
            longitude: self.longitude,
            amenities: self.amenities,
            created_at: ts,
            updated_at: ts,
        };
        place.validate()?;
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_place() -> Place {
        Place::builder()
            .city_id(CityId::new())
            .user_id(UserId::new())
            .name("Cozy loft")
            .build()
            .unwrap()
    }

    #[test]
    fn should_default_counters_to_zero() {
        let place = valid_place();
        assert_eq!(place.number_rooms, 0);
        assert_eq!(place.price_by_night, 0);
        assert!(place.amenities.is_empty());
        assert!(place.latitude.is_none());
    }

    #[test]
    fn should_require_user_id() {
        let result = Place::builder()
            .city_id(CityId::new())
            .name("Loft")
            .build();
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField(
                "user_id"
            )))
        ));
    }

    #[test]
    fn should_reject_latitude_out_of_range() {
        let result = Place::builder()
            .city_id(CityId::new())
            .user_id(UserId::new())
            .name("Loft")
            .latitude(91.0)
            .build();
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::InvalidField {
                field: "latitude",
                ..
            }))
        ));
    }

    #[test]
    fn should_patch_allowed_fields_only() {
        let mut place = valid_place();
        let (city_id, user_id, created_at) = (place.city_id, place.user_id, place.created_at);

        let patch: PlacePatch =
            serde_json::from_str(r#"{"name":"Beach house","max_guest":6,"latitude":37.77}"#)
                .unwrap();
        place.apply(patch, now()).unwrap();

        assert_eq!(place.name, "Beach house");
        assert_eq!(place.max_guest, 6);
        assert_eq!(place.latitude, Some(37.77));
        assert_eq!(place.city_id, city_id);
        assert_eq!(place.user_id, user_id);
        assert_eq!(place.created_at, created_at);
    }

    #[test]
    fn should_build_from_creation_patch() {
        let patch: PlacePatch =
            serde_json::from_str(r#"{"name":"Studio","number_rooms":1,"price_by_night":80}"#)
                .unwrap();
        let place = Place::builder()
            .city_id(CityId::new())
            .user_id(UserId::new())
            .patch(patch)
            .build()
            .unwrap();

        assert_eq!(place.name, "Studio");
        assert_eq!(place.number_rooms, 1);
        assert_eq!(place.price_by_night, 80);
        assert_eq!(place.created_at, place.updated_at);
    }

    #[test]
    fn should_reject_ownership_keys_in_patch() {
        let result: Result<PlacePatch, _> = serde_json::from_str(r#"{"city_id":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_negative_counters_in_patch() {
        let result: Result<PlacePatch, _> = serde_json::from_str(r#"{"number_rooms":-1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_match_when_all_wanted_amenities_are_linked() {
        let wifi = AmenityId::new();
        let pool = AmenityId::new();
        let mut place = valid_place();
        place.link_amenity(wifi, now());
        place.link_amenity(pool, now());

        assert!(place.has_amenities(&[wifi]));
        assert!(place.has_amenities(&[wifi, pool]));
        assert!(place.has_amenities(&[]));
        assert!(!place.has_amenities(&[wifi, AmenityId::new()]));
    }

    #[test]
    fn should_report_whether_link_changed_anything() {
        let wifi = AmenityId::new();
        let mut place = valid_place();

        assert!(place.link_amenity(wifi, now()));
        assert!(!place.link_amenity(wifi, now()));
        assert!(place.unlink_amenity(wifi, now()));
        assert!(!place.unlink_amenity(wifi, now()));
    }
}
