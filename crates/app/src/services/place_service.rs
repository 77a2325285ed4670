//! Place service: listings, search and amenity links.

use std::collections::HashSet;

use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{AmenityId, CityId, PlaceId, UserId};
use hbnb_domain::place::{Place, PlacePatch};
use hbnb_domain::record::Record;
use hbnb_domain::search::PlaceSearch;
use hbnb_domain::time::now;
use hbnb_domain::user::User;

use crate::ports::{AmenityRepository, CityRepository, PlaceRepository, UserRepository};

/// Outcome of linking an amenity to a place.
#[derive(Debug, Clone, PartialEq)]
pub enum AmenityLink {
    /// The link was added.
    Created(Amenity),
    /// The place already offered the amenity; nothing changed.
    Existing(Amenity),
}

impl AmenityLink {
    /// The linked amenity.
    #[must_use]
    pub fn into_amenity(self) -> Amenity {
        match self {
            Self::Created(amenity) | Self::Existing(amenity) => amenity,
        }
    }
}

/// Application service for place operations.
pub struct PlaceService<CR, UR, AR, PR> {
    cities: CR,
    users: UR,
    amenities: AR,
    places: PR,
}

impl<CR, UR, AR, PR> PlaceService<CR, UR, AR, PR>
where
    CR: CityRepository,
    UR: UserRepository,
    AR: AmenityRepository,
    PR: PlaceRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(cities: CR, users: UR, amenities: AR, places: PR) -> Self {
        Self {
            cities,
            users,
            amenities,
            places,
        }
    }

    async fn ensure_city(&self, id: CityId) -> Result<(), HbnbError> {
        match self.cities.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError::new(City::KIND, id).into()),
        }
    }

    async fn ensure_user(&self, id: UserId) -> Result<(), HbnbError> {
        match self.users.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError::new(User::KIND, id).into()),
        }
    }

    async fn get_amenity(&self, id: AmenityId) -> Result<Amenity, HbnbError> {
        self.amenities
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new(Amenity::KIND, id).into())
    }

    /// List the places of a city.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city does not exist, or a
    /// storage error from the repository.
    pub async fn list_places(&self, city_id: CityId) -> Result<Vec<Place>, HbnbError> {
        self.ensure_city(city_id).await?;
        self.places.find_by_city(city_id).await
    }

    /// Look up a place by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no place with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_place(&self, id: PlaceId) -> Result<Place, HbnbError> {
        self.places
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new(Place::KIND, id).into())
    }

    /// Number of stored places.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn count_places(&self) -> Result<usize, HbnbError> {
        self.places.count().await
    }

    /// Create a place after checking that its city, owner and amenities exist.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if invariants fail,
    /// [`HbnbError::NotFound`] for the first missing reference (city, then
    /// user, then amenities), or a storage error from the repository.
    #[tracing::instrument(skip(self, place), fields(place_id = %place.id, city_id = %place.city_id))]
    pub async fn create_place(&self, place: Place) -> Result<Place, HbnbError> {
        place.validate()?;
        self.ensure_city(place.city_id).await?;
        self.ensure_user(place.user_id).await?;
        for amenity_id in &place.amenities {
            self.get_amenity(*amenity_id).await?;
        }
        self.places.create(place).await
    }

    /// Apply a patch to an existing place. Ownership never changes.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist,
    /// [`HbnbError::Validation`] if the patched place is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_place(&self, id: PlaceId, patch: PlacePatch) -> Result<Place, HbnbError> {
        let mut place = self.get_place(id).await?;
        place.apply(patch, now())?;
        self.places.update(place).await
    }

    /// Delete a place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_place(&self, id: PlaceId) -> Result<(), HbnbError> {
        let place = self.get_place(id).await?;
        self.places.delete(place.id).await
    }

    /// Search places.
    ///
    /// Without states or cities every place is a candidate; otherwise the
    /// candidates are the places of every city of the listed states followed
    /// by the places of the listed cities, each place once. Ids matching
    /// nothing contribute nothing. Candidates are then narrowed to places
    /// offering all listed amenities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repositories.
    #[tracing::instrument(skip_all, fields(
        states = search.states.len(),
        cities = search.cities.len(),
        amenities = search.amenities.len()
    ))]
    pub async fn search_places(&self, search: &PlaceSearch) -> Result<Vec<Place>, HbnbError> {
        let candidates = if search.is_unscoped() {
            self.places.get_all().await?
        } else {
            let mut city_ids = Vec::new();
            for state_id in &search.states {
                for city in self.cities.find_by_state(*state_id).await? {
                    city_ids.push(city.id);
                }
            }
            city_ids.extend_from_slice(&search.cities);

            let mut seen = HashSet::new();
            let mut candidates = Vec::new();
            for city_id in city_ids {
                for place in self.places.find_by_city(city_id).await? {
                    if seen.insert(place.id) {
                        candidates.push(place);
                    }
                }
            }
            candidates
        };

        let found: Vec<Place> = candidates
            .into_iter()
            .filter(|place| place.has_amenities(&search.amenities))
            .collect();
        tracing::debug!(found = found.len(), "place search done");
        Ok(found)
    }

    /// List the amenities a place offers.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place does not exist, or a
    /// storage error from the repository.
    pub async fn list_place_amenities(&self, place_id: PlaceId) -> Result<Vec<Amenity>, HbnbError> {
        let place = self.get_place(place_id).await?;
        let mut amenities = Vec::with_capacity(place.amenities.len());
        for amenity_id in place.amenities {
            if let Some(amenity) = self.amenities.get_by_id(amenity_id).await? {
                amenities.push(amenity);
            }
        }
        Ok(amenities)
    }

    /// Link an amenity to a place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or the amenity does
    /// not exist, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn link_amenity(
        &self,
        place_id: PlaceId,
        amenity_id: AmenityId,
    ) -> Result<AmenityLink, HbnbError> {
        let mut place = self.get_place(place_id).await?;
        let amenity = self.get_amenity(amenity_id).await?;
        if !place.link_amenity(amenity.id, now()) {
            return Ok(AmenityLink::Existing(amenity));
        }
        self.places.update(place).await?;
        Ok(AmenityLink::Created(amenity))
    }

    /// Unlink an amenity from a place.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the place or the amenity does
    /// not exist or when the place does not offer the amenity, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn unlink_amenity(
        &self,
        place_id: PlaceId,
        amenity_id: AmenityId,
    ) -> Result<(), HbnbError> {
        let mut place = self.get_place(place_id).await?;
        let amenity = self.get_amenity(amenity_id).await?;
        if !place.unlink_amenity(amenity.id, now()) {
            return Err(NotFoundError::new(Amenity::KIND, amenity.id).into());
        }
        self.places.update(place).await?;
        Ok(())
    }
}
