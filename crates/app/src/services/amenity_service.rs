//! Amenity service: use-cases for managing amenities.

use hbnb_domain::amenity::{Amenity, AmenityPatch};
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::AmenityId;
use hbnb_domain::record::Record;
use hbnb_domain::time::now;

use crate::ports::{AmenityRepository, PlaceRepository};

/// Application service for amenity CRUD operations.
pub struct AmenityService<AR, PR> {
    amenities: AR,
    places: PR,
}

impl<AR, PR> AmenityService<AR, PR>
where
    AR: AmenityRepository,
    PR: PlaceRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(amenities: AR, places: PR) -> Self {
        Self { amenities, places }
    }

    /// Create a new amenity after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, amenity), fields(amenity_id = %amenity.id))]
    pub async fn create_amenity(&self, amenity: Amenity) -> Result<Amenity, HbnbError> {
        amenity.validate()?;
        self.amenities.create(amenity).await
    }

    /// Look up an amenity by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no amenity with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_amenity(&self, id: AmenityId) -> Result<Amenity, HbnbError> {
        self.amenities
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new(Amenity::KIND, id).into())
    }

    /// List all amenities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_amenities(&self) -> Result<Vec<Amenity>, HbnbError> {
        self.amenities.get_all().await
    }

    /// Number of stored amenities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn count_amenities(&self) -> Result<usize, HbnbError> {
        self.amenities.count().await
    }

    /// Apply a patch to an existing amenity.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the amenity does not exist,
    /// [`HbnbError::Validation`] if the patched amenity is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_amenity(
        &self,
        id: AmenityId,
        patch: AmenityPatch,
    ) -> Result<Amenity, HbnbError> {
        let mut amenity = self.get_amenity(id).await?;
        amenity.apply(patch, now())?;
        self.amenities.update(amenity).await
    }

    /// Delete an amenity and unlink it from every place offering it.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the amenity does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_amenity(&self, id: AmenityId) -> Result<(), HbnbError> {
        let amenity = self.get_amenity(id).await?;
        let at = now();
        for mut place in self.places.find_by_amenity(amenity.id).await? {
            if place.unlink_amenity(amenity.id, at) {
                self.places.update(place).await?;
            }
        }
        self.amenities.delete(amenity.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;
    use crate::ports::Repository;
    use hbnb_domain::id::{CityId, UserId};
    use hbnb_domain::place::Place;

    type Service = AmenityService<InMemoryRepository<Amenity>, InMemoryRepository<Place>>;

    fn make_service() -> (Service, InMemoryRepository<Place>) {
        let places = InMemoryRepository::new();
        (
            AmenityService::new(InMemoryRepository::new(), places.clone()),
            places,
        )
    }

    #[tokio::test]
    async fn should_create_and_list_amenities() {
        let (svc, _) = make_service();
        for name in ["Wifi", "Pool"] {
            let amenity = Amenity::builder().name(name).build().unwrap();
            svc.create_amenity(amenity).await.unwrap();
        }

        let names: Vec<String> = svc
            .list_amenities()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["Wifi", "Pool"]);
        assert_eq!(svc.count_amenities().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn should_rename_amenity() {
        let (svc, _) = make_service();
        let wifi = Amenity::builder().name("Wifi").build().unwrap();
        let wifi = svc.create_amenity(wifi).await.unwrap();

        let updated = svc
            .update_amenity(
                wifi.id,
                AmenityPatch {
                    name: Some("Fiber".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Fiber");
        assert_eq!(updated.created_at, wifi.created_at);
    }

    #[tokio::test]
    async fn should_unlink_deleted_amenity_from_places() {
        let (svc, places) = make_service();
        let wifi = Amenity::builder().name("Wifi").build().unwrap();
        let wifi = svc.create_amenity(wifi).await.unwrap();
        let place = Place::builder()
            .city_id(CityId::new())
            .user_id(UserId::new())
            .name("Loft")
            .amenity(wifi.id)
            .build()
            .unwrap();
        let place = places.create(place).await.unwrap();

        svc.delete_amenity(wifi.id).await.unwrap();

        let place = places.get_by_id(place.id).await.unwrap().unwrap();
        assert!(place.amenities.is_empty());
        assert!(matches!(
            svc.get_amenity(wifi.id).await,
            Err(HbnbError::NotFound(_))
        ));
    }
}
