//! City service: use-cases for managing the cities of a state.

use hbnb_domain::city::{City, CityPatch};
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{CityId, StateId};
use hbnb_domain::record::Record;
use hbnb_domain::state::State;
use hbnb_domain::time::now;

use crate::ports::{CityRepository, PlaceRepository, StateRepository};

/// Application service for city CRUD operations.
pub struct CityService<SR, CR, PR> {
    states: SR,
    cities: CR,
    places: PR,
}

impl<SR, CR, PR> CityService<SR, CR, PR>
where
    SR: StateRepository,
    CR: CityRepository,
    PR: PlaceRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(states: SR, cities: CR, places: PR) -> Self {
        Self {
            states,
            cities,
            places,
        }
    }

    async fn ensure_state(&self, id: StateId) -> Result<(), HbnbError> {
        match self.states.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError::new(State::KIND, id).into()),
        }
    }

    /// List the cities of a state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state does not exist, or a
    /// storage error from the repository.
    pub async fn list_cities(&self, state_id: StateId) -> Result<Vec<City>, HbnbError> {
        self.ensure_state(state_id).await?;
        self.cities.find_by_state(state_id).await
    }

    /// Look up a city by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no city with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_city(&self, id: CityId) -> Result<City, HbnbError> {
        self.cities
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new(City::KIND, id).into())
    }

    /// Number of stored cities.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn count_cities(&self) -> Result<usize, HbnbError> {
        self.cities.count().await
    }

    /// Create a city in an existing state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if invariants fail,
    /// [`HbnbError::NotFound`] when the city's state does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, city), fields(city_id = %city.id, state_id = %city.state_id))]
    pub async fn create_city(&self, city: City) -> Result<City, HbnbError> {
        city.validate()?;
        self.ensure_state(city.state_id).await?;
        self.cities.create(city).await
    }

    /// Apply a patch to an existing city.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city does not exist,
    /// [`HbnbError::Validation`] if the patched city is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_city(&self, id: CityId, patch: CityPatch) -> Result<City, HbnbError> {
        let mut city = self.get_city(id).await?;
        city.apply(patch, now())?;
        self.cities.update(city).await
    }

    /// Delete a city and its places.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the city does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_city(&self, id: CityId) -> Result<(), HbnbError> {
        let city = self.get_city(id).await?;
        for place in self.places.find_by_city(city.id).await? {
            self.places.delete(place.id).await?;
        }
        self.cities.delete(city.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;
    use crate::ports::Repository;
    use hbnb_domain::id::UserId;
    use hbnb_domain::place::Place;

    type Service =
        CityService<InMemoryRepository<State>, InMemoryRepository<City>, InMemoryRepository<Place>>;

    async fn make_service() -> (Service, State, InMemoryRepository<Place>) {
        let states = InMemoryRepository::new();
        let places = InMemoryRepository::new();
        let state = State::builder().name("California").build().unwrap();
        states.create(state.clone()).await.unwrap();
        let svc = CityService::new(states, InMemoryRepository::new(), places.clone());
        (svc, state, places)
    }

    fn city_in(state_id: StateId, name: &str) -> City {
        City::builder().state_id(state_id).name(name).build().unwrap()
    }

    #[tokio::test]
    async fn should_create_city_in_existing_state() {
        let (svc, state, _) = make_service().await;

        let created = svc
            .create_city(city_in(state.id, "San Jose"))
            .await
            .unwrap();

        assert_eq!(created.state_id, state.id);
        assert_eq!(svc.get_city(created.id).await.unwrap().name, "San Jose");
    }

    #[tokio::test]
    async fn should_reject_city_of_unknown_state() {
        let (svc, _, _) = make_service().await;
        let result = svc.create_city(city_in(StateId::new(), "Nowhere")).await;
        assert!(matches!(
            result,
            Err(HbnbError::NotFound(NotFoundError { entity: "State", .. }))
        ));
    }

    #[tokio::test]
    async fn should_list_cities_of_state_in_creation_order() {
        let (svc, state, _) = make_service().await;
        for name in ["Fremont", "Oakland", "Napa"] {
            svc.create_city(city_in(state.id, name)).await.unwrap();
        }

        let names: Vec<String> = svc
            .list_cities(state.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Fremont", "Oakland", "Napa"]);
    }

    #[tokio::test]
    async fn should_return_not_found_when_listing_unknown_state() {
        let (svc, _, _) = make_service().await;
        let result = svc.list_cities(StateId::new()).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_never_move_city_to_another_state_on_update() {
        let (svc, state, _) = make_service().await;
        let city = svc.create_city(city_in(state.id, "Fresno")).await.unwrap();

        let updated = svc
            .update_city(
                city.id,
                CityPatch {
                    name: Some("Modesto".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Modesto");
        assert_eq!(updated.state_id, state.id);
    }

    #[tokio::test]
    async fn should_delete_places_with_their_city() {
        let (svc, state, places) = make_service().await;
        let city = svc.create_city(city_in(state.id, "Davis")).await.unwrap();
        let place = Place::builder()
            .city_id(city.id)
            .user_id(UserId::new())
            .name("Cottage")
            .build()
            .unwrap();
        places.create(place).await.unwrap();

        svc.delete_city(city.id).await.unwrap();

        assert!(matches!(
            svc.get_city(city.id).await,
            Err(HbnbError::NotFound(_))
        ));
        assert_eq!(places.count().await.unwrap(), 0);
    }
}
