//! State service: use-cases for managing states.

use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::StateId;
use hbnb_domain::record::Record;
use hbnb_domain::state::{State, StatePatch};
use hbnb_domain::time::now;

use crate::ports::{CityRepository, PlaceRepository, StateRepository};

/// Application service for state CRUD operations.
///
/// Holds the city and place repositories too, since removing a state removes
/// everything located in it.
pub struct StateService<SR, CR, PR> {
    states: SR,
    cities: CR,
    places: PR,
}

impl<SR, CR, PR> StateService<SR, CR, PR>
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

    /// Create a new state after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, state), fields(state_id = %state.id))]
    pub async fn create_state(&self, state: State) -> Result<State, HbnbError> {
        state.validate()?;
        self.states.create(state).await
    }

    /// Look up a state by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when no state with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_state(&self, id: StateId) -> Result<State, HbnbError> {
        self.states
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new(State::KIND, id).into())
    }

    /// List all states.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_states(&self) -> Result<Vec<State>, HbnbError> {
        self.states.get_all().await
    }

    /// Number of stored states.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn count_states(&self) -> Result<usize, HbnbError> {
        self.states.count().await
    }

    /// Apply a patch to an existing state.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state does not exist,
    /// [`HbnbError::Validation`] if the patched state is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_state(&self, id: StateId, patch: StatePatch) -> Result<State, HbnbError> {
        let mut state = self.get_state(id).await?;
        state.apply(patch, now())?;
        self.states.update(state).await
    }

    /// Delete a state, its cities and their places.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::NotFound`] when the state does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_state(&self, id: StateId) -> Result<(), HbnbError> {
        let state = self.get_state(id).await?;
        for city in self.cities.find_by_state(state.id).await? {
            for place in self.places.find_by_city(city.id).await? {
                self.places.delete(place.id).await?;
            }
            self.cities.delete(city.id).await?;
        }
        self.states.delete(state.id).await?;
        tracing::info!(cascade = "cities", "state deleted");
        Ok(())
    }
}
