//! In-process storage backend.
//!
//! [`InMemoryRepository`] is an identity map: records are keyed by their id
//! and an insertion-order index keeps listings stable. Clones share the same
//! table, so one repository can be handed to several services.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use hbnb_domain::city::City;
use hbnb_domain::error::{HbnbError, NotFoundError};
use hbnb_domain::id::{AmenityId, CityId, StateId, UserId};
use hbnb_domain::place::Place;
use hbnb_domain::record::Record;

use crate::ports::{CityRepository, PlaceRepository, Repository};

struct Table<T: Record> {
    rows: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

/// Identity-keyed, insertion-ordered repository held in memory.
pub struct InMemoryRepository<T: Record> {
    table: Arc<RwLock<Table<T>>>,
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
        }
    }
}

impl<T: Record> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn find<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let table = self.table.read().await;
        table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id))
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, record: T) -> Result<T, HbnbError> {
        let mut table = self.table.write().await;
        if table.rows.insert(record.id(), record.clone()).is_none() {
            table.order.push(record.id());
        }
        Ok(record)
    }

    async fn get_by_id(&self, id: T::Id) -> Result<Option<T>, HbnbError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<T>, HbnbError> {
        Ok(self.find(|_| true).await)
    }

    async fn count(&self) -> Result<usize, HbnbError> {
        Ok(self.table.read().await.rows.len())
    }

    async fn update(&self, record: T) -> Result<T, HbnbError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(NotFoundError::new(T::KIND, record.id()).into()),
        }
    }

    async fn delete(&self, id: T::Id) -> Result<(), HbnbError> {
        let mut table = self.table.write().await;
        if table.rows.remove(&id).is_some() {
            table.order.retain(|existing| *existing != id);
        }
        Ok(())
    }
}

impl CityRepository for InMemoryRepository<City> {
    async fn find_by_state(&self, state_id: StateId) -> Result<Vec<City>, HbnbError> {
        Ok(self.find(move |city| city.state_id == state_id).await)
    }
}

impl PlaceRepository for InMemoryRepository<Place> {
    async fn find_by_city(&self, city_id: CityId) -> Result<Vec<Place>, HbnbError> {
        Ok(self.find(move |place| place.city_id == city_id).await)
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Place>, HbnbError> {
        Ok(self.find(move |place| place.user_id == user_id).await)
    }

    async fn find_by_amenity(&self, amenity_id: AmenityId) -> Result<Vec<Place>, HbnbError> {
        Ok(self
            .find(move |place| place.amenities.contains(&amenity_id))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_domain::state::State;

    fn state(name: &str) -> State {
        State::builder().name(name).build().unwrap()
    }

    #[tokio::test]
    async fn should_return_record_by_id_after_create() {
        let repo = InMemoryRepository::new();
        let california = state("California");
        let id = california.id;

        repo.create(california).await.unwrap();

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "California");
    }

    #[tokio::test]
    async fn should_list_in_insertion_order() {
        let repo = InMemoryRepository::new();
        for name in ["Arizona", "California", "Nevada", "Oregon"] {
            repo.create(state(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["Arizona", "California", "Nevada", "Oregon"]);
    }

    #[tokio::test]
    async fn should_share_table_between_clones() {
        let repo = InMemoryRepository::new();
        let other = repo.clone();
        repo.create(state("Texas")).await.unwrap();

        assert_eq!(other.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn should_fail_update_when_record_missing() {
        let repo: InMemoryRepository<State> = InMemoryRepository::new();
        let result = repo.update(state("Ghost")).await;
        assert!(matches!(result, Err(HbnbError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_forget_record_after_delete() {
        let repo = InMemoryRepository::new();
        let utah = state("Utah");
        let id = utah.id;
        repo.create(utah).await.unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.get_by_id(id).await.unwrap().is_none());
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_find_cities_of_one_state_only() {
        let repo = InMemoryRepository::new();
        let (west, east) = (StateId::new(), StateId::new());
        for (state_id, name) in [(west, "Reno"), (east, "Boston"), (west, "Vegas")] {
            let city = City::builder().state_id(state_id).name(name).build().unwrap();
            repo.create(city).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_by_state(west)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Reno", "Vegas"]);
    }
}
