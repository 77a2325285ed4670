//! Storage port: repository traits for persistence.
//!
//! [`Repository`] is the CRUD contract shared by every record kind. Relation
//! queries live on extension traits so each backend implements exactly the
//! lookups the services need.

use std::future::Future;

use hbnb_domain::amenity::Amenity;
use hbnb_domain::city::City;
use hbnb_domain::error::HbnbError;
use hbnb_domain::id::{AmenityId, CityId, StateId, UserId};
use hbnb_domain::place::Place;
use hbnb_domain::record::Record;
use hbnb_domain::state::State;
use hbnb_domain::user::User;

/// Repository for persisting and querying records of kind `T`.
///
/// Every mutating call is durable once its future resolves.
pub trait Repository<T: Record>: Send + Sync {
    /// Insert a new record.
    fn create(&self, record: T) -> impl Future<Output = Result<T, HbnbError>> + Send;

    /// Get a record by its unique identifier.
    fn get_by_id(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, HbnbError>> + Send;

    /// Get all records, in insertion order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, HbnbError>> + Send;

    /// Number of stored records.
    fn count(&self) -> impl Future<Output = Result<usize, HbnbError>> + Send;

    /// Replace an existing record.
    fn update(&self, record: T) -> impl Future<Output = Result<T, HbnbError>> + Send;

    /// Delete a record by its unique identifier. Deleting a missing record is a no-op.
    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), HbnbError>> + Send;
}

/// Repository for [`State`]s.
pub trait StateRepository: Repository<State> {}

impl<R: Repository<State>> StateRepository for R {}

/// Repository for [`User`]s.
pub trait UserRepository: Repository<User> {}

impl<R: Repository<User>> UserRepository for R {}

/// Repository for [`Amenity`]s.
pub trait AmenityRepository: Repository<Amenity> {}

impl<R: Repository<Amenity>> AmenityRepository for R {}

/// Repository for [`City`]s.
pub trait CityRepository: Repository<City> {
    /// Cities of a state, in insertion order.
    fn find_by_state(
        &self,
        state_id: StateId,
    ) -> impl Future<Output = Result<Vec<City>, HbnbError>> + Send;
}

/// Repository for [`Place`]s.
pub trait PlaceRepository: Repository<Place> {
    /// Places of a city, in insertion order.
    fn find_by_city(
        &self,
        city_id: CityId,
    ) -> impl Future<Output = Result<Vec<Place>, HbnbError>> + Send;

    /// Places owned by a user, in insertion order.
    fn find_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<Place>, HbnbError>> + Send;

    /// Places linked to an amenity, in insertion order.
    fn find_by_amenity(
        &self,
        amenity_id: AmenityId,
    ) -> impl Future<Output = Result<Vec<Place>, HbnbError>> + Send;
}
