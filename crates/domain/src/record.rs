//! The common shape of every persisted record.

use std::fmt::Display;
use std::hash::Hash;

use crate::time::Timestamp;

/// A domain object with a stable identity and server-managed timestamps.
///
/// Repositories are parameterized by this trait instead of dispatching on a
/// runtime type name.
pub trait Record: Clone + Send + Sync + 'static {
    /// Typed identifier of the record.
    type Id: Copy + Eq + Hash + Display + Send + Sync + 'static;

    /// Human-readable kind, used in not-found errors and logs.
    const KIND: &'static str;

    /// The record's identifier.
    fn id(&self) -> Self::Id;

    /// When the record was first persisted.
    fn created_at(&self) -> Timestamp;

    /// When the record was last modified.
    fn updated_at(&self) -> Timestamp;
}

/// Implement [`Record`] for a struct with `id`, `created_at` and `updated_at` fields.
macro_rules! impl_record {
    ($ty:ty, $id:ty, $kind:literal) => {
        impl $crate::record::Record for $ty {
            type Id = $id;

            const KIND: &'static str = $kind;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn created_at(&self) -> $crate::time::Timestamp {
                self.created_at
            }

            fn updated_at(&self) -> $crate::time::Timestamp {
                self.updated_at
            }
        }
    };
}

pub(crate) use impl_record;
