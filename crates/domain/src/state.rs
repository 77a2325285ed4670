//! State: the top of the location hierarchy. Owns cities.

use serde::{Deserialize, Serialize};

use crate::error::{HbnbError, ValidationError};
use crate::id::StateId;
use crate::record::impl_record;
use crate::time::{Timestamp, now};

/// A state (or region) grouping cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl_record!(State, StateId, "State");

impl State {
    /// Create a builder for constructing a [`State`].
    #[must_use]
    pub fn builder() -> StateBuilder {
        StateBuilder::default()
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
    /// Nothing is changed when the patched state would be invalid.
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] when the patch empties `name`.
    pub fn apply(&mut self, patch: StatePatch, at: Timestamp) -> Result<(), HbnbError> {
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

/// Client-writable attributes of a [`State`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatePatch {
    pub name: Option<String>,
}

/// Step-by-step builder for [`State`].
#[derive(Debug, Default)]
pub struct StateBuilder {
    id: Option<StateId>,
    name: Option<String>,
}

impl StateBuilder {
    #[must_use]
    pub fn id(mut self, id: StateId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`State`].
    ///
    /// # Errors
    ///
    /// Returns [`HbnbError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<State, HbnbError> {
        let ts = now();
        let state = State {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            created_at: ts,
            updated_at: ts,
        };
        state.validate()?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn should_build_valid_state_when_name_provided() {
        let state = State::builder().name("California").build().unwrap();
        assert_eq!(state.name, "California");
        assert_eq!(state.created_at, state.updated_at);
    }

    #[test]
    fn should_return_validation_error_when_name_is_missing() {
        let result = State::builder().build();
        assert!(matches!(
            result,
            Err(HbnbError::Validation(ValidationError::MissingField("name")))
        ));
    }

    #[test]
    fn should_rename_and_bump_updated_at_when_patched() {
        let mut state = State::builder().name("California").build().unwrap();
        let created_at = state.created_at;
        let later = created_at + Duration::seconds(5);

        state
            .apply(
                StatePatch {
                    name: Some("Nevada".to_string()),
                },
                later,
            )
            .unwrap();

        assert_eq!(state.name, "Nevada");
        assert_eq!(state.created_at, created_at);
        assert_eq!(state.updated_at, later);
    }

    #[test]
    fn should_leave_state_untouched_when_patch_empties_name() {
        let mut state = State::builder().name("California").build().unwrap();
        let before = state.clone();

        let result = state.apply(
            StatePatch {
                name: Some(String::new()),
            },
            now(),
        );

        assert!(result.is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn should_reject_unknown_keys_in_patch() {
        let result: Result<StatePatch, _> =
            serde_json::from_str(r#"{"name":"Nevada","capital":"Carson City"}"#);
        assert!(result.is_err());
    }
}
