//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HbnbError`]
//! via `#[from]`. The `Display` text of [`ValidationError`] is what clients
//! see as the description of a `400 Bad Request`.

/// Top-level error returned by domain logic, services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum HbnbError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A failure outside storage that the caller cannot act on, such as
    /// password hashing.
    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A request or record that breaks a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The request body is absent, malformed, or not a JSON object.
    #[error("Not a JSON")]
    NotJson,

    /// A required attribute is absent or empty.
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// The body carries a key outside the allow-list or a value of the wrong type.
    #[error("Invalid body: {0}")]
    InvalidBody(String),

    /// An attribute holds a value outside its domain.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

/// A lookup that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl NotFoundError {
    /// Build a not-found error for a record kind and a displayable id.
    #[must_use]
    pub fn new(entity: &'static str, id: impl ToString) -> Self {
        Self {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_missing_field_like_the_api_does() {
        let err = ValidationError::MissingField("user_id");
        assert_eq!(err.to_string(), "Missing user_id");
    }

    #[test]
    fn should_describe_non_json_body() {
        assert_eq!(ValidationError::NotJson.to_string(), "Not a JSON");
    }

    #[test]
    fn should_keep_validation_text_when_wrapped() {
        let err: HbnbError = ValidationError::MissingField("name").into();
        assert_eq!(err.to_string(), "Missing name");
    }

    #[test]
    fn should_name_kind_and_id_when_not_found() {
        let err = NotFoundError::new("State", "abc");
        assert_eq!(err.to_string(), "State not found: abc");
    }
}
