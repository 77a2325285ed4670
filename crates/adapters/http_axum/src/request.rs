//! Request body and path helpers shared by the handlers.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use hbnb_domain::error::{NotFoundError, ValidationError};

/// A JSON body as extracted by axum, kept fallible so handlers decide when
/// a bad body is reported.
pub(crate) type Payload = Result<Json<Value>, JsonRejection>;

/// Keys no client may ever write.
pub(crate) const SERVER_MANAGED: [&str; 3] = ["id", "created_at", "updated_at"];

/// Parse a path segment as an id. Anything unparseable cannot name a record,
/// so it is reported as not found.
pub(crate) fn parse_id<I: FromStr>(raw: &str, entity: &'static str) -> Result<I, NotFoundError> {
    I::from_str(raw).map_err(|_| NotFoundError::new(entity, raw))
}

/// The body as a JSON object.
pub(crate) fn object(payload: Payload) -> Result<Map<String, Value>, ValidationError> {
    match payload {
        Ok(Json(Value::Object(map))) => Ok(map),
        _ => Err(ValidationError::NotJson),
    }
}

/// Fail with `Missing <field>` unless the body carries a non-null `field`.
pub(crate) fn require(map: &Map<String, Value>, field: &'static str) -> Result<(), ValidationError> {
    match map.get(field) {
        Some(value) if !value.is_null() => Ok(()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Fail with `Missing <field>` unless the body has a `field` key, whatever
/// its value.
pub(crate) fn present(map: &Map<String, Value>, field: &'static str) -> Result<(), ValidationError> {
    if map.contains_key(field) {
        Ok(())
    } else {
        Err(ValidationError::MissingField(field))
    }
}

/// Drop the `ignored` keys and deserialize what is left into `T`.
pub(crate) fn patch<T: DeserializeOwned>(
    mut map: Map<String, Value>,
    ignored: &[&str],
) -> Result<T, ValidationError> {
    for key in ignored {
        map.remove(*key);
    }
    serde_json::from_value(Value::Object(map))
        .map_err(|err| ValidationError::InvalidBody(err.to_string()))
}

/// Read an optional list of ids. Entries that are not strings or do not parse
/// are handed back separately so callers can pick their policy.
pub(crate) fn id_list<I: FromStr>(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<(Vec<I>, usize), ValidationError> {
    let items = match map.get(field) {
        None | Some(Value::Null) => return Ok((Vec::new(), 0)),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::InvalidField {
                field,
                reason: "must be a list of ids",
            });
        }
    };

    let mut ids = Vec::with_capacity(items.len());
    let mut rejected = 0;
    for item in items {
        match item.as_str().map(I::from_str) {
            Some(Ok(id)) => ids.push(id),
            _ => rejected += 1,
        }
    }
    Ok((ids, rejected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbnb_domain::id::StateId;
    use hbnb_domain::state::StatePatch;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn should_reject_non_object_body() {
        let result = object(Ok(Json(json!(["a", "b"]))));
        assert_eq!(result, Err(ValidationError::NotJson));
    }

    #[test]
    fn should_require_non_null_field() {
        let body = map(json!({"name": null, "user_id": "x"}));
        assert_eq!(require(&body, "user_id"), Ok(()));
        assert_eq!(
            require(&body, "name"),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn should_accept_null_as_present() {
        let body = map(json!({"user_id": null}));
        assert_eq!(present(&body, "user_id"), Ok(()));
        assert_eq!(
            present(&body, "name"),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn should_ignore_server_managed_keys() {
        let body = map(json!({"id": "1", "created_at": "x", "name": "Utah"}));
        let patch: StatePatch = patch(body, &SERVER_MANAGED).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Utah"));
    }

    #[test]
    fn should_reject_unknown_keys() {
        let body = map(json!({"name": "Utah", "capital": "Salt Lake City"}));
        let result: Result<StatePatch, _> = patch(body, &SERVER_MANAGED);
        assert!(matches!(result, Err(ValidationError::InvalidBody(_))));
    }

    #[test]
    fn should_count_unparseable_ids() {
        let good = StateId::new();
        let body = map(json!({"states": [good.to_string(), "nope", 3]}));
        let (ids, rejected) = id_list::<StateId>(&body, "states").unwrap();
        assert_eq!(ids, vec![good]);
        assert_eq!(rejected, 2);
    }

    #[test]
    fn should_treat_absent_list_as_empty() {
        let (ids, rejected) = id_list::<StateId>(&Map::new(), "states").unwrap();
        assert!(ids.is_empty());
        assert_eq!(rejected, 0);
    }

    #[test]
    fn should_report_unparseable_path_id_as_not_found() {
        let result = parse_id::<StateId>("not-a-uuid", "State");
        assert_eq!(result, Err(NotFoundError::new("State", "not-a-uuid")));
    }
}
