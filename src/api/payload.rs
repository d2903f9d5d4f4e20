// Request body validation for boat and load writes
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::ApiError;
use crate::services::{BoatChanges, LoadChanges};

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    /// Non-empty string
    Text,
    /// Non-negative integer
    Count,
}

const BOAT_FIELDS: &[(&str, FieldKind)] = &[
    ("name", FieldKind::Text),
    ("type", FieldKind::Text),
    ("length", FieldKind::Count),
];
const BOAT_READ_ONLY: &[&str] = &["id", "owner", "loads", "self"];

const LOAD_FIELDS: &[(&str, FieldKind)] = &[
    ("volume", FieldKind::Count),
    ("content", FieldKind::Text),
    ("creation_date", FieldKind::Text),
];
const LOAD_READ_ONLY: &[&str] = &["id", "carrier", "self"];

/// Which attributes a write must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// POST and PUT: every attribute
    All,
    /// PATCH: any non-empty subset
    AtLeastOne,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBoat {
    pub name: String,
    pub boat_type: String,
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLoad {
    pub volume: u64,
    pub content: String,
    pub creation_date: String,
}

pub fn new_boat(body: &Map<String, Value>) -> Result<NewBoat, ApiError> {
    validate(body, BOAT_FIELDS, BOAT_READ_ONLY, Presence::All)?;
    Ok(NewBoat {
        name: text(body, "name").unwrap_or_default(),
        boat_type: text(body, "type").unwrap_or_default(),
        length: count(body, "length").unwrap_or_default(),
    })
}

pub fn boat_changes(body: &Map<String, Value>, presence: Presence) -> Result<BoatChanges, ApiError> {
    validate(body, BOAT_FIELDS, BOAT_READ_ONLY, presence)?;
    Ok(BoatChanges {
        name: text(body, "name"),
        boat_type: text(body, "type"),
        length: count(body, "length"),
    })
}

pub fn new_load(body: &Map<String, Value>) -> Result<NewLoad, ApiError> {
    validate(body, LOAD_FIELDS, LOAD_READ_ONLY, Presence::All)?;
    Ok(NewLoad {
        volume: count(body, "volume").unwrap_or_default(),
        content: text(body, "content").unwrap_or_default(),
        creation_date: text(body, "creation_date").unwrap_or_default(),
    })
}

pub fn load_changes(body: &Map<String, Value>, presence: Presence) -> Result<LoadChanges, ApiError> {
    validate(body, LOAD_FIELDS, LOAD_READ_ONLY, presence)?;
    Ok(LoadChanges {
        volume: count(body, "volume"),
        content: text(body, "content"),
        creation_date: text(body, "creation_date"),
    })
}

fn text(body: &Map<String, Value>, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_string)
}

fn count(body: &Map<String, Value>, field: &str) -> Option<u64> {
    body.get(field).and_then(Value::as_u64)
}

fn validate(
    body: &Map<String, Value>,
    fields: &[(&str, FieldKind)],
    read_only: &[&str],
    presence: Presence,
) -> Result<(), ApiError> {
    let mut errors = HashMap::new();

    for key in body.keys() {
        if read_only.contains(&key.as_str()) {
            errors.insert(key.clone(), "This field cannot be set".to_string());
        } else if !fields.iter().any(|(name, _)| *name == key.as_str()) {
            errors.insert(key.clone(), "Unknown attribute".to_string());
        }
    }

    for (name, kind) in fields {
        match (body.get(*name), kind) {
            (None, _) if presence == Presence::All => {
                errors.insert(name.to_string(), "This field is required".to_string());
            }
            (None, _) => {}
            (Some(Value::String(s)), FieldKind::Text) if !s.trim().is_empty() => {}
            (Some(_), FieldKind::Text) => {
                errors.insert(name.to_string(), "Must be a non-empty string".to_string());
            }
            (Some(v), FieldKind::Count) if v.as_u64().is_some() => {}
            (Some(_), FieldKind::Count) => {
                errors.insert(name.to_string(), "Must be a non-negative integer".to_string());
            }
        }
    }

    if presence == Presence::AtLeastOne && !fields.iter().any(|(name, _)| body.contains_key(*name)) {
        return Err(ApiError::validation_error(
            "Request body must contain at least one updatable attribute",
            if errors.is_empty() { None } else { Some(errors) },
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error(
            "The request object is missing at least one of the required attributes or has invalid ones",
            Some(errors),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn field_errors(err: ApiError) -> HashMap<String, String> {
        match err {
            ApiError::ValidationError { field_errors, .. } => field_errors.unwrap_or_default(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn new_boat_requires_every_attribute() {
        let boat = new_boat(&body(json!({"name": "Sea Witch", "type": "Catamaran", "length": 28}))).unwrap();
        assert_eq!(boat.boat_type, "Catamaran");

        let errors = field_errors(new_boat(&body(json!({"name": "Sea Witch"}))).unwrap_err());
        assert!(errors.contains_key("type"));
        assert!(errors.contains_key("length"));
    }

    #[test]
    fn rejects_read_only_unknown_and_mistyped_attributes() {
        let errors = field_errors(
            new_boat(&body(json!({
                "id": "x", "name": "", "type": "Sloop", "length": -3, "color": "red"
            })))
            .unwrap_err(),
        );
        assert_eq!(errors["id"], "This field cannot be set");
        assert_eq!(errors["color"], "Unknown attribute");
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("length"));

        let errors = field_errors(load_changes(&body(json!({"carrier": null})), Presence::AtLeastOne).unwrap_err());
        assert!(errors.contains_key("carrier"));
    }

    #[test]
    fn patch_takes_a_subset() {
        let changes = load_changes(&body(json!({"content": "Cheese"})), Presence::AtLeastOne).unwrap();
        assert_eq!(changes.content.as_deref(), Some("Cheese"));
        assert_eq!(changes.volume, None);

        assert!(boat_changes(&Map::new(), Presence::AtLeastOne).is_err());
        assert!(load_changes(&body(json!({"content": "Cheese"})), Presence::All).is_err());
    }
}
