use serde_json::{json, Map, Value};

use crate::database::models::{Boat, Load, User};
use crate::database::Page;
use crate::middleware::BaseUrl;

pub fn boat_link(base: &BaseUrl, boat_id: &str) -> String {
    base.link(&format!("/boats/{}", boat_id))
}

pub fn load_link(base: &BaseUrl, load_id: &str) -> String {
    base.link(&format!("/loads/{}", load_id))
}

/// Convert a Boat into its public wire format
/// { id, name, type, length, owner, loads: [{ id, self }], self }
pub fn boat_to_api_value(boat: &Boat, base: &BaseUrl) -> Value {
    let loads: Vec<Value> = boat
        .loads
        .iter()
        .map(|l| json!({ "id": l.id, "self": load_link(base, &l.id) }))
        .collect();

    json!({
        "id": boat.id,
        "name": boat.name,
        "type": boat.boat_type,
        "length": boat.length,
        "owner": boat.owner,
        "loads": loads,
        "self": boat_link(base, &boat.id),
    })
}

/// Convert a Load into its public wire format; `carrier` is null when unassigned
pub fn load_to_api_value(load: &Load, base: &BaseUrl) -> Value {
    let carrier = match &load.carrier {
        Some(c) => json!({ "id": c.id, "name": c.name, "self": boat_link(base, &c.id) }),
        None => Value::Null,
    };

    json!({
        "id": load.id,
        "volume": load.volume,
        "content": load.content,
        "creation_date": load.creation_date,
        "carrier": carrier,
        "self": load_link(base, &load.id),
    })
}

pub fn user_to_api_value(user: &User, base: &BaseUrl) -> Value {
    json!({
        "id": user.id,
        "self": base.link(&format!("/users/{}", user.id)),
    })
}

/// Wrap a page of items as `{ "<key>": [...], "total_items": N, "next"?: url }`.
///
/// `collection_path` is the path the next link is built on, e.g. `/boats`.
pub fn page_to_api_value<T>(
    page: &Page<T>,
    key: &str,
    collection_path: &str,
    base: &BaseUrl,
    item: impl Fn(&T) -> Value,
) -> Value {
    let mut obj = Map::new();
    obj.insert(
        key.to_string(),
        Value::Array(page.items.iter().map(item).collect()),
    );
    obj.insert("total_items".into(), json!(page.total));
    if let Some(next) = page.next_offset() {
        obj.insert(
            "next".into(),
            Value::String(base.link(&format!("{}?offset={}", collection_path, next))),
        );
    }
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Carrier;

    fn base() -> BaseUrl {
        BaseUrl("http://localhost:8080".into())
    }

    #[test]
    fn boat_links_its_loads() {
        let mut boat = Boat::new("u1", "Sea Witch".into(), "Catamaran".into(), 28);
        boat.add_load("l1");

        let value = boat_to_api_value(&boat, &base());
        assert_eq!(value["type"], "Catamaran");
        assert_eq!(value["owner"], "u1");
        assert_eq!(value["loads"][0]["self"], "http://localhost:8080/loads/l1");
        assert_eq!(value["self"], format!("http://localhost:8080/boats/{}", boat.id));
    }

    #[test]
    fn load_carrier_is_null_or_linked() {
        let mut load = Load::new(5, "LEGO Blocks".into(), "10/18/2026".into());
        assert!(load_to_api_value(&load, &base())["carrier"].is_null());

        load.carrier = Some(Carrier { id: "b1".into(), name: "Sea Witch".into() });
        let value = load_to_api_value(&load, &base());
        assert_eq!(value["carrier"]["name"], "Sea Witch");
        assert_eq!(value["carrier"]["self"], "http://localhost:8080/boats/b1");
    }

    #[test]
    fn page_has_next_only_when_more_remain() {
        let page = Page { items: vec![1, 2], total: 3, offset: 0 };
        let value = page_to_api_value(&page, "n", "/n", &base(), |i| json!(i));
        assert_eq!(value["total_items"], 3);
        assert_eq!(value["next"], "http://localhost:8080/n?offset=2");

        let last = Page { items: vec![3], total: 3, offset: 2 };
        let value = page_to_api_value(&last, "n", "/n", &base(), |i| json!(i));
        assert!(value.get("next").is_none());
    }
}
