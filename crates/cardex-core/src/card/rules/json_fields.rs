//! Recursive mapping of an arbitrary JSON tree onto a business card.

use serde_json::{Map, Value};
use tracing::debug;

use super::synonyms::{resolve_property, ValueShape};
use crate::models::card::{BusinessCard, CanonicalField};

/// Walk `value` and write every recognized property into `card`.
///
/// Properties no rule claims are descended into, so fields survive any
/// amount of wrapper nesting. Bare scalars are ignored.
pub fn map_json(value: &Value, card: &mut BusinessCard) {
    match value {
        Value::Object(map) => map_object(map, card),
        Value::Array(items) => {
            for item in items {
                map_json(item, card);
            }
        }
        _ => {}
    }
}

fn map_object(map: &Map<String, Value>, card: &mut BusinessCard) {
    for (name, value) in map {
        let Some(rule) = resolve_property(name, value) else {
            map_json(value, card);
            continue;
        };

        debug!("Property {} -> {}", name, rule.field);

        match rule.shape {
            ValueShape::Scalar => {
                if let Some(s) = scalar_string(value) {
                    card.set(rule.field, s);
                }
            }
            ValueShape::FirstOf => match value {
                Value::Array(items) => {
                    if let Some(first) = items
                        .iter()
                        .filter_map(scalar_string)
                        .find(|s| !s.trim().is_empty())
                    {
                        card.set(rule.field, first);
                    }
                }
                _ => {
                    if let Some(s) = scalar_string(value) {
                        card.set(rule.field, s);
                    }
                }
            },
            ValueShape::List => {
                if let Value::Array(items) = value {
                    let list: Vec<String> = items
                        .iter()
                        .filter_map(Value::as_str)
                        .filter(|s| !s.trim().is_empty())
                        .map(str::to_string)
                        .collect();
                    set_list(card, rule.field, list);
                }
            }
            ValueShape::Address => match value {
                Value::String(s) => card.set(rule.field, s.as_str()),
                Value::Object(parts) => card.set(rule.field, flatten_object(parts)),
                _ => {}
            },
            ValueShape::Fax => match value {
                Value::String(s) => card.set(rule.field, s.as_str()),
                Value::Object(inner) => {
                    if let Some(Value::String(number)) = inner.get("phone_number") {
                        card.set(rule.field, number.as_str());
                    }
                }
                _ => {}
            },
        }
    }
}

fn set_list(card: &mut BusinessCard, field: CanonicalField, list: Vec<String>) {
    match field {
        CanonicalField::Emails => {
            if !list.is_empty() {
                card.emails = Some(list);
            }
        }
        other => {
            if let Some(first) = list.into_iter().next() {
                card.set(other, first);
            }
        }
    }
}

/// Strings as-is, numbers and booleans in their JSON text form.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `{"street": "Main", "zip": 1}` -> `street:Main, zip:1`
fn flatten_object(parts: &Map<String, Value>) -> String {
    let mut combined = String::new();
    for (key, value) in parts {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        combined.push_str(&format!("{key}:{value}, "));
    }
    combined.trim_end_matches([' ', ',']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> BusinessCard {
        let mut card = BusinessCard::new();
        map_json(&value, &mut card);
        card
    }

    #[test]
    fn test_flat_object() {
        let card = map(json!({
            "name": "Ada",
            "surname": "Lovelace",
            "title": "Countess",
            "organization": "Analytical Engines Ltd",
            "phone": "123",
            "webAddress": "ada.dev"
        }));

        assert_eq!(card.name.as_deref(), Some("Ada"));
        assert_eq!(card.surname.as_deref(), Some("Lovelace"));
        assert_eq!(card.titles.as_deref(), Some("Countess"));
        assert_eq!(card.organization.as_deref(), Some("Analytical Engines Ltd"));
        assert_eq!(card.phone.as_deref(), Some("123"));
        assert_eq!(card.web_address.as_deref(), Some("ada.dev"));
    }

    #[test]
    fn test_email_array_drops_blanks() {
        let card = map(json!({ "email": ["", "a@x.com", ""] }));
        assert_eq!(card.emails, Some(vec!["a@x.com".to_string()]));
    }

    #[test]
    fn test_scalar_email_not_handled() {
        let card = map(json!({ "email": "a@x.com", "email_address": "b@x.com" }));
        assert_eq!(card.emails, None);
        assert_eq!(card.address, None);
    }

    #[test]
    fn test_phone_array_takes_first_non_blank() {
        let card = map(json!({ "telefon": [" ", "+90 324 361", "+90 532 258"] }));
        assert_eq!(card.phone.as_deref(), Some("+90 324 361"));
    }

    #[test]
    fn test_nested_wrappers_are_searched() {
        let card = map(json!({
            "business_card": {
                "contact": [
                    { "phone_number": "0324" },
                    { "emails": ["x@y.z"] }
                ],
                "person": { "full_name": "Fahri Ozsungur" }
            }
        }));

        assert_eq!(card.phone.as_deref(), Some("0324"));
        assert_eq!(card.emails, Some(vec!["x@y.z".to_string()]));
        assert_eq!(card.name.as_deref(), Some("Fahri Ozsungur"));
    }

    #[test]
    fn test_address_object_flattened_in_order() {
        let card = map(json!({
            "adres": { "street": "Ciftlikkoy", "city": "Mersin", "zip": 33343 }
        }));
        assert_eq!(
            card.address.as_deref(),
            Some("street:Ciftlikkoy, city:Mersin, zip:33343")
        );
    }

    #[test]
    fn test_fax_object_phone_number() {
        let card = map(json!({ "fax": { "country_code": "+90", "phone_number": "3243610002" } }));
        assert_eq!(card.fax.as_deref(), Some("3243610002"));

        let card = map(json!({ "Fax": "555-0000" }));
        assert_eq!(card.fax.as_deref(), Some("555-0000"));
    }

    #[test]
    fn test_web_address_key_is_not_postal_address() {
        let card = map(json!({ "web_address": "acme.test", "address": "1 Main St" }));
        assert_eq!(card.web_address.as_deref(), Some("acme.test"));
        assert_eq!(card.address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn test_bare_scalars_ignored() {
        let card = map(json!(["Ada", 1, true, null]));
        assert!(card.is_empty());
    }

    #[test]
    fn test_matched_key_with_object_value_is_not_descended() {
        // "title" claims the property even though the value is not a string.
        let card = map(json!({ "title": { "phone": "123" } }));
        assert_eq!(card.titles, None);
        assert_eq!(card.phone, None);
    }

    #[test]
    fn test_blank_email_list_leaves_emails_absent() {
        let card = map(json!({ "emails": ["", "  "] }));
        assert_eq!(card.emails, None);
        assert!(card.is_empty());
    }
}
