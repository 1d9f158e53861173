//! Click decoding - raw widget payloads to [`ClickEvent`]
//!
//! Accepted shapes:
//!
//! - `{"nodes": ["concept::X", ...]}` or `{"nodes": "concept::X"}`
//! - `{"node": ...}` / `{"id": ...}`, possibly nested
//! - `["concept::X", ...]` or `[{"id": "concept::X"}, ...]`
//! - `"concept::X"`
//!
//! `null`, `{}`, blank strings and empty lists decode to
//! [`ClickEvent::NoSelection`]. Anything else, including a non-empty list
//! with no usable identifier, decodes to [`ClickEvent::Invalid`].

use serde_json::Value;
use syllabus_domain::ClickEvent;
use tracing::debug;

/// Decode a parsed click payload
pub fn decode_click(value: &Value) -> ClickEvent {
    let event = match value {
        Value::Null => ClickEvent::NoSelection,
        Value::String(id) => single(id),
        Value::Array(items) => list(items),
        Value::Object(map) => {
            if let Some(nodes) = map.get("nodes") {
                match nodes {
                    Value::Array(items) => list(items),
                    other => decode_click(other),
                }
            } else if let Some(inner) = map.get("node").or_else(|| map.get("id")) {
                decode_click(inner)
            } else if map.is_empty() {
                ClickEvent::NoSelection
            } else {
                ClickEvent::Invalid
            }
        }
        Value::Bool(_) | Value::Number(_) => ClickEvent::Invalid,
    };
    debug!("Decoded click payload as {:?}", event);
    event
}

/// Decode a click payload from text
///
/// Text that is not JSON is taken as a bare node identifier.
pub fn decode_click_str(raw: &str) -> ClickEvent {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ClickEvent::NoSelection;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => decode_click(&value),
        Err(_) => ClickEvent::SingleId(trimmed.to_string()),
    }
}

fn single(id: &str) -> ClickEvent {
    if id.trim().is_empty() {
        ClickEvent::NoSelection
    } else {
        ClickEvent::SingleId(id.to_string())
    }
}

fn list(items: &[Value]) -> ClickEvent {
    if items.is_empty() {
        return ClickEvent::NoSelection;
    }
    let ids: Vec<String> = items
        .iter()
        .filter_map(|item| match item {
            Value::String(id) => Some(id.clone()),
            Value::Object(map) => map.get("id").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect();
    if ids.is_empty() {
        ClickEvent::Invalid
    } else {
        ClickEvent::NodeList(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nodes_list() {
        let event = decode_click(&json!({"nodes": ["concept::Friction", "concept::Motion"]}));
        assert_eq!(event.normalize(), Some("Friction".to_string()));
    }

    #[test]
    fn test_nodes_string() {
        let event = decode_click(&json!({"nodes": "concept::Friction"}));
        assert_eq!(event, ClickEvent::SingleId("concept::Friction".into()));
    }

    #[test]
    fn test_nested_node() {
        let event = decode_click(&json!({"node": {"id": "concept::Friction"}}));
        assert_eq!(event.normalize(), Some("Friction".to_string()));
    }

    #[test]
    fn test_array_of_objects() {
        let event = decode_click(&json!([{"id": "concept::Motion"}, {"label": "x"}]));
        assert_eq!(event, ClickEvent::NodeList(vec!["concept::Motion".into()]));
    }

    #[test]
    fn test_empty_events() {
        assert_eq!(decode_click(&json!(null)), ClickEvent::NoSelection);
        assert_eq!(decode_click(&json!({})), ClickEvent::NoSelection);
        assert_eq!(decode_click(&json!({"nodes": []})), ClickEvent::NoSelection);
        assert_eq!(decode_click(&json!([])), ClickEvent::NoSelection);
        assert_eq!(decode_click(&json!("")), ClickEvent::NoSelection);
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert_eq!(decode_click(&json!(42)), ClickEvent::Invalid);
        assert_eq!(decode_click(&json!(true)), ClickEvent::Invalid);
        assert_eq!(decode_click(&json!({"edges": []})), ClickEvent::Invalid);
        assert_eq!(decode_click(&json!({"nodes": [1, 2]})), ClickEvent::Invalid);
        assert_eq!(decode_click(&json!([{"label": "x"}])), ClickEvent::Invalid);
        assert_eq!(decode_click(&json!({"node": 7})), ClickEvent::Invalid);
    }

    #[test]
    fn test_decode_from_text() {
        assert_eq!(
            decode_click_str("concept::Friction").normalize(),
            Some("Friction".to_string())
        );
        assert_eq!(
            decode_click_str(r#"{"nodes":["domain::Physics"]}"#).normalize(),
            None
        );
        assert_eq!(decode_click_str("   "), ClickEvent::NoSelection);
        assert_eq!(decode_click_str("42"), ClickEvent::Invalid);
    }
}
