//! The item record exchanged with the upstream Items API.
//!
//! Every field is independently nullable in transit. Missing keys decode as
//! `None`; encoding always writes all three keys so the upstream sees the
//! same shape it produces.

use serde::{Deserialize, Serialize};

/// A single item as carried on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,
}

impl Item {
    pub fn new(id: Option<String>, description: Option<String>, price: Option<f64>) -> Self {
        Self {
            id,
            description,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_all_fields_including_nulls() {
        let item = Item::new(None, Some("X".to_string()), Some(9.99));
        let json = serde_json::to_value(&item).unwrap();
        assert!(json["id"].is_null());
        assert_eq!(json["description"], "X");
        assert_eq!(json["price"], 9.99);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_missing_fields_decode_as_none() {
        let item: Item = serde_json::from_str(r#"{"description":"only"}"#).unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.description.as_deref(), Some("only"));
        assert_eq!(item.price, None);
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let samples = [
            Item::new(Some("1".to_string()), Some("A".to_string()), Some(1.5)),
            Item::new(None, None, None),
            Item::new(Some("ü-42".to_string()), Some("quote \" and ]".to_string()), Some(-0.25)),
        ];
        for item in samples {
            let encoded = serde_json::to_string(&item).unwrap();
            let decoded: Item = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, item);
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let item: Item =
            serde_json::from_str(r#"{"id":"7","description":"d","price":2,"extra":true}"#).unwrap();
        assert_eq!(item.id.as_deref(), Some("7"));
        assert_eq!(item.price, Some(2.0));
    }
}
