use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Wire field keys mapped to the values a fill pass should inject.
pub type FieldMap = BTreeMap<String, String>;

/// A semantic listing attribute, independent of how any marketplace renders
/// it. The wire keys are the Italian field names shared by the Airtable
/// base and the page protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    Title,
    Description,
    Price,
    Category,
    Condition,
    Brand,
    Color,
}

impl ListingField {
    /// Injection order for a fill pass: text fields first, attributes last.
    pub const ORDER: [ListingField; 7] = [
        ListingField::Title,
        ListingField::Description,
        ListingField::Price,
        ListingField::Category,
        ListingField::Condition,
        ListingField::Brand,
        ListingField::Color,
    ];

    /// Wire key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            ListingField::Title => "titolo",
            ListingField::Description => "descrizione",
            ListingField::Price => "prezzo",
            ListingField::Category => "categoria",
            ListingField::Condition => "condizione",
            ListingField::Brand => "marca",
            ListingField::Color => "colore",
        }
    }

    pub fn from_key(key: &str) -> Result<ListingField> {
        match key {
            "titolo" => Ok(ListingField::Title),
            "descrizione" => Ok(ListingField::Description),
            "prezzo" => Ok(ListingField::Price),
            "categoria" => Ok(ListingField::Category),
            "condizione" => Ok(ListingField::Condition),
            "marca" => Ok(ListingField::Brand),
            "colore" => Ok(ListingField::Color),
            other => Err(Error::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A draft listing pulled from the data source, normalized to plain
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftListing {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl DraftListing {
    /// Build the field map a compile request carries. Empty and missing
    /// values are left out so the injector never types blank strings.
    pub fn field_map(&self) -> FieldMap {
        let pairs: [(ListingField, Option<&String>); 7] = [
            (ListingField::Title, Some(&self.title)),
            (ListingField::Description, self.description.as_ref()),
            (ListingField::Price, self.price.as_ref()),
            (ListingField::Category, self.category.as_ref()),
            (ListingField::Condition, self.condition.as_ref()),
            (ListingField::Brand, self.brand.as_ref()),
            (ListingField::Color, self.color.as_ref()),
        ];

        let mut map = FieldMap::new();
        for (field, value) in pairs {
            if let Some(value) = value {
                if !value.trim().is_empty() {
                    map.insert(field.key().to_string(), value.clone());
                }
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DraftListing {
        DraftListing {
            id: "rec123".to_string(),
            title: "iPhone 13 Pro".to_string(),
            description: Some("Ottime condizioni".to_string()),
            price: Some("450".to_string()),
            category: Some("Elettronica".to_string()),
            condition: Some("Usato".to_string()),
            brand: None,
            color: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_order_covers_every_field_once() {
        assert_eq!(ListingField::ORDER.len(), 7);
        assert_eq!(ListingField::ORDER[0], ListingField::Title);
        assert_eq!(ListingField::ORDER[6], ListingField::Color);
        let mut seen = std::collections::HashSet::new();
        for field in ListingField::ORDER {
            assert!(seen.insert(field.key()));
        }
    }

    #[test]
    fn test_key_round_trip() {
        for field in ListingField::ORDER {
            assert_eq!(ListingField::from_key(field.key()).unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ListingField::from_key("taglia").unwrap_err();
        assert!(err.to_string().contains("taglia"));
    }

    #[test]
    fn test_field_map_skips_missing_and_blank_values() {
        let map = sample().field_map();
        assert_eq!(map.get("titolo").map(String::as_str), Some("iPhone 13 Pro"));
        assert_eq!(map.get("prezzo").map(String::as_str), Some("450"));
        // brand is None and color is whitespace only
        assert!(!map.contains_key("marca"));
        assert!(!map.contains_key("colore"));
        assert_eq!(map.len(), 5);
    }
}
