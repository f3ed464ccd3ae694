use gazza_core::listing::DraftListing;
use serde::Deserialize;

/// One page of a list query.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPage {
    pub records: Vec<AirtableRecord>,
}

/// A record as Airtable returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    pub fields: ListingFields,
}

/// The columns of the listings table. Every column is optional because
/// Airtable omits empty cells from the payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFields {
    #[serde(rename = "Titolo", default)]
    pub titolo: Option<String>,
    #[serde(rename = "Descrizione", default)]
    pub descrizione: Option<String>,
    #[serde(rename = "Prezzo", default)]
    pub prezzo: Option<FieldValue>,
    #[serde(rename = "Categoria", default)]
    pub categoria: Option<String>,
    #[serde(rename = "Condizione", default)]
    pub condizione: Option<String>,
    #[serde(rename = "Marca", default)]
    pub marca: Option<String>,
    #[serde(rename = "Colore", default)]
    pub colore: Option<String>,
    #[serde(rename = "Stato", default)]
    pub stato: Option<String>,
}

/// Airtable returns numbers for currency columns and strings for plain
/// text, so the price cell can be either.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Render the cell as the text a form expects. Whole numbers drop the
    /// trailing `.0`.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(n) if n.fract() == 0.0 => format!("{}", *n as i64),
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

impl AirtableRecord {
    /// Normalize to the domain listing shape.
    pub fn to_listing(&self) -> DraftListing {
        DraftListing {
            id: self.id.clone(),
            title: self.fields.titolo.clone().unwrap_or_default(),
            description: self.fields.descrizione.clone(),
            price: self.fields.prezzo.as_ref().map(FieldValue::as_text),
            category: self.fields.categoria.clone(),
            condition: self.fields.condizione.clone(),
            brand: self.fields.marca.clone(),
            color: self.fields.colore.clone(),
        }
    }
}
