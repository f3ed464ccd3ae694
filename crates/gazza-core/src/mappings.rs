use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Category name → suggested attribute fields, persisted as a flat JSON
/// object so the file stays hand-editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMappings {
    #[serde(flatten)]
    categories: BTreeMap<String, Vec<String>>,
}

impl CategoryMappings {
    /// The mappings every fresh install starts with.
    pub fn defaults() -> Self {
        let mut categories = BTreeMap::new();
        categories.insert(
            "Smartphone".to_string(),
            fields(&["Marca", "Modello", "Memoria", "Batteria %", "Condizione"]),
        );
        categories.insert(
            "Abbigliamento".to_string(),
            fields(&["Taglia", "Colore", "Brand", "Materiale", "Condizione"]),
        );
        categories.insert(
            "Arredi".to_string(),
            fields(&["Colore", "Materiale", "Dimensioni", "Condizione"]),
        );
        categories.insert(
            "Elettronica".to_string(),
            fields(&["Marca", "Modello", "Anno", "Condizione"]),
        );
        CategoryMappings { categories }
    }

    /// Load from disk; a missing or empty file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::defaults());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::defaults());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Add or replace a category.
    pub fn set(&mut self, category: impl Into<String>, fields: Vec<String>) {
        self.categories.insert(category.into(), fields);
    }

    /// Returns false when the category did not exist.
    pub fn remove(&mut self, category: &str) -> bool {
        self.categories.remove(category).is_some()
    }

    pub fn suggested_fields(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
