use gazza_core::listing::ListingField;

/// Field to CSS fallback chain. A chain is resolved with a single
/// `document.querySelector`, so alternatives are tried left to right and
/// ties fall to document order.
#[derive(Debug)]
pub struct SelectorTable {
    entries: &'static [(ListingField, &'static str)],
}

impl SelectorTable {
    pub fn chain(&self, field: ListingField) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, chain)| *chain)
    }

    pub fn fields(&self) -> impl Iterator<Item = ListingField> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }
}

/// Option markers scanned inside an opened custom dropdown.
pub const WIDGET_OPTION_MARKERS: &str = r#"[role="option"], .dropdown-item, li[data-value]"#;

/// Subito.it publishing form.
pub static SUBITO_SELECTORS: SelectorTable = SelectorTable {
    entries: &[
        (
            ListingField::Title,
            r#"input[placeholder*="Titolo"], input[name*="title"], input[data-qa*="title"]"#,
        ),
        (
            ListingField::Description,
            r#"textarea[placeholder*="Descrizione"], textarea[name*="description"], div[contenteditable="true"]"#,
        ),
        (
            ListingField::Price,
            r#"input[placeholder*="Prezzo"], input[name*="price"], input[data-qa*="price"]"#,
        ),
        (
            ListingField::Category,
            r#"select[name*="category"], button[data-qa*="category"]"#,
        ),
        (
            ListingField::Condition,
            r#"select[name*="condition"], button[data-qa*="condition"]"#,
        ),
        (
            ListingField::Brand,
            r#"input[placeholder*="Marca"], input[name*="brand"]"#,
        ),
        (
            ListingField::Color,
            r#"input[placeholder*="Colore"], select[name*="color"]"#,
        ),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_subito_chain() {
        for field in ListingField::ORDER {
            assert!(SUBITO_SELECTORS.chain(field).is_some(), "missing chain for {field}");
        }
    }

    #[test]
    fn test_chains_prefer_labeled_controls() {
        let title = SUBITO_SELECTORS.chain(ListingField::Title).unwrap();
        assert!(title.starts_with(r#"input[placeholder*="Titolo"]"#));
        let description = SUBITO_SELECTORS.chain(ListingField::Description).unwrap();
        assert!(description.contains("div[contenteditable"));
    }

    #[test]
    fn test_fields_iterates_the_whole_table() {
        assert_eq!(SUBITO_SELECTORS.fields().count(), ListingField::ORDER.len());
    }
}
