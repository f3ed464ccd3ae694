use crate::selectors::{SUBITO_SELECTORS, SelectorTable};
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Marketplaces the wire protocol recognizes. Recognized is weaker than
/// supported: a marketplace without a selector profile can be named in a
/// request but never filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marketplace {
    Subito,
    Wallapop,
}

impl Marketplace {
    pub fn id(&self) -> &'static str {
        match self {
            Marketplace::Subito => "subito",
            Marketplace::Wallapop => "wallapop",
        }
    }

    /// Selector profile, for marketplaces whose form layout is mapped.
    pub fn profile(&self) -> Option<&'static MarketplaceProfile> {
        match self {
            Marketplace::Subito => Some(&SUBITO_PROFILE),
            Marketplace::Wallapop => None,
        }
    }
}

impl FromStr for Marketplace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "subito" => Ok(Marketplace::Subito),
            "wallapop" => Ok(Marketplace::Wallapop),
            other => Err(Error::UnknownMarketplace(other.to_string())),
        }
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything needed to drive one marketplace's publishing form.
#[derive(Debug)]
pub struct MarketplaceProfile {
    pub marketplace: Marketplace,
    pub display_name: &'static str,
    /// Where a fresh publishing flow starts.
    pub form_url: &'static str,
    /// Substrings that identify an already-open publishing tab.
    pub host_patterns: &'static [&'static str],
    pub selectors: &'static SelectorTable,
}

pub static SUBITO_PROFILE: MarketplaceProfile = MarketplaceProfile {
    marketplace: Marketplace::Subito,
    display_name: "Subito.it",
    form_url: "https://inserisci.subito.it/",
    host_patterns: &["inserisci.subito.it", "subito.it"],
    selectors: &SUBITO_SELECTORS,
};

/// Resolve a wire identifier to a fillable marketplace profile.
pub fn profile_for(id: &str) -> Result<&'static MarketplaceProfile> {
    let marketplace: Marketplace = id.parse()?;
    marketplace
        .profile()
        .ok_or_else(|| Error::UnsupportedMarketplace(marketplace.id().to_string()))
}
