use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse geographic grouping as delivered by the dataset.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Africa,
    Americas,
    Antarctic,
    Asia,
    Europe,
    Oceania,
    /// Anything the dataset adds later. Only reachable through `RegionFilter::All`.
    #[serde(other)]
    Unknown,
}

impl Region {
    /// Regions offered in the filter bar, in display order.
    pub const SELECTABLE: [Region; 6] = [
        Region::Africa,
        Region::Americas,
        Region::Antarctic,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Antarctic => "Antarctic",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
            Region::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Currency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// A country as the rest of the application sees it.
///
/// `name` is the common display name and doubles as the identifier for
/// filtering and favoriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub name: String,
    pub flag: String,
    pub region: Region,
    pub population: u64,
    pub languages: BTreeMap<String, String>,
    pub currencies: BTreeMap<String, Currency>,
    pub timezones: Vec<String>,
}

// ============================================================================
// Wire Types (REST Countries v3.1)
// ============================================================================

#[derive(Deserialize, Debug)]
struct WireName {
    common: String,
}

#[derive(Deserialize, Debug, Default)]
struct WireFlags {
    #[serde(default)]
    png: String,
}

/// One element of the `/all` response array.
#[derive(Deserialize, Debug)]
pub(crate) struct WireCountry {
    name: WireName,
    #[serde(default)]
    flags: WireFlags,
    region: Region,
    #[serde(default)]
    population: u64,
    // Both maps are absent for e.g. Antarctica
    #[serde(default)]
    languages: Option<BTreeMap<String, String>>,
    #[serde(default)]
    currencies: Option<BTreeMap<String, Currency>>,
    #[serde(default)]
    timezones: Vec<String>,
}

impl From<WireCountry> for Country {
    fn from(wire: WireCountry) -> Self {
        Country {
            name: wire.name.common,
            flag: wire.flags.png,
            region: wire.region,
            population: wire.population,
            languages: wire.languages.unwrap_or_default(),
            currencies: wire.currencies.unwrap_or_default(),
            timezones: wire.timezones,
        }
    }
}
