//! Read-only display rows for a single country.

use crate::source::Country;

/// Shown when a country has no languages or currencies.
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDetail {
    pub title: String,
    pub flag: String,
    pub region: String,
    pub population: String,
    pub languages: String,
    pub currencies: String,
    pub timezones: Vec<String>,
}

impl CountryDetail {
    pub fn from_country(country: &Country) -> Self {
        let languages = if country.languages.is_empty() {
            NOT_APPLICABLE.to_string()
        } else {
            country
                .languages
                .values()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let currencies = if country.currencies.is_empty() {
            NOT_APPLICABLE.to_string()
        } else {
            country
                .currencies
                .values()
                .map(|c| format!("{} ({})", c.name, c.symbol.as_deref().unwrap_or("")))
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            title: country.name.clone(),
            flag: country.flag.clone(),
            region: country.region.to_string(),
            population: group_thousands(country.population),
            languages,
            currencies,
            timezones: country.timezones.iter().map(|tz| format!("- {tz}")).collect(),
        }
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
