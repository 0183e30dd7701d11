//! Search text + region predicate over the country list.

use std::fmt;

use crate::source::{Country, Region};

/// Region selection, with `All` as the no-op wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    /// Every choice offered in the filter bar, `All` first.
    pub fn choices() -> impl Iterator<Item = RegionFilter> {
        std::iter::once(RegionFilter::All).chain(Region::SELECTABLE.into_iter().map(RegionFilter::Only))
    }

    /// Cycles forward through `choices()` (wraps around)
    pub fn next(self) -> RegionFilter {
        self.step(1)
    }

    /// Cycles backward through `choices()` (wraps around)
    pub fn prev(self) -> RegionFilter {
        self.step(-1)
    }

    fn step(self, delta: isize) -> RegionFilter {
        let choices: Vec<RegionFilter> = Self::choices().collect();
        let len = choices.len() as isize;
        let current = choices.iter().position(|c| *c == self).unwrap_or(0) as isize;
        choices[(current + delta).rem_euclid(len) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            RegionFilter::All => "All",
            RegionFilter::Only(region) => region.label(),
        }
    }

    pub fn admits(self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(wanted) => wanted == region,
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_text: String,
    pub region: RegionFilter,
}

impl FilterCriteria {
    /// Name contains the search text (case-insensitive) and the region matches.
    pub fn matches(&self, country: &Country) -> bool {
        self.region.admits(country.region)
            && country
                .name
                .to_lowercase()
                .contains(&self.search_text.to_lowercase())
    }

    /// Countries that pass `matches`, in their original order.
    pub fn apply<'a>(&self, countries: &'a [Country]) -> Vec<&'a Country> {
        countries.iter().filter(|c| self.matches(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::country;

    fn names(view: Vec<&Country>) -> Vec<&str> {
        view.into_iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything() {
        let countries = vec![
            country("Chad", Region::Africa),
            country("Chile", Region::Americas),
            country("Antarctica", Region::Antarctic),
        ];
        let view = FilterCriteria::default().apply(&countries);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let countries = vec![
            country("Chad", Region::Africa),
            country("Chile", Region::Americas),
            country("Czechia", Region::Europe),
        ];
        let criteria = FilterCriteria {
            search_text: "CH".to_string(),
            region: RegionFilter::All,
        };
        assert_eq!(names(criteria.apply(&countries)), vec!["Chad", "Chile", "Czechia"]);

        let criteria = FilterCriteria {
            search_text: "hil".to_string(),
            region: RegionFilter::All,
        };
        assert_eq!(names(criteria.apply(&countries)), vec!["Chile"]);
    }

    #[test]
    fn test_region_and_text_combine() {
        let countries = vec![country("Chad", Region::Africa), country("Chile", Region::Americas)];
        let criteria = FilterCriteria {
            search_text: "ch".to_string(),
            region: RegionFilter::Only(Region::Africa),
        };
        assert_eq!(names(criteria.apply(&countries)), vec!["Chad"]);
    }

    #[test]
    fn test_non_ascii_names_fold_case() {
        let countries = vec![country("Åland Islands", Region::Europe)];
        let criteria = FilterCriteria {
            search_text: "åland".to_string(),
            region: RegionFilter::All,
        };
        assert!(criteria.matches(&countries[0]));
    }

    #[test]
    fn test_apply_agrees_with_matches() {
        let countries = vec![
            country("Chad", Region::Africa),
            country("Chile", Region::Americas),
            country("Peru", Region::Americas),
            country("Niger", Region::Africa),
        ];
        for region in RegionFilter::choices() {
            for text in ["", "e", "ch", "x", "NIG"] {
                let criteria = FilterCriteria {
                    search_text: text.to_string(),
                    region,
                };
                let expected: Vec<&Country> =
                    countries.iter().filter(|c| criteria.matches(c)).collect();
                assert_eq!(criteria.apply(&countries), expected, "{region} / {text:?}");
            }
        }
    }

    #[test]
    fn test_region_cycle_wraps() {
        assert_eq!(RegionFilter::All.next(), RegionFilter::Only(Region::Africa));
        assert_eq!(RegionFilter::All.prev(), RegionFilter::Only(Region::Oceania));
        assert_eq!(RegionFilter::Only(Region::Oceania).next(), RegionFilter::All);
        assert_eq!(RegionFilter::choices().count(), 7);
    }
}
