//! # List View-Model
//!
//! Core browsing state for atlas. Domain logic only, no TUI types.
//!
//! ```text
//! ListViewModel
//! ├── all_countries: Vec<Country>   // authoritative fetched dataset
//! ├── favorites: FavoriteSet        // in-memory source of truth
//! ├── criteria: FilterCriteria      // search text + region
//! ├── load_state: LoadState         // Loading | Ready | Failed
//! ├── theme: ThemeMode              // light/dark, passed to every render
//! ├── notice: Option<String>        // transient, non-blocking message
//! └── fetched_at: Option<DateTime>  // when the dataset arrived
//! ```
//!
//! The filtered view is never stored; `filtered_view()` derives it from
//! `all_countries` and `criteria` on every call.
//!
//! Each mutation returns an `Effect` describing the I/O the caller has to
//! perform. State changes only happen here and through `update()` in action.rs.

use std::collections::HashSet;

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::action::Effect;
use crate::core::favorites::{FavoriteSet, StoreError};
use crate::core::filter::{FilterCriteria, RegionFilter};
use crate::core::theme::ThemeMode;
use crate::source::{Country, FetchError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

pub struct ListViewModel {
    pub all_countries: Vec<Country>,
    pub favorites: FavoriteSet,
    pub criteria: FilterCriteria,
    pub load_state: LoadState,
    pub theme: ThemeMode,
    pub notice: Option<String>,
    pub fetched_at: Option<DateTime<Local>>,
    favorites_loaded: bool,
    /// Toggles made before the stored set arrived; replayed on top of it.
    early_toggles: Vec<String>,
    /// Bumped on every persistence request.
    favorites_revision: u64,
    /// Highest revision the writer has reported back (success or failure).
    acknowledged_revision: u64,
}

impl ListViewModel {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            all_countries: Vec::new(),
            favorites: FavoriteSet::new(),
            criteria: FilterCriteria::default(),
            load_state: LoadState::Loading,
            theme,
            notice: None,
            fetched_at: None,
            favorites_loaded: false,
            early_toggles: Vec::new(),
            favorites_revision: 0,
            acknowledged_revision: 0,
        }
    }

    /// Starts the dataset fetch and the favorites load together.
    pub fn initialize(&mut self) -> Effect {
        self.load_state = LoadState::Loading;
        Effect::Initialize
    }

    /// Re-issues the fetch. Only meaningful after a failure.
    pub fn retry(&mut self) -> Effect {
        if !matches!(self.load_state, LoadState::Failed(_)) {
            debug!("Retry ignored in state {:?}", self.load_state);
            return Effect::None;
        }
        info!("Retrying country fetch");
        self.load_state = LoadState::Loading;
        Effect::Fetch
    }

    pub fn countries_loaded(&mut self, result: Result<Vec<Country>, FetchError>) -> Effect {
        if self.load_state != LoadState::Loading {
            debug!("Dropping late fetch result in state {:?}", self.load_state);
            return Effect::None;
        }

        match result {
            Ok(countries) => {
                let total = countries.len();
                self.all_countries = dedupe_by_name(countries);
                let dropped = total - self.all_countries.len();
                if dropped > 0 {
                    warn!("Merged {} countries with duplicate names", dropped);
                }
                info!("Dataset ready: {} countries", self.all_countries.len());
                self.load_state = LoadState::Ready;
                self.fetched_at = Some(Local::now());
            }
            Err(e) => {
                warn!("Country fetch failed: {}", e);
                self.all_countries.clear();
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
        Effect::None
    }

    /// Merges the stored set. Any toggles made while it was loading are
    /// replayed on top and the result persisted.
    pub fn favorites_loaded(&mut self, stored: FavoriteSet) -> Effect {
        if self.favorites_loaded {
            debug!("Ignoring repeated favorites load");
            return Effect::None;
        }
        self.favorites_loaded = true;

        let replay = std::mem::take(&mut self.early_toggles);
        self.favorites = replay
            .iter()
            .fold(stored, |set, name| set.toggled(name));
        info!(
            "Favorites ready: {} stored, {} early toggles replayed",
            self.favorites.len(),
            replay.len()
        );

        if replay.is_empty() {
            Effect::None
        } else {
            self.request_persist()
        }
    }

    pub fn set_search_text(&mut self, text: String) -> Effect {
        self.criteria.search_text = text;
        Effect::None
    }

    pub fn set_region(&mut self, region: RegionFilter) -> Effect {
        self.criteria.region = region;
        Effect::None
    }

    pub fn filtered_view(&self) -> Vec<&Country> {
        self.criteria.apply(&self.all_countries)
    }

    pub fn is_favorite(&self, name: &str) -> bool {
        self.favorites.contains(name)
    }

    /// Flips membership immediately; persistence follows as an effect.
    /// Names outside the current dataset are accepted.
    pub fn toggle_favorite(&mut self, name: &str) -> Effect {
        self.favorites = self.favorites.toggled(name);
        debug!(
            "Toggled favorite {:?} -> {}",
            name,
            self.favorites.contains(name)
        );

        if !self.favorites_loaded {
            // Writing now could clobber the value the pending load is about to read
            self.early_toggles.push(name.to_string());
            return Effect::None;
        }
        self.request_persist()
    }

    pub fn favorites_saved(&mut self, revision: u64, result: Result<(), StoreError>) -> Effect {
        let newest = revision >= self.acknowledged_revision;
        self.acknowledged_revision = self.acknowledged_revision.max(revision);
        match result {
            Ok(()) => {
                debug!("Favorites rev {} saved", revision);
                // Store matches memory again; an older failure no longer applies
                if newest {
                    self.notice = None;
                }
            }
            Err(e) if newest => {
                self.notice = Some(format!("Favorites not saved: {e}"));
            }
            Err(e) => debug!("Ignoring failure of superseded rev {}: {}", revision, e),
        }
        Effect::None
    }

    /// True while a requested write has not been reported back yet.
    pub fn is_saving(&self) -> bool {
        self.acknowledged_revision < self.favorites_revision
    }

    pub fn toggle_theme(&mut self) -> Effect {
        self.theme = self.theme.toggled();
        Effect::None
    }

    pub fn dismiss_notice(&mut self) -> Effect {
        self.notice = None;
        Effect::None
    }

    fn request_persist(&mut self) -> Effect {
        self.favorites_revision += 1;
        Effect::PersistFavorites {
            revision: self.favorites_revision,
            set: self.favorites.clone(),
        }
    }
}

/// Keeps the first country for each name, preserving delivery order.
fn dedupe_by_name(countries: Vec<Country>) -> Vec<Country> {
    let mut seen = HashSet::new();
    countries
        .into_iter()
        .filter(|c| seen.insert(c.name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Region;
    use crate::test_support::{country, test_view_model};

    #[test]
    fn test_new_defaults() {
        let vm = test_view_model();
        assert_eq!(vm.load_state, LoadState::Loading);
        assert!(vm.favorites.is_empty());
        assert!(vm.all_countries.is_empty());
        assert_eq!(vm.theme, ThemeMode::Light);
        assert!(!vm.is_saving());
    }

    #[test]
    fn test_successful_save_clears_failure_notice() {
        let mut vm = test_view_model();
        vm.favorites_loaded(FavoriteSet::new());

        vm.toggle_favorite("Chile");
        vm.favorites_saved(1, Err(StoreError::Io("disk full".into())));
        assert!(vm.notice.as_deref().unwrap().contains("disk full"));

        vm.toggle_favorite("Chad");
        vm.favorites_saved(2, Ok(()));
        assert_eq!(vm.notice, None);
        assert!(!vm.is_saving());
    }

    #[test]
    fn test_stale_success_keeps_newer_failure_notice() {
        let mut vm = test_view_model();
        vm.favorites_loaded(FavoriteSet::new());

        vm.toggle_favorite("Chile");
        vm.toggle_favorite("Chad");
        vm.favorites_saved(2, Err(StoreError::Io("disk full".into())));
        vm.favorites_saved(1, Ok(()));
        assert!(vm.notice.is_some());
    }

    #[test]
    fn test_stale_failure_after_newer_success_is_ignored() {
        let mut vm = test_view_model();
        vm.favorites_loaded(FavoriteSet::new());

        vm.toggle_favorite("Chile");
        vm.toggle_favorite("Chad");
        vm.favorites_saved(2, Ok(()));
        vm.favorites_saved(1, Err(StoreError::Io("disk full".into())));
        assert_eq!(vm.notice, None);
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let mut second = country("Chad", Region::Asia);
        second.population = 7;
        let deduped = dedupe_by_name(vec![
            country("Chad", Region::Africa),
            country("Chile", Region::Americas),
            second,
        ]);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].region, Region::Africa);
    }

    #[test]
    fn test_fetch_failure_clears_countries() {
        let mut vm = test_view_model();
        vm.all_countries = vec![country("Stale", Region::Europe)];
        vm.countries_loaded(Err(FetchError::Network("refused".into())));
        assert!(matches!(vm.load_state, LoadState::Failed(ref r) if r.contains("refused")));
        assert!(vm.all_countries.is_empty());
    }

    #[test]
    fn test_late_fetch_result_ignored() {
        let mut vm = test_view_model();
        vm.countries_loaded(Ok(vec![country("Chad", Region::Africa)]));
        vm.countries_loaded(Err(FetchError::Decode("late".into())));
        assert_eq!(vm.load_state, LoadState::Ready);
        assert_eq!(vm.all_countries.len(), 1);
    }

    #[test]
    fn test_retry_only_from_failed() {
        let mut vm = test_view_model();
        assert_eq!(vm.retry(), Effect::None);
        vm.countries_loaded(Err(FetchError::Network("down".into())));
        assert_eq!(vm.retry(), Effect::Fetch);
        assert_eq!(vm.load_state, LoadState::Loading);
    }

    #[test]
    fn test_early_toggle_replayed_after_load() {
        let mut vm = test_view_model();
        assert_eq!(vm.toggle_favorite("Chad"), Effect::None);
        assert!(vm.is_favorite("Chad"));

        let stored: FavoriteSet = ["Chad", "Peru"].into_iter().collect();
        let effect = vm.favorites_loaded(stored);

        // Chad was flipped once relative to the stored set
        assert!(!vm.is_favorite("Chad"));
        assert!(vm.is_favorite("Peru"));
        let expected: FavoriteSet = ["Peru"].into_iter().collect();
        assert_eq!(
            effect,
            Effect::PersistFavorites {
                revision: 1,
                set: expected
            }
        );
    }

    #[test]
    fn test_save_failure_sets_notice_and_keeps_set() {
        let mut vm = test_view_model();
        vm.favorites_loaded(FavoriteSet::new());
        vm.toggle_favorite("Chile");
        assert!(vm.is_saving());
        vm.favorites_saved(1, Err(StoreError::Io("disk full".into())));
        assert!(vm.is_favorite("Chile"));
        assert!(vm.notice.as_deref().unwrap().contains("disk full"));
        assert!(!vm.is_saving());
    }

    #[test]
    fn test_out_of_order_ack_keeps_highest_revision() {
        let mut vm = test_view_model();
        vm.favorites_loaded(FavoriteSet::new());
        vm.toggle_favorite("A");
        vm.toggle_favorite("B");
        vm.favorites_saved(2, Ok(()));
        vm.favorites_saved(1, Ok(()));
        assert!(!vm.is_saving());
    }
}
