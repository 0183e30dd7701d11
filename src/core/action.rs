//! # Actions
//!
//! Everything that can happen in atlas becomes an `Action`.
//! User types in the search box? That's `Action::SetSearchText(text)`.
//! Dataset arrives? That's `Action::CountriesLoaded(result)`.
//!
//! `update()` applies an action to the view-model and returns an `Effect`:
//! the I/O the adapter must start. No side effects happen here.
//!
//! ```text
//! ListViewModel + Action  →  update()  →  ListViewModel' + Effect
//! ```

use crate::core::favorites::{FavoriteSet, StoreError};
use crate::core::filter::RegionFilter;
use crate::core::state::ListViewModel;
use crate::source::{Country, FetchError};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // User intents
    Initialize,
    Retry,
    SetSearchText(String),
    SetRegion(RegionFilter),
    ToggleFavorite(String),
    ToggleTheme,
    DismissNotice,
    Quit,

    // Background completions
    CountriesLoaded(Result<Vec<Country>, FetchError>),
    FavoritesLoaded(FavoriteSet),
    FavoritesSaved {
        revision: u64,
        result: Result<(), StoreError>,
    },
}

impl Action {
    /// Short name for logging; the dataset payload is too large to print.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Initialize => "Initialize",
            Action::Retry => "Retry",
            Action::SetSearchText(_) => "SetSearchText",
            Action::SetRegion(_) => "SetRegion",
            Action::ToggleFavorite(_) => "ToggleFavorite",
            Action::ToggleTheme => "ToggleTheme",
            Action::DismissNotice => "DismissNotice",
            Action::Quit => "Quit",
            Action::CountriesLoaded(_) => "CountriesLoaded",
            Action::FavoritesLoaded(_) => "FavoritesLoaded",
            Action::FavoritesSaved { .. } => "FavoritesSaved",
        }
    }
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Fetch the dataset and load stored favorites, concurrently.
    Initialize,
    /// Fetch the dataset only.
    Fetch,
    /// Hand the full set to the writer. Fire and forget.
    PersistFavorites { revision: u64, set: FavoriteSet },
}

pub fn update(vm: &mut ListViewModel, action: Action) -> Effect {
    match action {
        Action::Initialize => vm.initialize(),
        Action::Retry => vm.retry(),
        Action::SetSearchText(text) => vm.set_search_text(text),
        Action::SetRegion(region) => vm.set_region(region),
        Action::ToggleFavorite(name) => vm.toggle_favorite(&name),
        Action::ToggleTheme => vm.toggle_theme(),
        Action::DismissNotice => vm.dismiss_notice(),
        Action::Quit => Effect::Quit,
        Action::CountriesLoaded(result) => vm.countries_loaded(result),
        Action::FavoritesLoaded(set) => vm.favorites_loaded(set),
        Action::FavoritesSaved { revision, result } => vm.favorites_saved(revision, result),
    }
}
