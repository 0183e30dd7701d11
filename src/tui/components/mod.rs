//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `TitleBar`: counts, notice, theme hint
//! - `RegionBar`: region "buttons"
//! - `LoadingView` / `FailedView`: body while loading or after a failed fetch
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state across frames:
//! - `SearchBox`: text buffer, emits `SearchEvent`s
//! - `CountryList`: selection over the filtered view
//! - `DetailView`: scroll position inside one country's detail
//!
//! Props come from the view-model every frame; components never reach into
//! global state.
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs
//! ├── region_bar.rs
//! ├── search_box.rs
//! ├── country_list.rs
//! ├── detail.rs
//! └── status.rs
//! ```

pub mod country_list;
pub mod detail;
pub mod region_bar;
pub mod search_box;
pub mod status;
mod title_bar;

pub use country_list::{CountryList, CountryListState};
pub use detail::{DetailState, DetailView};
pub use region_bar::RegionBar;
pub use search_box::{SearchBox, SearchEvent};
pub use status::{FailedView, LoadingView};
pub use title_bar::TitleBar;
