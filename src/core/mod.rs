//! # Core Application Logic
//!
//! This module contains atlas's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ListViewModel        │
//!                    │  • Action / Effect      │
//!                    │  • update() (reducer)   │
//!                    │  • FavoritesStore       │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   source   │
//!     │  Adapter   │                          │ (REST API) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `ListViewModel`, all browsing state in one place
//! - [`action`]: the `Action` enum, `Effect`, and `update()`
//! - [`favorites`]: the favorite set, its stores, and the background writer
//! - [`filter`]: search text + region predicate
//! - [`detail`]: display rows for the detail view
//! - [`config`]: layered configuration
//! - [`theme`]: light/dark mode

pub mod action;
pub mod config;
pub mod detail;
pub mod favorites;
pub mod filter;
pub mod state;
pub mod theme;
