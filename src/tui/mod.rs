//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! The dataset fetch and the favorites load run as tokio tasks and report
//! back as `Action`s over an mpsc channel drained once per loop iteration.
//! Favorites are written by a `FavoritesWriter`; the loop never waits on it
//! except once at exit, so the last set reaches the store.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms to animate the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events or completions.

mod component;
mod components;
mod event;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::task::JoinHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::detail::CountryDetail;
use crate::core::favorites::{FavoriteSet, FavoritesStore, FavoritesWriter, FileStore, MemoryStore};
use crate::core::state::{ListViewModel, LoadState};
use crate::source::{CountrySource, RestCountriesSource};
use crate::tui::component::EventHandler;
use crate::tui::components::{CountryListState, DetailState, SearchBox, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Palette;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub country_list: CountryListState,
    /// Open detail view (None = list screen)
    pub detail: Option<DetailState>,
}

impl TuiState {
    pub fn new(palette: Palette) -> Self {
        Self {
            search_box: SearchBox::new(palette),
            country_list: CountryListState::new(),
            detail: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build the country source and favorites store from a resolved config.
pub fn build_services(config: &ResolvedConfig) -> (Arc<dyn CountrySource>, Arc<dyn FavoritesStore>) {
    let source: Arc<dyn CountrySource> =
        Arc::new(RestCountriesSource::new(Some(config.base_url.clone())));
    let store: Arc<dyn FavoritesStore> = if config.ephemeral {
        info!("Ephemeral mode: favorites stay in memory");
        Arc::new(MemoryStore::new())
    } else {
        info!("Favorites stored under {}", config.data_dir.display());
        Arc::new(FileStore::new(config.data_dir.clone()))
    };
    (source, store)
}

/// Everything needed to carry out an `Effect`.
struct EffectRunner {
    source: Arc<dyn CountrySource>,
    store: Arc<dyn FavoritesStore>,
    writer: FavoritesWriter,
    tx: mpsc::Sender<Action>,
}

impl EffectRunner {
    /// Starts the I/O an effect asks for. Returns true when the app should quit.
    fn run(&self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::Initialize => {
                spawn_fetch(self.source.clone(), self.tx.clone());
                spawn_favorites_load(self.store.clone(), self.tx.clone());
            }
            Effect::Fetch => {
                spawn_fetch(self.source.clone(), self.tx.clone());
            }
            Effect::PersistFavorites { revision, set } => {
                self.writer.submit(revision, set);
            }
        }
        false
    }

    /// Applies an action and runs its effect.
    fn dispatch(&self, vm: &mut ListViewModel, action: Action) -> bool {
        debug!("Dispatching {}", action.name());
        let effect = update(vm, action);
        self.run(effect)
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let (source, store) = build_services(&config);
    let mut vm = ListViewModel::new(config.theme);
    let mut tui = TuiState::new(Palette::for_mode(vm.theme));

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let runner = EffectRunner {
        writer: FavoritesWriter::spawn(store.clone(), tx.clone()),
        source,
        store,
        tx,
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    runner.dispatch(&mut vm, Action::Initialize);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = vm.load_state == LoadState::Loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &vm, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&event, &mut vm, &mut tui, &runner) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task completions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            runner.dispatch(&mut vm, action);
        }
    }

    ratatui::restore();

    // Let the writer flush the newest set before the runtime goes away
    let pending = runner.writer.finish();
    if let Err(e) =
        tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(pending))
    {
        warn!("Favorites writer ended abnormally: {}", e);
    }
    info!("atlas shutting down");
    Ok(())
}

/// Routes one terminal event. Returns true when the app should quit.
fn handle_event(
    event: &TuiEvent,
    vm: &mut ListViewModel,
    tui: &mut TuiState,
    runner: &EffectRunner,
) -> bool {
    match event {
        TuiEvent::Resize => return false,
        // Ctrl+C always quits regardless of screen
        TuiEvent::ForceQuit => return runner.dispatch(vm, Action::Quit),
        TuiEvent::ToggleTheme => return runner.dispatch(vm, Action::ToggleTheme),
        _ => {}
    }

    // Detail view captures everything else while open
    if let Some(ref mut detail) = tui.detail {
        match event {
            TuiEvent::Escape => tui.detail = None,
            TuiEvent::ToggleFavorite => {
                let name = detail.name.clone();
                return runner.dispatch(vm, Action::ToggleFavorite(name));
            }
            other => detail.handle_event(other),
        }
        return false;
    }

    let view_len = vm.filtered_view().len();
    match event {
        TuiEvent::Retry => runner.dispatch(vm, Action::Retry),
        TuiEvent::NextRegion | TuiEvent::PrevRegion => {
            let region = if matches!(event, TuiEvent::NextRegion) {
                vm.criteria.region.next()
            } else {
                vm.criteria.region.prev()
            };
            tui.country_list.reset();
            runner.dispatch(vm, Action::SetRegion(region))
        }
        TuiEvent::ToggleFavorite => match selected_name(vm, tui) {
            Some(name) => runner.dispatch(vm, Action::ToggleFavorite(name)),
            None => false,
        },
        TuiEvent::Submit => {
            if let Some(idx) = tui.country_list.selection(view_len) {
                let detail = CountryDetail::from_country(vm.filtered_view()[idx]);
                debug!("Opening detail for {}", detail.title);
                tui.detail = Some(DetailState::new(detail));
            }
            false
        }
        TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::PageUp | TuiEvent::PageDown => {
            tui.country_list.handle_event(event, view_len);
            false
        }
        TuiEvent::Escape => {
            if let Some(SearchEvent::Changed(text)) = tui.search_box.clear() {
                tui.country_list.reset();
                runner.dispatch(vm, Action::SetSearchText(text))
            } else if vm.notice.is_some() {
                runner.dispatch(vm, Action::DismissNotice)
            } else {
                false
            }
        }
        _ => match tui.search_box.handle_event(event) {
            Some(SearchEvent::Changed(text)) => {
                tui.country_list.reset();
                runner.dispatch(vm, Action::SetSearchText(text))
            }
            None => false,
        },
    }
}

fn selected_name(vm: &ListViewModel, tui: &TuiState) -> Option<String> {
    let view = vm.filtered_view();
    tui.country_list
        .selection(view.len())
        .map(|idx| view[idx].name.clone())
}

fn spawn_fetch(source: Arc<dyn CountrySource>, tx: mpsc::Sender<Action>) -> JoinHandle<()> {
    info!("Spawning dataset fetch from {}", source.name());
    tokio::spawn(async move {
        let result = source.fetch_all().await;
        if tx.send(Action::CountriesLoaded(result)).is_err() {
            warn!("Failed to deliver fetch result: receiver dropped");
        }
    })
}

fn spawn_favorites_load(store: Arc<dyn FavoritesStore>, tx: mpsc::Sender<Action>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let set = tokio::task::spawn_blocking(move || store.load())
            .await
            .unwrap_or_else(|e| {
                warn!("Favorites load task failed: {}", e);
                FavoriteSet::new()
            });
        if tx.send(Action::FavoritesLoaded(set)).is_err() {
            warn!("Failed to deliver favorites: receiver dropped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::ThemeMode;
    use crate::source::{FetchError, Region};
    use crate::test_support::{StubSource, country, test_view_model};

    fn runner_with(
        source: Arc<dyn CountrySource>,
        store: Arc<dyn FavoritesStore>,
    ) -> (EffectRunner, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        let runner = EffectRunner {
            writer: FavoritesWriter::spawn(store.clone(), tx.clone()),
            source,
            store,
            tx,
        };
        (runner, rx)
    }

    fn ready_vm() -> ListViewModel {
        let mut vm = test_view_model();
        update(&mut vm, Action::FavoritesLoaded(FavoriteSet::new()));
        update(
            &mut vm,
            Action::CountriesLoaded(Ok(vec![
                country("Chad", Region::Africa),
                country("Chile", Region::Americas),
            ])),
        );
        vm
    }

    #[tokio::test]
    async fn test_spawn_fetch_delivers_result() {
        let source = Arc::new(StubSource::new(vec![Ok(vec![country("Chad", Region::Africa)])]));
        let (tx, rx) = mpsc::channel();
        spawn_fetch(source, tx).await.unwrap();
        match rx.try_recv().unwrap() {
            Action::CountriesLoaded(Ok(countries)) => assert_eq!(countries[0].name, "Chad"),
            other => panic!("unexpected action {:?}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_spawn_favorites_load_corrupt_is_empty() {
        let store = Arc::new(MemoryStore::with_raw("not json"));
        let (tx, rx) = mpsc::channel();
        spawn_favorites_load(store, tx).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::FavoritesLoaded(FavoriteSet::new()));
    }

    #[tokio::test]
    async fn test_spawn_fetch_tolerates_dropped_receiver() {
        let source = Arc::new(StubSource::new(vec![Err(FetchError::Network("x".into()))]));
        let (tx, rx) = mpsc::channel();
        drop(rx);
        assert!(spawn_fetch(source, tx).await.is_ok());
    }

    #[tokio::test]
    async fn test_typing_filters_and_resets_selection() {
        let (runner, _rx) = runner_with(
            Arc::new(StubSource::new(vec![])),
            Arc::new(MemoryStore::new()),
        );
        let mut vm = ready_vm();
        let mut tui = TuiState::new(Palette::for_mode(ThemeMode::Light));
        tui.country_list.selected = 1;

        for c in "chi".chars() {
            handle_event(&TuiEvent::InputChar(c), &mut vm, &mut tui, &runner);
        }
        assert_eq!(vm.criteria.search_text, "chi");
        assert_eq!(vm.filtered_view().len(), 1);
        assert_eq!(tui.country_list.selected, 0);

        handle_event(&TuiEvent::Escape, &mut vm, &mut tui, &runner);
        assert_eq!(vm.criteria.search_text, "");
    }

    #[tokio::test]
    async fn test_favorite_shortcut_toggles_selected_row() {
        let store = Arc::new(MemoryStore::new());
        let (runner, _rx) = runner_with(Arc::new(StubSource::new(vec![])), store);
        let mut vm = ready_vm();
        let mut tui = TuiState::new(Palette::for_mode(ThemeMode::Light));

        handle_event(&TuiEvent::CursorDown, &mut vm, &mut tui, &runner);
        handle_event(&TuiEvent::ToggleFavorite, &mut vm, &mut tui, &runner);
        assert!(vm.is_favorite("Chile"));
        assert!(!vm.is_favorite("Chad"));
    }

    #[tokio::test]
    async fn test_region_cycle_and_detail_navigation() {
        let (runner, _rx) = runner_with(
            Arc::new(StubSource::new(vec![])),
            Arc::new(MemoryStore::new()),
        );
        let mut vm = ready_vm();
        let mut tui = TuiState::new(Palette::for_mode(ThemeMode::Light));

        handle_event(&TuiEvent::NextRegion, &mut vm, &mut tui, &runner);
        assert_eq!(vm.filtered_view().len(), 1); // Africa

        handle_event(&TuiEvent::Submit, &mut vm, &mut tui, &runner);
        assert_eq!(tui.detail.as_ref().map(|d| d.name.as_str()), Some("Chad"));

        // Typing is swallowed while the detail view is open
        handle_event(&TuiEvent::InputChar('z'), &mut vm, &mut tui, &runner);
        assert!(vm.criteria.search_text.is_empty());

        handle_event(&TuiEvent::ToggleFavorite, &mut vm, &mut tui, &runner);
        assert!(vm.is_favorite("Chad"));

        handle_event(&TuiEvent::Escape, &mut vm, &mut tui, &runner);
        assert!(tui.detail.is_none());
    }

    #[tokio::test]
    async fn test_quit_and_theme() {
        let (runner, _rx) = runner_with(
            Arc::new(StubSource::new(vec![])),
            Arc::new(MemoryStore::new()),
        );
        let mut vm = ready_vm();
        let mut tui = TuiState::new(Palette::for_mode(ThemeMode::Light));
        assert!(!handle_event(&TuiEvent::ToggleTheme, &mut vm, &mut tui, &runner));
        assert!(vm.theme.is_dark());
        assert!(handle_event(&TuiEvent::ForceQuit, &mut vm, &mut tui, &runner));
    }
}
