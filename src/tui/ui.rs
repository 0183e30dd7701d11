use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Block;

use crate::core::state::{ListViewModel, LoadState};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CountryList, DetailView, FailedView, LoadingView, RegionBar, TitleBar,
};
use crate::tui::theme::Palette;

/// Splits the screen into title, region bar, search box and body.
fn screen_layout(area: Rect) -> [Rect; 4] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Length(1), Length(3), Min(0)]).areas(area)
}

pub fn draw_ui(frame: &mut Frame, vm: &ListViewModel, tui: &mut TuiState, spinner_frame: usize) {
    let palette = Palette::for_mode(vm.theme);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let [title_area, region_area, search_area, body_area] = screen_layout(frame.area());
    let view = vm.filtered_view();

    TitleBar {
        shown: view.len(),
        total: vm.all_countries.len(),
        favorites: vm.favorites.len(),
        fetched_at: vm.fetched_at.map(|t| t.format("%H:%M").to_string()),
        notice: vm.notice.clone(),
        saving: vm.is_saving(),
        theme_hint: vm.theme.toggle_hint(),
        palette,
    }
    .render(frame, title_area);

    // Detail view covers everything below the title bar
    if let Some(ref mut detail) = tui.detail {
        let is_favorite = vm.is_favorite(&detail.name);
        let area = Rect {
            y: region_area.y,
            height: frame.area().height.saturating_sub(title_area.height),
            ..frame.area()
        };
        DetailView::new(detail, is_favorite, palette).render(frame, area);
        return;
    }

    RegionBar {
        selected: vm.criteria.region,
        palette,
    }
    .render(frame, region_area);

    tui.search_box.palette = palette;
    tui.search_box.render(frame, search_area);

    match vm.load_state {
        LoadState::Loading => LoadingView {
            spinner_frame,
            palette,
        }
        .render(frame, body_area),
        LoadState::Failed(ref reason) => FailedView { reason, palette }.render(frame, body_area),
        LoadState::Ready => {
            CountryList::new(&mut tui.country_list, &view, &vm.favorites, palette)
                .render(frame, body_area)
        }
    }
}
