use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Anything drawn into a region of the screen.
///
/// Props arrive as struct fields and are rebuilt each frame from the
/// view-model. Widgets that keep a selection or scroll offset borrow their
/// persistent state, hence `&mut self`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A widget that consumes raw input and reports what changed.
///
/// The emitted `Event` is local to the widget (e.g. the new search text);
/// the run loop turns it into an `Action`.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
