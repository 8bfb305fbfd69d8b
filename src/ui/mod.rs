//! Rendering. Components are pure views over props borrowed from state;
//! key handling returns actions and never mutates anything.

mod body;
mod charts;
mod dashboard;
mod header;
mod search;
mod toast;

pub use dashboard::{Dashboard, DashboardProps};

use crossterm::event::Event;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::Frame;

/// A pure UI element. Props carry everything rendering needs, read-only;
/// internal UI state (scroll offsets and the like) may live in `&mut self`.
pub trait Component<A> {
    type Props<'a>;

    /// Translate an event into actions. Default: render-only component.
    #[allow(unused_variables)]
    fn handle_event(&mut self, event: &Event, props: Self::Props<'_>) -> Vec<A> {
        vec![]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

/// A centered rect of fixed size, clipped to the containing area.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    area
}
