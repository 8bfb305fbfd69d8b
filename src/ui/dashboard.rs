//! Root component: key bindings and the overall layout.

use chrono::Days;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

use crate::action::DashboardAction;
use crate::state::{DashboardState, GeoPosition};
use crate::ui::body::{Body, BodyProps};
use crate::ui::header::{Header, HeaderProps};
use crate::ui::search::{SearchOverlay, SearchOverlayProps};
use crate::ui::toast::{Toast, ToastProps};
use crate::ui::Component;

/// How far one arrow press moves the position, in degrees.
const NUDGE_DEG: f64 = 0.1;

pub struct DashboardProps<'a> {
    pub state: &'a DashboardState,
}

#[derive(Default)]
pub struct Dashboard {
    header: Header,
    body: Body,
    search: SearchOverlay,
    toast: Toast,
}

impl Component<DashboardAction> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(&mut self, event: &Event, props: DashboardProps<'_>) -> Vec<DashboardAction> {
        let Event::Key(key) = event else {
            return vec![];
        };
        if key.kind != KeyEventKind::Press {
            return vec![];
        }

        if props.state.search.active {
            return search_keys(key);
        }
        dashboard_keys(key, props.state)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let [header_area, body_area, toast_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .areas(area);

        self.header.render(
            frame,
            header_area,
            HeaderProps {
                clock: &props.state.clock,
                position: props.state.position,
                date: props.state.date,
            },
        );
        self.body.render(frame, body_area, BodyProps { state: props.state });
        self.toast.render(
            frame,
            toast_area,
            ToastProps {
                notification: props.state.notification.as_ref(),
            },
        );
        self.search.render(
            frame,
            area,
            SearchOverlayProps {
                search: &props.state.search,
            },
        );
    }
}

fn search_keys(key: &KeyEvent) -> Vec<DashboardAction> {
    match key.code {
        KeyCode::Esc => vec![DashboardAction::SearchCancel],
        KeyCode::Enter => vec![DashboardAction::SearchSubmit],
        KeyCode::Backspace => vec![DashboardAction::SearchBackspace],
        KeyCode::Char(c) => vec![DashboardAction::SearchInput(c)],
        _ => vec![],
    }
}

fn dashboard_keys(key: &KeyEvent, state: &DashboardState) -> Vec<DashboardAction> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![DashboardAction::Quit],
        KeyCode::Enter | KeyCode::Char('a') => vec![DashboardAction::AnalyzeRequest],
        KeyCode::Up => vec![nudge(state.position, NUDGE_DEG, 0.0)],
        KeyCode::Down => vec![nudge(state.position, -NUDGE_DEG, 0.0)],
        KeyCode::Left => vec![nudge(state.position, 0.0, -NUDGE_DEG)],
        KeyCode::Right => vec![nudge(state.position, 0.0, NUDGE_DEG)],
        KeyCode::Char('[') => shift_date(state, -1),
        KeyCode::Char(']') => shift_date(state, 1),
        KeyCode::Char('/') => vec![DashboardAction::SearchOpen],
        KeyCode::Char('l') => vec![DashboardAction::LocateRequest],
        KeyCode::Char('s') => vec![DashboardAction::ShareRequest],
        KeyCode::Char('p') => vec![DashboardAction::SaveLocationRequest],
        KeyCode::Char('r') => vec![DashboardAction::CurrentRefresh],
        _ => vec![],
    }
}

fn nudge(position: GeoPosition, dlat: f64, dlng: f64) -> DashboardAction {
    let moved = GeoPosition::new(position.lat + dlat, position.lng + dlng).clamped();
    DashboardAction::PositionSet(moved)
}

fn shift_date(state: &DashboardState, days: i64) -> Vec<DashboardAction> {
    let shifted = if days >= 0 {
        state.date.checked_add_days(Days::new(days as u64))
    } else {
        state.date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    match shifted {
        Some(date) => vec![DashboardAction::DateSet(date)],
        None => vec![],
    }
}
