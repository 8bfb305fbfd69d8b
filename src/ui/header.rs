//! Top bar: greeting, wall clock, selected position and date.

use chrono::NaiveDate;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::action::DashboardAction;
use crate::state::{ClockDisplay, GeoPosition};
use crate::ui::Component;

pub struct HeaderProps<'a> {
    pub clock: &'a ClockDisplay,
    pub position: GeoPosition,
    pub date: NaiveDate,
}

#[derive(Default)]
pub struct Header;

impl Component<DashboardAction> for Header {
    type Props<'a> = HeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: HeaderProps<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" WeatherWise ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(inner);

        let greeting = Line::from(vec![
            Span::styled(props.clock.greeting, Style::default().fg(Color::Yellow).bold()),
            Span::raw("  "),
            Span::styled(props.clock.time.as_str(), Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(greeting), left);

        let selection = Line::from(vec![
            Span::styled(
                format!("{:.4}, {:.4}", props.position.lat, props.position.lng),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  "),
            Span::styled(
                props.date.format("%Y-%m-%d").to_string(),
                Style::default().fg(Color::Magenta),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(selection).alignment(Alignment::Right),
            right,
        );
    }
}
