//! Place-name search overlay.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::DashboardAction;
use crate::state::SearchState;
use crate::ui::{centered_rect, Component};

pub struct SearchOverlayProps<'a> {
    pub search: &'a SearchState,
}

#[derive(Default)]
pub struct SearchOverlay;

impl Component<DashboardAction> for SearchOverlay {
    type Props<'a> = SearchOverlayProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: SearchOverlayProps<'_>) {
        if !props.search.active {
            return;
        }

        let popup = centered_rect(area, 44, 3);
        frame.render_widget(Clear, popup);

        let input = Line::from(vec![
            Span::raw(props.search.query.clone()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Search place ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        frame.render_widget(Paragraph::new(input).block(block), popup);
    }
}
