//! Transient notification line.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::DashboardAction;
use crate::state::{Notification, NotificationKind};
use crate::ui::Component;

pub struct ToastProps<'a> {
    pub notification: Option<&'a Notification>,
}

#[derive(Default)]
pub struct Toast;

impl Component<DashboardAction> for Toast {
    type Props<'a> = ToastProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ToastProps<'_>) {
        let Some(notification) = props.notification else {
            return;
        };

        let color = match notification.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        let text = Span::styled(
            notification.message.clone(),
            Style::default().fg(color).bold(),
        );
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center),
            area,
        );
    }
}
