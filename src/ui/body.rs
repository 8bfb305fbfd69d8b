//! The main panel, one view per layout state.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::DashboardAction;
use crate::state::{DashboardState, LayoutState};
use crate::summary::SummaryMetrics;
use crate::ui::charts::{SeriesChart, SeriesChartProps};
use crate::ui::Component;

const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub struct BodyProps<'a> {
    pub state: &'a DashboardState,
}

#[derive(Default)]
pub struct Body;

impl Component<DashboardAction> for Body {
    type Props<'a> = BodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: BodyProps<'_>) {
        match props.state.layout {
            LayoutState::Initial => render_initial(frame, area, props.state),
            LayoutState::Loading => render_loading(frame, area, props.state),
            LayoutState::Results => render_results(frame, area, props.state),
        }
    }
}

fn render_initial(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let mut lines: Vec<Line> = Vec::new();

    if let Some(current) = &state.current {
        lines.push(Line::from(Span::styled(
            current.location_name.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )));
        lines.push(Line::from(Span::styled(
            current.local_time.clone(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::default());
        lines.push(Line::from(format!(
            "{:.1}{}   rain {:.1}{}   wind {:.1} km/h",
            current.temperature,
            current.temperature_unit,
            current.precipitation,
            current.precipitation_unit,
            current.wind_speed,
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Pick a spot on the globe, then analyze its history.",
            Style::default().fg(Color::Gray),
        )));
    }

    if let Some(error) = &state.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "arrows move · [/] date · enter analyze · / search · l locate · s share",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
        .title(" Current Conditions ");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_loading(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let spinner = SPINNERS[state.loading_message % SPINNERS.len()];
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("{spinner} {}", state.loading_text()),
            Style::default().fg(Color::Yellow).bold(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
        .title(" Analyzing ");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

fn render_results(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let Some(historical) = &state.historical else {
        return;
    };

    let [summary_area, charts_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(8)]).areas(area);

    if let Some(summary) = &state.summary {
        render_summary(frame, summary_area, summary, state.error.as_deref());
    }

    let [temp_area, rain_area, wind_area] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(charts_area);

    let mut chart = SeriesChart;
    chart.render(
        frame,
        temp_area,
        SeriesChartProps {
            title: "Max Temperature",
            series: &historical.temperatures,
            color: Color::Red,
        },
    );
    chart.render(
        frame,
        rain_area,
        SeriesChartProps {
            title: "Precipitation",
            series: &historical.precipitation,
            color: Color::Blue,
        },
    );
    chart.render(
        frame,
        wind_area,
        SeriesChartProps {
            title: "Max Wind",
            series: &historical.wind_speeds,
            color: Color::Green,
        },
    );
}

fn render_summary(frame: &mut Frame, area: Rect, summary: &SummaryMetrics, error: Option<&str>) {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            summary.classification(),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::raw("   "),
        Span::raw(format!("avg {:.1}°C", summary.avg_temp)),
        Span::raw("   "),
        Span::raw(format!("rain {:.0}%", summary.chance_of_rain)),
        Span::raw("   "),
        Span::raw(format!("wind {:.1} km/h", summary.avg_wind)),
    ])];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
        .title(" This Day in History ");
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}
