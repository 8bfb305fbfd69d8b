//! Year-by-year bar charts for the historical series.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};
use ratatui::Frame;

use crate::action::DashboardAction;
use crate::state::Series;
use crate::ui::Component;

pub struct SeriesChartProps<'a> {
    pub title: &'a str,
    pub series: &'a Series,
    pub color: Color,
}

#[derive(Default)]
pub struct SeriesChart;

impl Component<DashboardAction> for SeriesChart {
    type Props<'a> = SeriesChartProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: SeriesChartProps<'_>) {
        let series = props.series;

        // Bars carry one decimal place of resolution after scaling, and are
        // measured from the coldest sample so sub-zero values keep height.
        let floor = series_floor(&series.values);
        let bars: Vec<Bar> = series
            .years
            .iter()
            .zip(series.values.iter())
            .map(|(year, value)| {
                Bar::default()
                    .label(format!("'{:02}", year.rem_euclid(100)).into())
                    .value(bar_value(*value, floor))
                    .text_value(format!("{value:.1}"))
            })
            .collect();

        let title = format!(
            " {} ({}) mean {:.1} ",
            props.title, series.unit, series.stats.mean
        );
        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
                    .title(title)
                    .title_style(Style::default().fg(props.color).bold()),
            )
            .data(BarGroup::default().bars(&bars))
            .bar_width(4)
            .bar_gap(1)
            .bar_style(Style::default().fg(props.color));

        frame.render_widget(chart, area);
    }
}

/// Baseline the bars are measured from: zero for all-positive series, the
/// minimum sample when the series dips below zero.
fn series_floor(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0_f64, f64::min)
}

fn bar_value(value: f64, floor: f64) -> u64 {
    ((value - floor) * 10.0).round() as u64
}
