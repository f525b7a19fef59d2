//! Trend view — festival creations per year as a line chart.
//!
//! Years come pre-aggregated from [`festin_core::aggregate::creations_by_year`];
//! records whose creation year failed to normalise never reach this chart.

use crate::theme::Theme;
use festin_core::{aggregate, Dataset as Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

/// Precomputed chart series. Built once per snapshot, cheap to re-render.
#[derive(Debug)]
pub struct TrendData {
    /// `(year, count)` as f64 pairs, year ascending.
    points: Vec<(f64, f64)>,
    year_min: i32,
    year_max: i32,
    count_max: u64,
}

impl TrendData {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let series = aggregate::creations_by_year(snapshot);
        let year_min = series.first().map(|&(y, _)| y).unwrap_or(0);
        let year_max = series.last().map(|&(y, _)| y).unwrap_or(0);
        let count_max = series.iter().map(|&(_, c)| c).max().unwrap_or(0);
        let points = series
            .into_iter()
            .map(|(y, c)| (f64::from(y), c as f64))
            .collect();
        Self { points, year_min, year_max, count_max }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn year_span(&self) -> (i32, i32) {
        (self.year_min, self.year_max)
    }

    pub fn count_max(&self) -> u64 {
        self.count_max
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct TrendChart<'a> {
    data: &'a TrendData,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> TrendChart<'a> {
    pub fn new(data: &'a TrendData, focused: bool, theme: &'a Theme) -> Self {
        Self { data, focused, theme }
    }
}

impl Widget for TrendChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered()
            .title(" Créations de festivals par année ")
            .border_style(border_style);

        if self.data.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new("Aucune année de création exploitable")
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM))
                .render(inner, buf);
            return;
        }

        let (year_min, year_max) = self.data.year_span();
        // A single-year series still needs a non-degenerate x range.
        let (x_lo, x_hi) = if year_min == year_max {
            (f64::from(year_min) - 1.0, f64::from(year_max) + 1.0)
        } else {
            (f64::from(year_min), f64::from(year_max))
        };
        let y_hi = self.data.count_max() as f64;

        let x_mid = (year_min + year_max) / 2;
        let x_labels = vec![
            Span::raw(year_min.to_string()),
            Span::raw(x_mid.to_string()),
            Span::raw(year_max.to_string()),
        ];
        let y_labels = vec![
            Span::raw("0"),
            Span::raw(format!("{}", self.data.count_max() / 2)),
            Span::raw(format!("{}", self.data.count_max())),
        ];

        let series = Dataset::default()
            .name("créations")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(self.theme.chart_series)
            .data(&self.data.points);

        Chart::new(vec![series])
            .block(block)
            .x_axis(
                Axis::default()
                    .bounds([x_lo, x_hi])
                    .labels(x_labels)
                    .style(self.theme.chart_axis),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, y_hi])
                    .labels(y_labels)
                    .style(self.theme.chart_axis),
            )
            .render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
