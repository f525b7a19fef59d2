//! Status bar — one dim line at the bottom summarising the loaded snapshot.
//!
//! Shows the record total, when the snapshot was fetched, and how many
//! records sit out of each chart because a field failed to normalise.

use crate::theme::Theme;
use festin_core::Dataset;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Widget,
};

pub struct StatusBar<'a> {
    dataset: &'a Dataset,
    _theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(dataset: &'a Dataset, theme: &'a Theme) -> Self {
        Self { dataset, _theme: theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ds = self.dataset;
        let text = format!(
            " {} festivals · instantané {} · absents: {} coordonnées, {} années, {} périodes",
            ds.len(),
            ds.fetched_at().format("%Y-%m-%d %H:%M UTC"),
            ds.missing_coordinates(),
            ds.missing_years(),
            ds.missing_periods(),
        );
        let line = Line::from(text);
        buf.set_line(area.x, area.y, &line, area.width);
        buf.set_style(area, Style::default().add_modifier(Modifier::DIM));
    }
}
