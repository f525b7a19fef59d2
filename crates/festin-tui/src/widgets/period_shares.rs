//! Period view — share of festivals per canonical running period.
//!
//! Stateless: the two canonical periods plus whatever else the dataset
//! carries fit on screen without scrolling. Each row shows a colour swatch,
//! the period label, the percentage of counted festivals and a proportional
//! bar.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const LABEL_WIDTH: usize = 30;

pub struct PeriodShares<'a> {
    /// `(period, count)` rows, ordered for display.
    rows: &'a [(String, u64)],
    /// Records excluded from the distribution (absent or stray-month period).
    excluded: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> PeriodShares<'a> {
    pub fn new(
        rows: &'a [(String, u64)],
        excluded: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { rows, excluded, focused, theme }
    }
}

impl Widget for PeriodShares<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered()
            .title(" Répartition par période de déroulement ")
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            Paragraph::new("Aucune période exploitable")
                .style(Style::default().add_modifier(Modifier::DIM))
                .render(inner, buf);
            return;
        }

        let total: u64 = self.rows.iter().map(|&(_, c)| c).sum();
        let label_w = LABEL_WIDTH.min(inner.width as usize / 2);
        let bar_w = (inner.width as usize)
            .saturating_sub(label_w + 2 + 8 + 2)
            .max(1);

        let mut lines: Vec<Line> = Vec::with_capacity(self.rows.len() + 2);
        for (period, count) in self.rows {
            let share = *count as f64 / total as f64;
            let filled = (share * bar_w as f64).round() as usize;
            let color = self.theme.category_color(period);

            let mut shown: String = period.chars().take(label_w).collect();
            let used = shown.chars().count();
            shown.extend(std::iter::repeat(' ').take(label_w - used));

            lines.push(Line::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(shown, self.theme.chart_label),
                Span::styled(
                    format!("{:>5.1} % ", share * 100.0),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("▰".repeat(filled.min(bar_w)), Style::default().fg(color)),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!(
                " {total} festivals comptés · {} hors répartition",
                self.excluded
            ),
            Style::default().add_modifier(Modifier::DIM),
        ));

        Paragraph::new(lines).render(inner, buf);
    }
}
