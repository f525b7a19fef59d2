//! Horizontal bar chart — one row per category, scaled to the largest count.
//!
//! Used by two views: the dominant-discipline distribution and the cross-tab
//! (disciplines within the selected period). Rows beyond the pane height are
//! reached with `↑`/`↓` or `PageUp`/`PageDown` while the pane is focused.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const PAGE_STEP: usize = 10;
const LABEL_WIDTH: usize = 24;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct BarListState {
    pub title: String,
    /// `(label, count)` rows, already ordered for display.
    pub rows: Vec<(String, u64)>,
    /// First visible row.
    pub offset: usize,
}

impl BarListState {
    pub fn new(title: impl Into<String>, rows: Vec<(String, u64)>) -> Self {
        Self {
            title: title.into(),
            rows,
            offset: 0,
        }
    }

    /// Replace the rows (and title) after a filter change; resets the scroll.
    pub fn set_rows(&mut self, title: impl Into<String>, rows: Vec<(String, u64)>) {
        self.title = title.into();
        self.rows = rows;
        self.offset = 0;
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let max = self.rows.len().saturating_sub(1);
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.offset = self.offset.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.offset = (self.offset + 1).min(max);
            }
            AppEvent::ScrollUp => {
                self.offset = self.offset.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.offset = (self.offset + PAGE_STEP).min(max);
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct BarList<'a> {
    state: &'a BarListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> BarList<'a> {
    pub fn new(state: &'a BarListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for BarList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered()
            .title(self.state.title.as_str())
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.rows.is_empty() {
            Paragraph::new("Aucune donnée")
                .style(Style::default().add_modifier(Modifier::DIM))
                .render(inner, buf);
            return;
        }

        let max_count = self
            .state
            .rows
            .iter()
            .map(|&(_, c)| c)
            .max()
            .unwrap_or(1)
            .max(1);

        let label_w = LABEL_WIDTH.min(inner.width as usize / 3);
        // Space left for the bar after label, separator and count column.
        let bar_w = (inner.width as usize)
            .saturating_sub(label_w + 2 + 7)
            .max(1);

        let visible = self
            .state
            .rows
            .iter()
            .skip(self.state.offset)
            .take(inner.height as usize);

        let lines: Vec<Line> = visible
            .map(|(label, count)| {
                let shown: String = truncate_pad(label, label_w);
                let filled = ((*count as f64 / max_count as f64) * bar_w as f64).ceil() as usize;
                let bar = "█".repeat(filled.min(bar_w));
                Line::from(vec![
                    Span::styled(shown, self.theme.chart_label),
                    Span::raw("  "),
                    Span::styled(bar, Style::default().fg(self.theme.category_color(label))),
                    Span::styled(
                        format!(" {count}"),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);

        // Scroll hint when rows overflow the pane.
        if self.state.offset + (inner.height as usize) < self.state.rows.len() {
            let hint = format!(" ↓ {} de plus ", self.state.rows.len() - self.state.offset);
            let x = inner.right().saturating_sub(hint.chars().count() as u16 + 1);
            buf.set_line(
                x,
                inner.bottom().saturating_sub(1),
                &Line::styled(hint, Style::default().add_modifier(Modifier::DIM)),
                inner.width,
            );
        }
    }
}

/// Truncate `label` to `width` characters, padding with spaces on the right.
fn truncate_pad(label: &str, width: usize) -> String {
    let mut out: String = label.chars().take(width).collect();
    let used = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
