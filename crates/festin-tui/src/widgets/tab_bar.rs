//! Tab bar widget — renders the strip of dashboard views at the top of the
//! screen.

use crate::app::View;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line strip of views at the top of the screen.
///
/// The active view is highlighted. Keybinding hints (`q:quitter  ?:aide`)
/// are right-aligned in the same row.
pub struct TabBar<'a> {
    active: View,
    _theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(active: View, theme: &'a Theme) -> Self {
        Self { active, _theme: theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = View::ALL
            .iter()
            .enumerate()
            .map(|(i, view)| Line::from(format!(" {}:{} ", i + 1, view.label())))
            .collect();

        Tabs::new(labels)
            .select(self.active.index())
            .highlight_style(
                Style::default()
                    .bg(ratatui::style::Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("")
            .render(area, buf);

        // Keybinding hints at the right edge
        let hint = " q:quitter  ?:aide ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
