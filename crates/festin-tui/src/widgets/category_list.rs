//! Category list widget — the filter sidebar on the map and cross-tab views.
//!
//! # Navigation (when the sidebar is focused)
//!
//! - `↑`/`k` and `↓`/`j` move the cursor.
//! - `PageUp` / `PageDown` move a page at a time.
//! - `Enter` applies the highlighted entry as the active filter.
//!
//! The applied entry keeps a `●` marker so the active filter stays visible
//! while the cursor moves elsewhere.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct CategoryListState {
    pub title: String,
    /// `(label, count)` entries, already ordered for display.
    pub items: Vec<(String, u64)>,
    /// Cursor index into `items`.
    pub cursor: usize,
    /// Index of the currently applied filter entry.
    pub applied: usize,
    /// When true, entry 0 is a synthetic "all" row meaning "no filter".
    has_all_entry: bool,
}

impl CategoryListState {
    pub fn new(title: impl Into<String>, items: Vec<(String, u64)>) -> Self {
        Self {
            title: title.into(),
            items,
            cursor: 0,
            applied: 0,
            has_all_entry: false,
        }
    }

    /// Prepend a synthetic "all" entry whose label means "no filter".
    pub fn with_all_entry(mut self, label: impl Into<String>, total: u64) -> Self {
        self.items.insert(0, (label.into(), total));
        self.has_all_entry = true;
        self
    }

    /// The label of the applied filter, or `None` when the synthetic "all"
    /// entry is applied.
    pub fn applied_label(&self) -> Option<&str> {
        if self.has_all_entry && self.applied == 0 {
            return None;
        }
        self.items.get(self.applied).map(|(label, _)| label.as_str())
    }

    /// Handle a navigation event. Returns `true` when the applied filter
    /// changed (the caller should rebuild whatever depends on it).
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let max = self.items.len() - 1;

        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                self.cursor = (self.cursor + 1).min(max);
            }
            AppEvent::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.cursor = (self.cursor + PAGE_STEP).min(max);
            }
            AppEvent::Enter => {
                if self.applied != self.cursor {
                    self.applied = self.cursor;
                    tracing::debug!(
                        filter = ?self.applied_label(),
                        "sidebar: filter applied"
                    );
                    return true;
                }
            }
            _ => {}
        }
        false
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CategoryList<'a> {
    state: &'a CategoryListState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> CategoryList<'a> {
    pub fn new(state: &'a CategoryListState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for CategoryList<'_> {
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

        let items: Vec<ListItem> = self
            .state
            .items
            .iter()
            .enumerate()
            .map(|(i, (label, count))| {
                let marker = if i == self.state.applied { "● " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::raw(marker.to_string()),
                    Span::styled(label.clone(), self.theme.category_style(label)),
                    Span::styled(
                        format!("  {count}"),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                ]))
            })
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut list_state = ListState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
