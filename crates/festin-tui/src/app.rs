//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All aggregations are
//! computed up-front from the immutable dataset snapshot; event handling only
//! ever swaps filters and rebuilds the affected view state.

use crate::{
    commands::Command,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        category_list::{CategoryList, CategoryListState},
        command_bar::{CommandBar, CommandBarState},
        discipline_bars::{BarList, BarListState},
        help::HelpPopup,
        map_view::{MapView, MapViewState},
        period_shares::PeriodShares,
        status_bar::StatusBar,
        tab_bar::TabBar,
        trend_chart::{TrendChart, TrendData},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use festin_core::{aggregate, config::Config, Dataset};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// View + focus types
// ---------------------------------------------------------------------------

/// The five dashboard views, in tab-bar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Geographic density map with a discipline filter sidebar.
    Map,
    /// Festival creations per year.
    Trend,
    /// Dominant-discipline distribution.
    Disciplines,
    /// Share of festivals per running period.
    Periods,
    /// Disciplines within one period, with a period sidebar.
    CrossTab,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Map,
        View::Trend,
        View::Disciplines,
        View::Periods,
        View::CrossTab,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Map => "Carte",
            View::Trend => "Évolution",
            View::Disciplines => "Disciplines",
            View::Periods => "Périodes",
            View::CrossTab => "Croisé",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Map => 0,
            View::Trend => 1,
            View::Disciplines => 2,
            View::Periods => 3,
            View::CrossTab => 4,
        }
    }

    /// Resolve a `view <name>` command argument. Accepts the French labels
    /// with or without accents, plus the obvious English aliases.
    pub fn from_name(name: &str) -> Option<View> {
        match name.to_lowercase().as_str() {
            "carte" | "map" => Some(View::Map),
            "evolution" | "évolution" | "trend" => Some(View::Trend),
            "disciplines" => Some(View::Disciplines),
            "periodes" | "périodes" | "periods" => Some(View::Periods),
            "croise" | "croisé" | "cross" => Some(View::CrossTab),
            _ => None,
        }
    }

    /// Whether this view carries a filter sidebar.
    fn has_sidebar(self) -> bool {
        matches!(self, View::Map | View::CrossTab)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Filter sidebar (map and cross-tab views only).
    Sidebar,
    /// The main chart pane.
    View,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// Cross-tab state
// ---------------------------------------------------------------------------

pub struct CrossTabState {
    /// Period selector sidebar; entry 0 is applied at startup.
    pub filter: CategoryListState,
    pub bars: BarListState,
}

impl CrossTabState {
    fn new(dataset: &Dataset, periods: &[(String, u64)]) -> Self {
        let filter = CategoryListState::new("Périodes", periods.to_vec());
        let mut state = Self {
            filter,
            bars: BarListState::new(String::new(), Vec::new()),
        };
        state.rebuild(dataset);
        state
    }

    /// Recompute the discipline bars for the applied period.
    fn rebuild(&mut self, dataset: &Dataset) {
        match self.filter.applied_label() {
            Some(period) => {
                let rows = aggregate::disciplines_for_period(dataset, period);
                self.bars
                    .set_rows(format!(" Disciplines — {period} "), rows);
            }
            None => self.bars.set_rows(" Disciplines ", Vec::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub dataset: Dataset,
    pub config: Config,
    pub theme: Theme,

    pub view: View,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,

    pub map: MapViewState,
    pub trend: TrendData,
    pub disciplines: BarListState,
    pub periods: Vec<(String, u64)>,
    pub cross: CrossTabState,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(dataset: Dataset, config: Config, theme: Theme) -> Self {
        let map = MapViewState::new(&dataset, &config.ui);
        let trend = TrendData::from_snapshot(&dataset);
        let disciplines = BarListState::new(
            " Festivals par discipline dominante ",
            aggregate::counts_by_discipline(&dataset),
        );
        let periods = aggregate::counts_by_period(&dataset);
        let cross = CrossTabState::new(&dataset, &periods);

        let state = AppState {
            dataset,
            config,
            theme,
            view: View::Map,
            focus: Focus::Sidebar,
            prev_focus: Focus::Sidebar,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
            map,
            trend,
            disciplines,
            periods,
            cross,
        };

        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(250))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping while the command bar is open
                        let app_event = if self.state.focus == Focus::Command {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                view = ?self.state.view,
                                event = ?ev,
                                "key event"
                            );
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            // Empty input — just close
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Char(':') => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::SelectView(idx) => {
                if let Some(&view) = View::ALL.get(idx as usize) {
                    select_view(s, view);
                }
            }

            // Tab-cycle focus between the sidebar and the chart pane. Views
            // without a sidebar keep chart focus.
            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::Sidebar => Focus::View,
                    Focus::View if s.view.has_sidebar() => Focus::Sidebar,
                    _ => Focus::View,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}
            AppEvent::Escape => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Switch to `view`, putting focus on its sidebar when it has one.
fn select_view(s: &mut AppState, view: View) {
    tracing::debug!(from = ?s.view, to = ?view, "view switch");
    s.view = view;
    s.focus = if view.has_sidebar() {
        Focus::Sidebar
    } else {
        Focus::View
    };
}

/// Execute a parsed [`Command`] against the application state.
fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = match name.to_ascii_lowercase().as_str() {
                "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Theme::load_gruvbox_dark(),
                _ => Theme::load_default(),
            };
        }
        Command::View(name) => match View::from_name(&name) {
            Some(view) => select_view(s, view),
            None => {
                s.command_bar.error = Some(format!("unknown view: {name}"));
                s.prev_focus = s.focus;
                s.focus = Focus::Command;
            }
        },
    }
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Sidebar => match s.view {
            View::Map => {
                if s.map.handle_sidebar(&event) {
                    s.map.rebuild(&s.dataset, &s.config.ui);
                }
            }
            View::CrossTab => {
                if s.cross.filter.handle(&event) {
                    s.cross.rebuild(&s.dataset);
                }
            }
            // No sidebar on the other views; nothing to route.
            _ => {}
        },
        Focus::View => match s.view {
            View::Disciplines => s.disciplines.handle(&event),
            View::CrossTab => s.cross.bars.handle(&event),
            // Map, trend and period views have no in-pane navigation.
            _ => {}
        },
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line tab bar | body | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(TabBar::new(state.view, &state.theme), vert[0]);
    draw_body(frame, state, vert[1]);
    frame.render_widget(StatusBar::new(&state.dataset, &state.theme), vert[2]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
    }
}

fn draw_body(frame: &mut Frame, state: &AppState, body: Rect) {
    let sidebar_focused = state.focus == Focus::Sidebar;
    let view_focused = state.focus == Focus::View;

    match state.view {
        View::Map => {
            let horiz = split_sidebar(state, body);
            frame.render_widget(
                CategoryList::new(&state.map.filter, sidebar_focused, &state.theme),
                horiz[0],
            );
            frame.render_widget(MapView::new(&state.map, view_focused, &state.theme), horiz[1]);
        }
        View::Trend => {
            frame.render_widget(TrendChart::new(&state.trend, view_focused, &state.theme), body);
        }
        View::Disciplines => {
            frame.render_widget(
                BarList::new(&state.disciplines, view_focused, &state.theme),
                body,
            );
        }
        View::Periods => {
            frame.render_widget(
                PeriodShares::new(
                    &state.periods,
                    state.dataset.missing_periods(),
                    view_focused,
                    &state.theme,
                ),
                body,
            );
        }
        View::CrossTab => {
            let horiz = split_sidebar(state, body);
            frame.render_widget(
                CategoryList::new(&state.cross.filter, sidebar_focused, &state.theme),
                horiz[0],
            );
            frame.render_widget(
                BarList::new(&state.cross.bars, view_focused, &state.theme),
                horiz[1],
            );
        }
    }
}

fn split_sidebar(state: &AppState, body: Rect) -> std::rc::Rc<[Rect]> {
    let pct = state.config.ui.sidebar_width_pct;
    Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(body)
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;
    use festin_core::{Coordinate, Festival};
    use pretty_assertions::assert_eq;

    fn festival(
        discipline: &str,
        period: Option<&str>,
        year: Option<i32>,
        coords: Option<(f64, f64)>,
    ) -> Festival {
        Festival {
            name: None,
            region: None,
            commune: None,
            discipline: Some(discipline.to_string()),
            period: period.map(str::to_string),
            year,
            coordinates: coords.map(|(lat, lon)| Coordinate { lat, lon }),
        }
    }

    fn app() -> App {
        let dataset = Dataset::new(vec![
            festival("Musique", Some("Saison"), Some(1992), Some((48.85, 2.35))),
            festival("Musique", Some("Saison"), Some(2001), Some((43.60, 1.44))),
            festival("Théâtre", Some("Avant-saison"), Some(2001), Some((45.76, 4.83))),
            festival("Cinéma", Some("Saison"), None, None),
        ]);
        App::new(dataset, Config::defaults(), Theme::load_default())
    }

    #[test]
    fn starts_on_the_map_with_sidebar_focus() {
        let app = app();
        assert_eq!(app.state.view, View::Map);
        assert_eq!(app.state.focus, Focus::Sidebar);
        assert_eq!(app.state.map.points_total(), 3);
    }

    #[test]
    fn select_view_moves_focus_to_sensible_default() {
        let mut app = app();
        app.handle(AppEvent::SelectView(1));
        assert_eq!(app.state.view, View::Trend);
        assert_eq!(app.state.focus, Focus::View);

        app.handle(AppEvent::SelectView(4));
        assert_eq!(app.state.view, View::CrossTab);
        assert_eq!(app.state.focus, Focus::Sidebar);
    }

    #[test]
    fn out_of_range_view_index_is_ignored() {
        let mut app = app();
        app.handle(AppEvent::SelectView(9));
        assert_eq!(app.state.view, View::Map);
    }

    #[test]
    fn focus_cycle_respects_sidebar_presence() {
        let mut app = app();
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state.focus, Focus::View);
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state.focus, Focus::Sidebar);

        // Trend has no sidebar: Tab keeps chart focus.
        app.handle(AppEvent::SelectView(1));
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state.focus, Focus::View);
    }

    #[test]
    fn map_filter_rebuilds_density_grid() {
        let mut app = app();
        app.handle(AppEvent::Nav(Direction::Down));
        app.handle(AppEvent::Enter);
        assert_eq!(app.state.map.filter.applied_label(), Some("Musique"));
        assert_eq!(app.state.map.points_total(), 2);
    }

    #[test]
    fn cross_tab_starts_on_dominant_period() {
        let app = app();
        assert_eq!(app.state.cross.filter.applied_label(), Some("Saison"));
        assert_eq!(
            app.state.cross.bars.rows,
            vec![("Musique".to_string(), 2), ("Cinéma".to_string(), 1)]
        );
    }

    #[test]
    fn cross_tab_filter_changes_rows() {
        let mut app = app();
        app.handle(AppEvent::SelectView(4));
        app.handle(AppEvent::Nav(Direction::Down));
        app.handle(AppEvent::Enter);
        assert_eq!(app.state.cross.filter.applied_label(), Some("Avant-saison"));
        assert_eq!(
            app.state.cross.bars.rows,
            vec![("Théâtre".to_string(), 1)]
        );
    }

    #[test]
    fn help_popup_intercepts_until_closed() {
        let mut app = app();
        app.handle(AppEvent::Char('?'));
        assert!(app.state.show_help);
        // Navigation is swallowed while help is open.
        app.handle(AppEvent::Nav(Direction::Down));
        assert_eq!(app.state.map.filter.cursor, 0);
        app.handle(AppEvent::Escape);
        assert!(!app.state.show_help);
    }

    #[test]
    fn command_mode_round_trip() {
        let mut app = app();
        app.handle(AppEvent::Char(':'));
        assert_eq!(app.state.focus, Focus::Command);
        for c in "view croise".chars() {
            app.handle(AppEvent::Char(c));
        }
        app.handle(AppEvent::Enter);
        assert_eq!(app.state.view, View::CrossTab);
    }

    #[test]
    fn unknown_command_shows_error_and_stays_open() {
        let mut app = app();
        app.handle(AppEvent::Char(':'));
        for c in "frobnicate".chars() {
            app.handle(AppEvent::Char(c));
        }
        app.handle(AppEvent::Enter);
        assert_eq!(app.state.focus, Focus::Command);
        assert!(app.state.command_bar.error.is_some());
        app.handle(AppEvent::Escape);
        assert_ne!(app.state.focus, Focus::Command);
    }

    #[test]
    fn quit_event_sets_quit_flag() {
        let mut app = app();
        app.handle(AppEvent::Quit);
        assert!(app.state.quit);
    }

    #[test]
    fn view_from_name_accepts_accents_and_aliases() {
        assert_eq!(View::from_name("Carte"), Some(View::Map));
        assert_eq!(View::from_name("évolution"), Some(View::Trend));
        assert_eq!(View::from_name("periodes"), Some(View::Periods));
        assert_eq!(View::from_name("croisé"), Some(View::CrossTab));
        assert_eq!(View::from_name("nope"), None);
    }
}
