//! festin TUI — ratatui application shell.
//!
//! The TUI is the only side-effecting stage of the pipeline: it takes the
//! immutable [`festin_core::Dataset`] snapshot built at startup and renders
//! the five dashboard views, reacting to keyboard input until quit.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use festin_core::{config::Config, Dataset};

/// Start the dashboard over an already-loaded dataset snapshot.
pub fn run(dataset: Dataset, config: Config) -> anyhow::Result<()> {
    let theme = theme::Theme::load_default();
    App::new(dataset, config, theme).run()
}
