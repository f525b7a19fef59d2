//! Dashboard widgets.
//!
//! Each widget follows the same split as state + render pair: a `...State`
//! struct owned by the app shell that reacts to [`AppEvent`]s, and a
//! borrowing ratatui `Widget` that renders it. Widgets never touch crossterm
//! directly.
//!
//! [`AppEvent`]: crate::event::AppEvent

pub mod category_list;
pub mod command_bar;
pub mod discipline_bars;
pub mod help;
pub mod map_view;
pub mod period_shares;
pub mod status_bar;
pub mod tab_bar;
pub mod trend_chart;
