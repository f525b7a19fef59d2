//! Map view — festival density over a France canvas.
//!
//! The grid of density cells comes from
//! [`festin_core::aggregate::DensityGrid`]; this widget only paints it. Cells
//! are shaded on the theme's heat ramp, normalised against the densest cell,
//! over the ratatui world-map coastline clipped to metropolitan France.

use crate::event::AppEvent;
use crate::theme::Theme;
use crate::widgets::category_list::CategoryListState;
use festin_core::{
    aggregate::{self, DensityGrid, FRANCE_BOUNDS},
    config::UiConfig,
    Dataset,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Widget,
    },
};

/// Number of discrete shades taken from the heat ramp.
const HEAT_LEVELS: usize = 8;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct MapViewState {
    /// Discipline filter sidebar (entry 0 = all disciplines).
    pub filter: CategoryListState,
    grid: DensityGrid,
    points_total: usize,
}

impl MapViewState {
    pub fn new(dataset: &Dataset, ui: &UiConfig) -> Self {
        let filter = CategoryListState::new(
            "Disciplines",
            aggregate::counts_by_discipline(dataset),
        )
        .with_all_entry("Toutes les disciplines", dataset.len() as u64);

        let mut state = Self {
            filter,
            grid: DensityGrid::build(&[], FRANCE_BOUNDS, ui.map_grid_cols, ui.map_grid_rows),
            points_total: 0,
        };
        state.rebuild(dataset, ui);
        state
    }

    /// Recompute the density grid for the currently applied filter.
    pub fn rebuild(&mut self, dataset: &Dataset, ui: &UiConfig) {
        let points = aggregate::geo_points(dataset, self.filter.applied_label());
        self.points_total = points.len();
        self.grid = DensityGrid::build(&points, FRANCE_BOUNDS, ui.map_grid_cols, ui.map_grid_rows);
    }

    /// Forward a sidebar event; returns `true` when the filter changed and
    /// the caller must [`rebuild`](Self::rebuild).
    pub fn handle_sidebar(&mut self, event: &AppEvent) -> bool {
        self.filter.handle(event)
    }

    pub fn grid(&self) -> &DensityGrid {
        &self.grid
    }

    pub fn points_total(&self) -> usize {
        self.points_total
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct MapView<'a> {
    state: &'a MapViewState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> MapView<'a> {
    pub fn new(state: &'a MapViewState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for MapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let title = match self.state.filter.applied_label() {
            Some(discipline) => format!(
                " Densité des festivals — {discipline} ({} points) ",
                self.state.points_total()
            ),
            None => format!(
                " Densité des festivals en France ({} points) ",
                self.state.points_total()
            ),
        };
        let block = Block::bordered().title(title).border_style(border_style);

        let grid = self.state.grid();
        let land = self.theme.map_land.fg.unwrap_or(Color::DarkGray);

        // Group shaded cells by discrete heat level so the canvas gets one
        // Points layer per colour.
        let mut buckets: Vec<Vec<(f64, f64)>> = vec![Vec::new(); HEAT_LEVELS];
        for iy in 0..grid.ny {
            for ix in 0..grid.nx {
                let intensity = grid.intensity(ix, iy);
                if intensity <= 0.0 {
                    continue;
                }
                let level = (intensity * (HEAT_LEVELS - 1) as f64).round() as usize;
                let c = grid.cell_center(ix, iy);
                buckets[level].push((c.lon, c.lat));
            }
        }

        Canvas::default()
            .block(block)
            .marker(Marker::HalfBlock)
            .x_bounds([FRANCE_BOUNDS.min_lon, FRANCE_BOUNDS.max_lon])
            .y_bounds([FRANCE_BOUNDS.min_lat, FRANCE_BOUNDS.max_lat])
            .paint(|ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: land,
                });
                ctx.layer();
                for (level, coords) in buckets.iter().enumerate() {
                    if coords.is_empty() {
                        continue;
                    }
                    let intensity = level as f64 / (HEAT_LEVELS - 1) as f64;
                    ctx.draw(&Points {
                        coords,
                        color: self.theme.heat_color(intensity),
                    });
                }
            })
            .render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;
    use festin_core::{Coordinate, Festival};

    fn dataset() -> Dataset {
        let festival = |discipline: &str, lat: f64, lon: f64| Festival {
            name: None,
            region: None,
            commune: None,
            discipline: Some(discipline.to_string()),
            period: None,
            year: None,
            coordinates: Some(Coordinate { lat, lon }),
        };
        Dataset::new(vec![
            festival("Musique", 48.85, 2.35),
            festival("Musique", 43.60, 1.44),
            festival("Théâtre", 45.76, 4.83),
        ])
    }

    #[test]
    fn unfiltered_state_counts_every_point() {
        let state = MapViewState::new(&dataset(), &UiConfig::default());
        assert_eq!(state.points_total(), 3);
        assert_eq!(state.grid().max_count(), 1);
    }

    #[test]
    fn applying_a_discipline_filter_rebuilds_the_grid() {
        let ds = dataset();
        let ui = UiConfig::default();
        let mut state = MapViewState::new(&ds, &ui);

        // Move off "Toutes les disciplines" onto "Musique" and apply.
        state.handle_sidebar(&AppEvent::Nav(Direction::Down));
        assert!(state.handle_sidebar(&AppEvent::Enter));
        state.rebuild(&ds, &ui);

        assert_eq!(state.filter.applied_label(), Some("Musique"));
        assert_eq!(state.points_total(), 2);
    }
}
