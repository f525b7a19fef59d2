//! Aggregations — pure functions from a [`Dataset`] snapshot to the numbers
//! each dashboard view renders.
//!
//! Absent fields never contribute: a record with no parseable coordinate is
//! simply missing from [`geo_points`], one with no year is missing from
//! [`creations_by_year`], and so on. All orderings are deterministic so the
//! same snapshot always renders identically.

use crate::types::{Coordinate, Dataset};
use std::collections::BTreeMap;

/// Festival creations per year, sorted by year ascending.
pub fn creations_by_year(ds: &Dataset) -> Vec<(i32, u64)> {
    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for year in ds.festivals().iter().filter_map(|f| f.year) {
        *counts.entry(year).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Festival counts per dominant discipline, sorted count-descending with
/// alphabetical tie-break.
pub fn counts_by_discipline(ds: &Dataset) -> Vec<(String, u64)> {
    count_labels(ds.festivals().iter().filter_map(|f| f.discipline.as_deref()))
}

/// Festival counts per canonical period, same ordering as
/// [`counts_by_discipline`]. Stray-month rows were already dropped by the
/// normalizer, so no month name can appear here.
pub fn counts_by_period(ds: &Dataset) -> Vec<(String, u64)> {
    count_labels(ds.festivals().iter().filter_map(|f| f.period.as_deref()))
}

/// Discipline counts restricted to festivals running in `period`.
pub fn disciplines_for_period(ds: &Dataset, period: &str) -> Vec<(String, u64)> {
    count_labels(
        ds.festivals()
            .iter()
            .filter(|f| f.period.as_deref() == Some(period))
            .filter_map(|f| f.discipline.as_deref()),
    )
}

/// Coordinates of every festival with a usable position, optionally
/// restricted to one discipline.
pub fn geo_points(ds: &Dataset, discipline: Option<&str>) -> Vec<Coordinate> {
    ds.festivals()
        .iter()
        .filter(|f| match discipline {
            Some(d) => f.discipline.as_deref() == Some(d),
            None => true,
        })
        .filter_map(|f| f.coordinates)
        .collect()
}

fn count_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    let mut out: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    // BTreeMap iteration is already alphabetical, so a stable sort by count
    // keeps the alphabetical tie-break.
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

// ---------------------------------------------------------------------------
// Map density grid
// ---------------------------------------------------------------------------

/// Geographic bounding box for the density grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Metropolitan France (mainland + Corsica). Overseas points fall outside
/// and are left off the map, matching the dataset's own map extent.
pub const FRANCE_BOUNDS: Bounds = Bounds {
    min_lat: 41.0,
    max_lat: 51.5,
    min_lon: -5.5,
    max_lon: 10.0,
};

/// A 2-D histogram of points over a bounding box, used by the map view to
/// shade festival density.
#[derive(Debug, Clone)]
pub struct DensityGrid {
    pub bounds: Bounds,
    pub nx: usize,
    pub ny: usize,
    /// Row-major cell counts, `ny` rows of `nx` columns, row 0 = south.
    cells: Vec<u32>,
    max: u32,
}

impl DensityGrid {
    /// Bucket `points` into an `nx` × `ny` grid over `bounds`. Points outside
    /// the box are skipped; points on the east/north edge land in the last
    /// cell.
    pub fn build(points: &[Coordinate], bounds: Bounds, nx: usize, ny: usize) -> Self {
        let mut cells = vec![0u32; nx * ny];
        let lat_span = bounds.max_lat - bounds.min_lat;
        let lon_span = bounds.max_lon - bounds.min_lon;

        for p in points {
            if p.lat < bounds.min_lat
                || p.lat > bounds.max_lat
                || p.lon < bounds.min_lon
                || p.lon > bounds.max_lon
            {
                continue;
            }
            let ix = (((p.lon - bounds.min_lon) / lon_span) * nx as f64) as usize;
            let iy = (((p.lat - bounds.min_lat) / lat_span) * ny as f64) as usize;
            let ix = ix.min(nx - 1);
            let iy = iy.min(ny - 1);
            cells[iy * nx + ix] += 1;
        }

        let max = cells.iter().copied().max().unwrap_or(0);
        Self { bounds, nx, ny, cells, max }
    }

    pub fn count(&self, ix: usize, iy: usize) -> u32 {
        self.cells[iy * self.nx + ix]
    }

    /// Largest cell count in the grid (0 for an empty grid).
    pub fn max_count(&self) -> u32 {
        self.max
    }

    /// Cell count normalised to `0.0..=1.0` against the grid maximum.
    pub fn intensity(&self, ix: usize, iy: usize) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            f64::from(self.count(ix, iy)) / f64::from(self.max)
        }
    }

    /// Geographic centre of a cell, for plotting on a canvas.
    pub fn cell_center(&self, ix: usize, iy: usize) -> Coordinate {
        let lon_step = (self.bounds.max_lon - self.bounds.min_lon) / self.nx as f64;
        let lat_step = (self.bounds.max_lat - self.bounds.min_lat) / self.ny as f64;
        Coordinate {
            lat: self.bounds.min_lat + (iy as f64 + 0.5) * lat_step,
            lon: self.bounds.min_lon + (ix as f64 + 0.5) * lon_step,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Festival;
    use pretty_assertions::assert_eq;

    fn festival(
        discipline: Option<&str>,
        period: Option<&str>,
        year: Option<i32>,
        coords: Option<(f64, f64)>,
    ) -> Festival {
        Festival {
            name: None,
            region: None,
            commune: None,
            discipline: discipline.map(str::to_string),
            period: period.map(str::to_string),
            year,
            coordinates: coords.map(|(lat, lon)| Coordinate { lat, lon }),
        }
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            festival(Some("Musique"), Some("Saison"), Some(1992), Some((48.27, -3.57))),
            festival(Some("Musique"), Some("Saison"), Some(1992), Some((47.08, 2.40))),
            festival(Some("Théâtre"), Some("Avant-saison"), Some(2005), Some((43.6, 1.44))),
            festival(Some("Cinéma"), Some("Saison"), None, None),
            festival(None, None, Some(1992), None),
        ])
    }

    #[test]
    fn creations_by_year_sorted_ascending_and_skips_absent() {
        assert_eq!(
            creations_by_year(&sample()),
            vec![(1992, 3), (2005, 1)]
        );
    }

    #[test]
    fn discipline_counts_sorted_desc_with_alpha_tiebreak() {
        assert_eq!(
            counts_by_discipline(&sample()),
            vec![
                ("Musique".to_string(), 2),
                ("Cinéma".to_string(), 1),
                ("Théâtre".to_string(), 1),
            ]
        );
    }

    #[test]
    fn period_counts_skip_absent_periods() {
        assert_eq!(
            counts_by_period(&sample()),
            vec![
                ("Saison".to_string(), 3),
                ("Avant-saison".to_string(), 1),
            ]
        );
    }

    #[test]
    fn cross_tab_restricts_to_one_period() {
        assert_eq!(
            disciplines_for_period(&sample(), "Saison"),
            vec![("Musique".to_string(), 2), ("Cinéma".to_string(), 1)]
        );
        assert!(disciplines_for_period(&sample(), "Hors-saison").is_empty());
    }

    #[test]
    fn geo_points_filters_by_discipline() {
        assert_eq!(geo_points(&sample(), None).len(), 3);
        assert_eq!(geo_points(&sample(), Some("Musique")).len(), 2);
        assert_eq!(geo_points(&sample(), Some("Cinéma")).len(), 0);
    }

    #[test]
    fn density_grid_buckets_and_normalises() {
        let points = vec![
            Coordinate { lat: 41.1, lon: -5.4 }, // south-west corner cell
            Coordinate { lat: 41.1, lon: -5.4 },
            Coordinate { lat: 51.4, lon: 9.9 }, // north-east corner cell
            Coordinate { lat: 14.6, lon: -61.0 }, // Martinique — outside the box
        ];
        let grid = DensityGrid::build(&points, FRANCE_BOUNDS, 10, 10);
        assert_eq!(grid.count(0, 0), 2);
        assert_eq!(grid.count(9, 9), 1);
        assert_eq!(grid.max_count(), 2);
        assert_eq!(grid.intensity(0, 0), 1.0);
        assert_eq!(grid.intensity(9, 9), 0.5);
        assert_eq!(grid.intensity(5, 5), 0.0);
    }

    #[test]
    fn density_grid_edge_points_land_in_last_cell() {
        let points = vec![Coordinate { lat: 51.5, lon: 10.0 }];
        let grid = DensityGrid::build(&points, FRANCE_BOUNDS, 8, 8);
        assert_eq!(grid.count(7, 7), 1);
    }

    #[test]
    fn empty_dataset_yields_empty_aggregates() {
        let ds = Dataset::new(Vec::new());
        assert!(creations_by_year(&ds).is_empty());
        assert!(counts_by_discipline(&ds).is_empty());
        assert!(counts_by_period(&ds).is_empty());
        assert!(geo_points(&ds, None).is_empty());
        let grid = DensityGrid::build(&[], FRANCE_BOUNDS, 4, 4);
        assert_eq!(grid.max_count(), 0);
        assert_eq!(grid.intensity(0, 0), 0.0);
    }
}
