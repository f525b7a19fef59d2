//! Core types for festin-core.
//!
//! This module defines the data structures shared across all layers: the raw
//! CSV row ([`RawRecord`]), the normalised [`Festival`] record, the
//! [`Coordinate`] pair, and the immutable [`Dataset`] snapshot the dashboard
//! reads from.

use serde::Deserialize;

/// A latitude/longitude pair extracted from the free-text `geocodage_xy`
/// field. Both components are finite and within geographic ranges; the
/// normalizer never constructs a `Coordinate` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// One row of the data.gouv.fr festivals export, exactly as decoded from the
/// semicolon-delimited CSV. Field names mirror the dataset's column headers.
///
/// Every field defaults to `None` so partial exports (and test fixtures that
/// only carry the columns under test) still decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub nom_du_festival: Option<String>,
    #[serde(default)]
    pub region_principale_de_deroulement: Option<String>,
    #[serde(default)]
    pub commune_principale_de_deroulement: Option<String>,
    #[serde(default)]
    pub discipline_dominante: Option<String>,
    #[serde(default)]
    pub periode_principale_de_deroulement_du_festival: Option<String>,
    #[serde(default)]
    pub annee_de_creation_du_festival: Option<String>,
    #[serde(default)]
    pub geocodage_xy: Option<String>,
}

/// A normalised festival record produced by one pass of the field normalizer.
///
/// Every derived field is optional: `None` means "no valid value could be
/// parsed from the source row", never zero or empty string. Records are
/// immutable after normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Festival {
    /// Festival name, passed through untouched.
    pub name: Option<String>,
    /// Main region, passed through untouched.
    pub region: Option<String>,
    /// Main commune, passed through untouched.
    pub commune: Option<String>,
    /// Dominant discipline label. `None` when the source field is empty.
    pub discipline: Option<String>,
    /// Canonical period label. `None` when the source field is empty or is a
    /// stray calendar-month name (excluded from period aggregations).
    pub period: Option<String>,
    /// Creation year extracted from the free-text date field.
    pub year: Option<i32>,
    /// Geographic position extracted from `geocodage_xy`.
    pub coordinates: Option<Coordinate>,
}

/// Immutable snapshot of the normalised dataset.
///
/// Built once at session start and passed by shared reference into every
/// aggregation and rendering function.
#[derive(Debug, Clone)]
pub struct Dataset {
    festivals: Vec<Festival>,
    fetched_at: chrono::DateTime<chrono::Utc>,
}

impl Dataset {
    pub fn new(festivals: Vec<Festival>) -> Self {
        Self {
            festivals,
            fetched_at: chrono::Utc::now(),
        }
    }

    pub fn festivals(&self) -> &[Festival] {
        &self.festivals
    }

    pub fn len(&self) -> usize {
        self.festivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.festivals.is_empty()
    }

    /// When the snapshot was built (shown in the status bar).
    pub fn fetched_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.fetched_at
    }

    /// Records with no usable coordinate (excluded from the map view).
    pub fn missing_coordinates(&self) -> usize {
        self.festivals
            .iter()
            .filter(|f| f.coordinates.is_none())
            .count()
    }

    /// Records with no usable creation year (excluded from the trend view).
    pub fn missing_years(&self) -> usize {
        self.festivals.iter().filter(|f| f.year.is_none()).count()
    }

    /// Records with no usable period (empty or stray month name).
    pub fn missing_periods(&self) -> usize {
        self.festivals.iter().filter(|f| f.period.is_none()).count()
    }
}
