//! Field normalizer — turns raw CSV text fields into typed values.
//!
//! Every function here is pure and total: any input string maps to either a
//! valid typed value or an explicit absent marker (`None` / pass-through).
//! Nothing in this module returns an error or panics on malformed data, so a
//! bad row degrades to "does not contribute to this chart" rather than
//! aborting the session.

use crate::types::{Coordinate, Festival, RawRecord};
use regex::Regex;
use std::sync::LazyLock;

/// Bare 4-digit year token, e.g. `1987`. Checked first.
static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year token pattern must compile"));

/// Full `YYYY-MM-DD` date; only the year part is kept.
static FULL_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}").expect("full date pattern must compile"));

/// Known lowercase-prefixed period variants and their canonical forms.
static CANONICAL_PERIODS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "après-saison (6 septembre - 31 décembre)" => "Après-saison (6 septembre - 31 décembre)",
    "avant-saison (1er janvier - 20 juin)" => "Avant-saison (1er janvier - 20 juin)",
};

/// Calendar-month names (plus one misspelling present in the source data)
/// that sometimes end up in the period column. Rows carrying one of these are
/// excluded from period aggregations.
static STRAY_MONTHS: phf::Set<&'static str> = phf::phf_set! {
    "Janvier", "Février", "Mars", "Avril", "Mai", "Juin", "Juillet",
    "Août", "Septembre", "Octobre", "Novembre", "Décembre", "Ocotbre",
};

/// Parse a `"lat,lon"` coordinate string.
///
/// Returns `Some` only when the string contains exactly one comma, both
/// sides parse as floats, and the pair is finite and within geographic
/// ranges (lat ∈ [-90, 90], lon ∈ [-180, 180]). Everything else — empty
/// string, missing comma, non-numeric text, out-of-range values — is `None`.
pub fn parse_coordinates(raw: &str) -> Option<Coordinate> {
    let (lat_str, lon_str) = match raw.split_once(',') {
        // A second comma means the field is not a plain pair.
        Some((a, b)) if !b.contains(',') => (a, b),
        _ => return None,
    };

    let lat: f64 = lat_str.trim().parse().ok()?;
    let lon: f64 = lon_str.trim().parse().ok()?;

    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }

    Some(Coordinate { lat, lon })
}

/// Extract a creation year from a free-text date field.
///
/// The bare 4-digit token search runs before the full-date search, and the
/// first occurrence in the string wins. A string like
/// `"circa 1999, built 2001-05-01"` therefore yields `1999`.
pub fn parse_year(raw: &str) -> Option<i32> {
    if let Some(m) = YEAR_TOKEN.find(raw) {
        return m.as_str().parse().ok();
    }
    if let Some(m) = FULL_DATE.find(raw) {
        return m.as_str()[..4].parse().ok();
    }
    None
}

/// Map the two known lowercase-prefixed period variants to their capitalized
/// canonical forms; every other label passes through unchanged. Idempotent.
pub fn canonical_period(raw: &str) -> &str {
    CANONICAL_PERIODS.get(raw).copied().unwrap_or(raw)
}

/// True when the period field actually carries a stray calendar-month name.
pub fn is_stray_month(label: &str) -> bool {
    STRAY_MONTHS.contains(label)
}

/// Normalise one raw CSV row into a typed [`Festival`] record.
///
/// Passthrough fields keep their text (trimmed, empty → absent); the
/// coordinate, year, and period fields go through the parsers above.
pub fn normalize(raw: &RawRecord) -> Festival {
    let period = non_empty(raw.periode_principale_de_deroulement_du_festival.as_deref())
        .and_then(|p| {
            if is_stray_month(&p) {
                tracing::debug!(label = %p, "period field holds a stray month name; dropping");
                None
            } else {
                Some(canonical_period(&p).to_string())
            }
        });

    Festival {
        name: non_empty(raw.nom_du_festival.as_deref()),
        region: non_empty(raw.region_principale_de_deroulement.as_deref()),
        commune: non_empty(raw.commune_principale_de_deroulement.as_deref()),
        discipline: non_empty(raw.discipline_dominante.as_deref()),
        period,
        year: raw
            .annee_de_creation_du_festival
            .as_deref()
            .and_then(parse_year),
        coordinates: raw.geocodage_xy.as_deref().and_then(parse_coordinates),
    }
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
