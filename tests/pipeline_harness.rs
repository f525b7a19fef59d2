//! End-to-end pipeline harness: CSV file → decode → normalise → aggregate.
//!
//! # What this covers
//!
//! - **Loading**: a semicolon-delimited CSV file with the data.gouv.fr
//!   column names loads into a `Dataset` snapshot, one festival per row.
//! - **Normalisation across the pipeline**: verbose period labels collapse
//!   to their canonical forms, stray month names drop out of the period
//!   aggregation, free-text and full-date years both resolve, and broken
//!   coordinate pairs degrade to absent rather than failing the load.
//! - **Aggregations over a loaded snapshot**: year series, discipline and
//!   period counts, the period × discipline cross-tab, and the geo point
//!   extraction the map density grid is built from.
//! - **Missing-field accounting**: the status-bar counters match the rows
//!   whose fields failed to normalise.
//!
//! # What this does NOT cover
//!
//! - The remote HTTPS fetch path (network; exercised against a local file
//!   via `Source::Local` instead).
//! - Terminal rendering (covered by the widget unit tests in festin-tui).
//!
//! # Running
//!
//! ```sh
//! cargo test --test pipeline_harness
//! ```

mod common;
use common::*;

use festin_core::aggregate;
use festin_data::{load_dataset, Source};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn sample_export_loads_one_festival_per_row() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();
    assert_eq!(ds.len(), 7);
}

#[test]
fn header_only_export_loads_an_empty_snapshot() {
    let file = csv_file(&format!("{HEADER}\n"));
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();
    assert!(ds.is_empty());
    assert!(aggregate::counts_by_discipline(&ds).is_empty());
}

#[test]
fn missing_file_fails_the_load() {
    let err = load_dataset(&Source::Local("/nonexistent/festivals.csv".into())).unwrap_err();
    assert!(matches!(err, festin_data::DataError::Io(_)));
}

// ---------------------------------------------------------------------------
// Normalisation across the pipeline
// ---------------------------------------------------------------------------

#[test]
fn verbose_period_labels_are_canonicalised() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();

    let rio = ds
        .festivals()
        .iter()
        .find(|f| f.name.as_deref() == Some("Rio Loco"))
        .unwrap();
    assert_eq!(
        rio.period.as_deref(),
        Some("Avant-saison (1er janvier - 20 juin)")
    );

    let lumiere = ds
        .festivals()
        .iter()
        .find(|f| f.name.as_deref() == Some("Festival Lumière"))
        .unwrap();
    assert_eq!(
        lumiere.period.as_deref(),
        Some("Après-saison (6 septembre - 31 décembre)")
    );
}

#[test]
fn stray_month_periods_are_dropped_not_counted() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();

    // "Juillet" and the dataset's own "Ocotbre" misspelling both drop out.
    let charrues = ds
        .festivals()
        .iter()
        .find(|f| f.name.as_deref() == Some("Les Vieilles Charrues"))
        .unwrap();
    assert_eq!(charrues.period, None);

    let periods = aggregate::counts_by_period(&ds);
    assert!(periods.iter().all(|(p, _)| p != "Juillet" && p != "Ocotbre"));
}

#[test]
fn free_text_and_full_date_years_both_resolve() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();

    let year_of = |name: &str| {
        ds.festivals()
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
            .unwrap()
            .year
    };
    assert_eq!(year_of("Festival Lumière"), Some(2009)); // "créé en 2009"
    assert_eq!(year_of("Les Vieilles Charrues"), Some(1992)); // "1992-07-10"
    assert_eq!(year_of("Fest'Hiver"), None); // "aucune"
}

#[test]
fn broken_coordinates_degrade_to_absent() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();

    // Out-of-range pair and prose both normalise to absent.
    for name in ["Fest'Hiver", "Mystère"] {
        let f = ds
            .festivals()
            .iter()
            .find(|f| f.name.as_deref() == Some(name))
            .unwrap();
        assert_eq!(f.coordinates, None, "festival: {name}");
    }
}

// ---------------------------------------------------------------------------
// Aggregations over the loaded snapshot
// ---------------------------------------------------------------------------

#[test]
fn year_series_is_ascending_over_resolved_years() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();
    assert_eq!(
        aggregate::creations_by_year(&ds),
        vec![(1992, 1), (1995, 1), (2005, 1), (2009, 1), (2010, 1)]
    );
}

#[test]
fn discipline_counts_rank_musique_first() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();
    assert_eq!(
        aggregate::counts_by_discipline(&ds),
        vec![
            ("Musique".to_string(), 3),
            ("Cinéma".to_string(), 1),
            ("Livre".to_string(), 1),
            ("Théâtre".to_string(), 1),
        ]
    );
}

#[test]
fn period_counts_only_hold_canonical_labels() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();
    assert_eq!(
        aggregate::counts_by_period(&ds),
        vec![
            ("Après-saison (6 septembre - 31 décembre)".to_string(), 1),
            ("Avant-saison".to_string(), 1),
            ("Avant-saison (1er janvier - 20 juin)".to_string(), 1),
            ("Saison".to_string(), 1),
        ]
    );
}

#[test]
fn cross_tab_restricts_disciplines_to_one_period() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();
    assert_eq!(
        aggregate::disciplines_for_period(&ds, "Saison"),
        vec![("Musique".to_string(), 1)]
    );
    assert!(aggregate::disciplines_for_period(&ds, "Juillet").is_empty());
}

#[test]
fn geo_points_skip_absent_coordinates_and_honour_the_filter() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();
    assert_eq!(aggregate::geo_points(&ds, None).len(), 4);
    assert_eq!(aggregate::geo_points(&ds, Some("Musique")).len(), 3);
    assert_eq!(aggregate::geo_points(&ds, Some("Livre")).len(), 0);
}

// ---------------------------------------------------------------------------
// Missing-field accounting
// ---------------------------------------------------------------------------

#[test]
fn status_counters_match_the_rows_that_failed_to_normalise() {
    let file = csv_file(SAMPLE_CSV);
    let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();
    assert_eq!(ds.missing_coordinates(), 3);
    assert_eq!(ds.missing_years(), 2);
    assert_eq!(ds.missing_periods(), 3);
}
