//! CSV decoding and the load pipeline.
//!
//! The export is semicolon-delimited with named columns. Rows that cannot be
//! decoded at all (ragged beyond repair, broken quoting) are skipped with a
//! warning — a handful of bad rows should not take the dashboard down.
//! Per-field normalisation failures are handled further down by
//! `festin_core::normalize` and never surface as errors.

use crate::{fetch, DataError, Source};
use festin_core::{normalize, Dataset, RawRecord};
use std::io::Read;

/// Decode semicolon-delimited CSV into raw records.
///
/// Undecodable rows are skipped and counted, not fatal. An unreadable header
/// line is fatal: without headers no row can be interpreted.
pub fn decode_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);

    // Fail early if the header line itself is broken.
    rdr.headers()?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.deserialize() {
        match result {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                tracing::warn!(%err, "skipping undecodable row");
            }
        }
    }
    if skipped > 0 {
        tracing::warn!(skipped, decoded = records.len(), "dataset had undecodable rows");
    }
    Ok(records)
}

/// Fetch, decode, and normalise the dataset into an immutable snapshot.
pub fn load_dataset(source: &Source) -> Result<Dataset, DataError> {
    let text = fetch::fetch_csv(source)?;
    let records = decode_records(text.as_bytes())?;
    let festivals = records.iter().map(normalize::normalize).collect::<Vec<_>>();

    let dataset = Dataset::new(festivals);
    tracing::info!(
        records = dataset.len(),
        missing_coordinates = dataset.missing_coordinates(),
        missing_years = dataset.missing_years(),
        missing_periods = dataset.missing_periods(),
        "dataset loaded"
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
nom_du_festival;region_principale_de_deroulement;commune_principale_de_deroulement;discipline_dominante;periode_principale_de_deroulement_du_festival;annee_de_creation_du_festival;geocodage_xy
Les Vieilles Charrues;Bretagne;Carhaix-Plouguer;Musique;Saison (21 juin - 5 septembre);1992;48.2756,-3.5717
Printemps de Bourges;Centre-Val de Loire;Bourges;Musique;avant-saison (1er janvier - 20 juin);1977;47.0810,2.3988
Festival inconnu;;;Cinéma;Juillet;aucune idée;invalide
";

    #[test]
    fn sample_rows_decode_with_named_columns() {
        let records = decode_records(SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0].nom_du_festival.as_deref(),
            Some("Les Vieilles Charrues")
        );
        assert_eq!(records[2].geocodage_xy.as_deref(), Some("invalide"));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "\
nom_du_festival;envergure_territoriale;geocodage_xy
Rio Loco;Nationale;43.5912,1.4385
";
        let records = decode_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].geocodage_xy.as_deref(), Some("43.5912,1.4385"));
    }

    #[test]
    fn loaded_dataset_normalises_each_row_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, SAMPLE.as_bytes()).unwrap();

        let ds = load_dataset(&Source::Local(file.path().to_path_buf())).unwrap();
        assert_eq!(ds.len(), 3);

        let fs = ds.festivals();
        assert_eq!(fs[0].year, Some(1992));
        assert!(fs[0].coordinates.is_some());
        // Lowercase variant canonicalised.
        assert_eq!(
            fs[1].period.as_deref(),
            Some("Avant-saison (1er janvier - 20 juin)")
        );
        // Malformed fields degrade to absent; the stray month is dropped.
        assert_eq!(fs[2].year, None);
        assert_eq!(fs[2].coordinates, None);
        assert_eq!(fs[2].period, None);
        assert_eq!(fs[2].discipline.as_deref(), Some("Cinéma"));
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        let records = decode_records("".as_bytes()).unwrap();
        assert!(records.is_empty());
    }
}
