//! CSV fixtures shaped like the data.gouv.fr festivals export.
//!
//! The real export is semicolon-delimited with a header row naming each
//! column. These fixtures reproduce the column names and the messy field
//! values the normaliser has to cope with: free-text years, stray month
//! names in the period column, verbose period labels and broken coordinate
//! pairs.

use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "nom_du_festival;region_principale_de_deroulement;commune_principale_de_deroulement;discipline_dominante;periode_principale_de_deroulement_du_festival;annee_de_creation_du_festival;geocodage_xy";

/// A small but representative slice of the export. Rows cover:
/// - clean values that normalise directly
/// - the verbose pre/post-season labels that must collapse to their
///   canonical two-word forms
/// - a stray month name in the period column ("Juillet", plus the
///   dataset's own "Ocotbre" misspelling)
/// - a year buried in free text and a year given as a full date
/// - coordinates that are empty, truncated, or out of range
pub const SAMPLE_CSV: &str = "\
nom_du_festival;region_principale_de_deroulement;commune_principale_de_deroulement;discipline_dominante;periode_principale_de_deroulement_du_festival;annee_de_creation_du_festival;geocodage_xy
Fête du Bruit;Bretagne;Landerneau;Musique;Saison;2010;48.4515,-4.2482
Rio Loco;Occitanie;Toulouse;Musique;avant-saison (1er janvier - 20 juin);1995;43.5929,1.4370
Festival Lumière;Auvergne-Rhône-Alpes;Lyon;Cinéma;après-saison (6 septembre - 31 décembre);créé en 2009;45.7485,4.8467
Les Vieilles Charrues;Bretagne;Carhaix;Musique;Juillet;1992-07-10;48.2756,-3.5661
Quais du Polar;Auvergne-Rhône-Alpes;Lyon;Livre;Avant-saison;2005;
Fest'Hiver;Provence-Alpes-Côte d'Azur;Avignon;Théâtre;Ocotbre;aucune;91.0,200.0
Mystère;;;;;;pas des coordonnées
";

/// Write `csv` to a temp file and return the handle (keeps the file alive).
pub fn csv_file(csv: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp csv");
    file.write_all(csv.as_bytes()).expect("write temp csv");
    file
}
