//! Dataset fetch — one blocking HTTPS GET (or a local file read).
//!
//! The session is synchronous by design: the dataset is fetched exactly once
//! at startup, before the terminal is put into raw mode. There is no retry
//! policy; a failed fetch aborts the session with a non-zero exit.

use crate::DataError;
use std::path::PathBuf;

/// Where the dataset comes from: the configured URL, or a local file given
/// on the command line (useful offline and in tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(String),
    Local(PathBuf),
}

impl Source {
    /// Interpret a CLI/config string: anything with an `http(s)://` scheme is
    /// remote, everything else is a local path.
    pub fn parse(s: &str) -> Self {
        if s.starts_with("http://") || s.starts_with("https://") {
            Source::Remote(s.to_string())
        } else {
            Source::Local(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Remote(url) => write!(f, "{url}"),
            Source::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw CSV text from `source`.
pub fn fetch_csv(source: &Source) -> Result<String, DataError> {
    match source {
        Source::Remote(url) => {
            tracing::info!(%url, "fetching dataset");
            let response = reqwest::blocking::get(url)?;
            let status = response.status();
            if !status.is_success() {
                return Err(DataError::HttpStatus {
                    status: status.as_u16(),
                    url: url.clone(),
                });
            }
            Ok(response.text()?)
        }
        Source::Local(path) => {
            tracing::info!(path = %path.display(), "reading dataset file");
            Ok(std::fs::read_to_string(path)?)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn url_strings_parse_as_remote() {
        assert_eq!(
            Source::parse("https://example.org/festivals.csv"),
            Source::Remote("https://example.org/festivals.csv".to_string())
        );
        assert_eq!(
            Source::parse("http://localhost:8080/data"),
            Source::Remote("http://localhost:8080/data".to_string())
        );
    }

    #[test]
    fn plain_strings_parse_as_local_paths() {
        assert_eq!(
            Source::parse("fixtures/festivals.csv"),
            Source::Local(PathBuf::from("fixtures/festivals.csv"))
        );
    }

    #[test]
    fn local_fetch_reads_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "nom_du_festival;geocodage_xy").unwrap();
        writeln!(file, "Rio Loco;43.59,1.43").unwrap();

        let text = fetch_csv(&Source::Local(file.path().to_path_buf())).unwrap();
        assert!(text.contains("Rio Loco"));
    }

    #[test]
    fn missing_local_file_is_an_io_error() {
        let err = fetch_csv(&Source::Local(PathBuf::from("/nonexistent/festivals.csv")))
            .unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
