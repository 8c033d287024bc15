//! Reader/writer for the flyer staging format.
//!
//! The format is one header line `"<valid_from> - <valid_until>"` with ISO
//! dates, followed by one raw ad label per line. Labels are trimmed and
//! lowercase-normalized on read, so everything downstream of the fetcher
//! works on lowercase text.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use flyerdb_core::ScrapedFlyer;

use crate::{FetchError, Fetcher};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Filename prefix the flyer scraper uses for staging files, e.g.
/// `weeklyad_2026-03-04.txt`.
const STAGING_PREFIX: &str = "weeklyad_";

/// Fetcher over a staging file on local disk.
pub struct StagingFile {
    path: PathBuf,
}

impl StagingFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Fetcher for StagingFile {
    fn fetch(&self) -> Result<ScrapedFlyer, FetchError> {
        let content = fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        let mut lines = content.lines();
        let Some(header) = lines.next() else {
            return Err(FetchError::Empty {
                path: self.path.display().to_string(),
            });
        };

        let (valid_from, valid_until) = parse_header(header);
        if valid_from.is_none() || valid_until.is_none() {
            tracing::warn!(
                path = %self.path.display(),
                header,
                "staging header did not parse as a validity window"
            );
        }

        let ad_lines: Vec<String> = lines
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_lowercase)
            .collect();

        Ok(ScrapedFlyer {
            lines: ad_lines,
            valid_from,
            valid_until,
        })
    }
}

/// Parse `"<valid_from> - <valid_until>"`. Either side failing to parse
/// yields `None` for that side — deciding whether a missing window is
/// fatal belongs to the pipeline, not the reader.
fn parse_header(header: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    match header.trim().split_once(" - ") {
        Some((from, until)) => (
            NaiveDate::parse_from_str(from.trim(), DATE_FORMAT).ok(),
            NaiveDate::parse_from_str(until.trim(), DATE_FORMAT).ok(),
        ),
        None => (None, None),
    }
}

/// Write a staging file: validity header, then one raw label per line.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the file cannot be written.
pub fn write_staging(
    path: &Path,
    valid_from: NaiveDate,
    valid_until: NaiveDate,
    lines: &[String],
) -> Result<(), FetchError> {
    let mut out = format!(
        "{} - {}\n",
        valid_from.format(DATE_FORMAT),
        valid_until.format(DATE_FORMAT)
    );
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }

    fs::write(path, out).map_err(|source| FetchError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Find the lexicographically latest `weeklyad_*` staging file in `dir`.
/// Filenames embed the ISO scrape date, so lexicographic order is
/// chronological order.
#[must_use]
pub fn find_latest_staging(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;

    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(STAGING_PREFIX))
        })
        .max()
}
