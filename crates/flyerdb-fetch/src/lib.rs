//! Fetch collaborator: materializes one scraped flyer in memory.
//!
//! Live-site retrieval (browser automation, retries against the remote
//! page) happens outside this workspace. Whatever scrapes the flyer page
//! writes its output in the staging format read here, so the engine only
//! ever sees an already-materialized [`ScrapedFlyer`].

pub mod staging;

pub use staging::{find_latest_staging, write_staging, StagingFile};

use flyerdb_core::ScrapedFlyer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read staging file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("staging file {path} has no content")]
    Empty { path: String },
}

/// A collaborator that produces the raw ad lines and validity window for
/// one flyer.
pub trait Fetcher {
    /// Materialize one scraped flyer.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the underlying source cannot be read at
    /// all. A readable source with a malformed header is NOT an error here:
    /// the validity dates come back as `None` and the pipeline decides
    /// whether that is fatal.
    fn fetch(&self) -> Result<ScrapedFlyer, FetchError>;
}
