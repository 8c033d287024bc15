use thiserror::Error;

/// Fatal input conditions that abort a flyer run before any output is
/// produced. Per-line classification drops and per-field parse misses are
/// deliberately NOT represented here — they degrade to skipped lines and
/// nulled fields instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("flyer scrape contains no ad lines")]
    EmptyFlyer,
    #[error("flyer scrape is missing its validity window")]
    MissingValidityWindow,
}
