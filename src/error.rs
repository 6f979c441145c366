use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for one generation run.
///
/// Per-document failures (unreadable file, irreparable sample, dangling
/// selector) are isolated: the batch runner logs and skips them. Only input
/// resolution fails a run before it starts.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read sample file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed sample {path} (at JSON path {pointer})")]
    Json {
        path: String,
        pointer: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid glob pattern")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to read glob entry")]
    Glob(#[from] glob::GlobError),

    #[error("glob pattern matched no files: {pattern}")]
    NoMatches { pattern: String },

    #[error("selector {pointer} matched nothing in {path}")]
    Selector { pointer: String, path: String },
}
