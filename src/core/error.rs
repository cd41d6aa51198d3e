use thiserror::Error;

/// Failures the engine reports to its caller.
///
/// Heuristic stages never fail; only reading and parsing a source file can.
#[derive(Debug, Error)]
pub enum CodemodError {
    #[error("failed to parse {path}:{line}: {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
