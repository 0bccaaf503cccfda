use thiserror::Error;

/// Errors surfaced by the score index core.
///
/// Writer misuse (adding entries after finalize, finalizing twice) is a
/// protocol violation by the embedding pipeline, not a data condition; those
/// paths fail fast with an assertion instead of returning a variant.
#[derive(Error, Debug)]
pub enum ScoreIndexError {
    /// The buffer cannot hold what its header declares, or the declared
    /// entry count exceeds the fixed cap. Nothing read from such a buffer
    /// can be trusted.
    #[error("corrupt score index: {reason}")]
    CorruptIndex { reason: String },

    /// The underlying sink could not accept more bytes; propagated as-is,
    /// retries belong to the sink implementation.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
