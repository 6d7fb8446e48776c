use std::path::PathBuf;

/// Crate-wide result alias, mirroring `milli`'s own `pub type Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors this crate can surface.
///
/// `LookupMiss` and `EmptyQuery` from the design notes are deliberately not
/// variants here: a lookup miss is silently dropped during aggregation and an
/// empty query yields an empty, successful result. Promoting either to an
/// `Error` would make ordinary queries fail.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A source file's name didn't match the `<prefix>_<doc_number>_<suffix>`
    /// contract, or the stop-words file was malformed.
    #[error("input format error in {path}: {reason}")]
    InputFormat { path: PathBuf, reason: String },

    /// A read or write failed while walking the corpus or touching an index
    /// artifact on disk.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deserialization failed, or an integrity check on the loaded index
    /// caught something that can't have come from a well-formed `to_blob`.
    #[error("corrupt index: {0}")]
    CorruptIndex(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn input_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::InputFormat { path: path.into(), reason: reason.into() }
    }
}
