use thiserror::Error;

/// Errors surfaced by the collage core.
///
/// Nothing in the crate retries or recovers internally; every failure is
/// handed back to the caller, which decides how to present it.
#[derive(Debug, Error)]
pub enum CollageError {
    /// Undo was requested while the document holds no items.
    #[error("the document has no items to remove")]
    EmptyDocument,
    /// Decoding a saved collage failed.
    #[error("malformed collage file at line {line}: {reason}")]
    MalformedDocument { line: usize, reason: MalformedReason },
    /// The corpus given to the random generator contains no alphabetic words.
    #[error("no words found in the corpus")]
    NoWordsFound,
    /// Item text was empty or spans more than one line.
    #[error("invalid item text {0:?}")]
    InvalidText(String),
    /// A canvas or raster with a zero dimension was requested.
    #[error("canvas size must be non-zero, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    /// Reading or writing collage content failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Why a line of a saved collage was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("the background color header is incomplete")]
    MissingHeader,
    #[error("{value:?} is not an integer")]
    NotAnInteger { value: String },
    #[error("color channel {value} is outside 0..=255")]
    ChannelOutOfRange { value: i64 },
    #[error("the last record is truncated ({leftover} of 6 lines)")]
    TruncatedRecord { leftover: usize },
    #[error("item text is empty")]
    InvalidText,
}

pub type Result<T> = std::result::Result<T, CollageError>;
