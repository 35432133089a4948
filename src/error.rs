//! Error types for rich-text operations.

use std::fmt;

/// Result type alias for rich-text operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for rich-text operations.
///
/// Every public mutator validates its arguments before touching any state,
/// so an `Err` always means the document is exactly as it was before the
/// call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Malformed offsets: `start > end`, or an offset past the buffer end.
    InvalidRange { start: usize, end: usize, len: usize },
    /// A link was embedded over text that already belongs to another link.
    OverlappingLink {
        start: usize,
        end: usize,
        existing_start: usize,
        existing_end: usize,
    },
}

impl Error {
    pub(crate) const fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::InvalidRange { start, end, len }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { start, end, len } => {
                write!(f, "invalid range {start}..{end} for buffer of length {len}")
            }
            Self::OverlappingLink {
                start,
                end,
                existing_start,
                existing_end,
            } => {
                write!(
                    f,
                    "link {start}..{end} overlaps existing link {existing_start}..{existing_end}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
