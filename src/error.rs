use std::fmt;

/// Errors reported by image construction and component tree building
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The image does not start at the zero coordinate
    NonZeroOrigin,
    /// The image has no dimensions or a zero extent
    EmptyImage,
    /// Pixel data does not match the declared extents
    DimensionMismatch { expected: usize, actual: usize },
    /// A flush needed a component below the sentinel
    StackExhausted,
    /// Coordinates left unvisited after a run
    Unvisited { count: usize },
    /// Worker pool could not be created
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonZeroOrigin => write!(f, "image origin must be zero"),
            Self::EmptyImage => write!(f, "image is empty"),
            Self::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {} pixels, got {}", expected, actual)
            }
            Self::StackExhausted => write!(f, "empty component stack"),
            Self::Unvisited { count } => write!(f, "{} positions were never visited", count),
            Self::ThreadPool(reason) => write!(f, "cannot build thread pool: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
