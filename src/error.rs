//! Error types for cache construction.
//!
//! Lookups never fail: a miss is reported as `None`. The only rejected input
//! is a capacity of zero, which is refused when the cache is built rather
//! than silently clamped.

use core::fmt;

/// Result type alias for fallible cache construction.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while building a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested capacity was zero; a cache must hold at least one entry.
    ZeroCapacity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "cache capacity must be at least 1"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
