//! Authenticated HTTP session and on-disk resource cache.
//!
//! Every network request carries a fixed `User-Agent` and the course session
//! cookie, both supplied once at startup via [`Session::new`]. On top of the
//! session, [`Fetcher`] memoizes fetches on disk: a file that already exists
//! at the derived cache path is returned unconditionally, without re-fetching
//! or validating it.
//!
//! Successful fetches are written to disk before they are returned, so a
//! rerun after a mid-run failure resumes from the first uncached resource
//! with no explicit checkpointing.

mod cache;
mod session;
#[cfg(test)]
mod testutil;

pub use cache::{Fetcher, MediaKind};
pub use session::Session;

/// Network or cache I/O failure.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// URL of the failed request.
        url: String,
    },
    /// Transport-level failure (DNS, connect, read).
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),
    /// Cache file read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The identifier could not be parsed as a URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A download URL with no final path segment has no cache key.
    #[error("URL has no usable file name: {0}")]
    NoFileName(String),
}
