//! Markup extraction for coursedump.
//!
//! Three extractors over the course platform's hand-authored markup:
//!
//! - [`extract_sitemap`]: the fixed 3-level navigation structure into a
//!   [`coursedump_site::Sitemap`] tree
//! - [`resolve_video`]: name and direct media URL scraped out of a video
//!   viewer document's inline script
//! - [`PageResolver`]: page markup to Markdown, localizing embedded videos
//!   along the way
//!
//! All extraction is all-or-nothing: a missing element or script property
//! fails the whole operation rather than degrading to partial output.

mod literal;
mod markdown;
mod page;
mod sitemap;
mod video;

pub use page::{PageError, PageResolver, parse_title};
pub use sitemap::extract_sitemap;
pub use video::{VideoDescriptor, resolve_video};

use scraper::Selector;

/// Extraction failure against expected markup or script structure.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An element the fixed markup shape requires was absent.
    #[error("expected element not found: {context}")]
    MissingElement {
        /// Selector (or selector plus attribute) that failed to match.
        context: String,
    },
    /// A script property the viewer document must define was absent.
    #[error("script property not found: {key}")]
    PropertyNotFound {
        /// Name of the missing property.
        key: String,
    },
    /// A matched script value was not a well-formed string literal.
    #[error("malformed string literal: {0}")]
    BadStringLiteral(String),
}

impl ScrapeError {
    pub(crate) fn missing(context: &str) -> Self {
        Self::MissingElement {
            context: context.to_owned(),
        }
    }
}

/// Parse a hand-written CSS selector.
///
/// All selectors in this crate are string constants, so a parse failure is a
/// programming error, not input-dependent.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}
