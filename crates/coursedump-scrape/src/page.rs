//! Page content resolution.
//!
//! Turns one page's raw markup into Markdown. Embedded video players are
//! iframes pointing at a viewer document; each one is resolved to a local
//! media file and swapped, in place, for an `<img>` placeholder before the
//! content container is handed to the Markdown converter. A failure in any
//! sub-step aborts the page, and with it the whole run.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use coursedump_fetch::{FetchError, Fetcher, MediaKind};
use coursedump_site::{Page, PageSource};

use crate::video::resolve_video;
use crate::{ScrapeError, markdown, selector};

const TITLE_SELECTOR: &str = "head title";
const PAGE_SELECTOR: &str = "div.panel.panel-kartra";
const VIDEO_IFRAME_SELECTOR: &str = "iframe.video_iframe";

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(TITLE_SELECTOR));
static PAGE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(PAGE_SELECTOR));
static VIDEO_IFRAME_SEL: LazyLock<Selector> = LazyLock::new(|| selector(VIDEO_IFRAME_SELECTOR));

/// Page resolution failure.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Expected markup or script structure was absent.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
    /// Fetching the viewer document or downloading media failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The HTML→Markdown transform rejected the fragment.
    #[error("markdown conversion failed: {0}")]
    Convert(String),
}

/// Resolves page markup to Markdown, localizing embedded videos.
pub struct PageResolver<'a> {
    fetcher: &'a Fetcher,
    converter: htmd::HtmlToMarkdown,
}

impl<'a> PageResolver<'a> {
    /// Create a resolver downloading through `fetcher`.
    #[must_use]
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self {
            fetcher,
            converter: markdown::converter(),
        }
    }

    /// Resolve one page's markup to Markdown.
    ///
    /// Every `iframe.video_iframe` inside the content container is processed
    /// in document order: fetch its viewer document, scrape the video's name
    /// and media URL, download the media, and substitute a local `<img>`
    /// placeholder at the iframe's exact position among its siblings.
    ///
    /// # Errors
    ///
    /// [`ScrapeError::MissingElement`] when the content container or an
    /// iframe `src` is absent; any fetch, download, scrape, or conversion
    /// failure from the sub-steps.
    pub fn resolve(&self, html: &str) -> Result<String, PageError> {
        let document = Html::parse_document(html);

        let container = document
            .select(&PAGE_SEL)
            .next()
            .ok_or_else(|| ScrapeError::missing(PAGE_SELECTOR))?;

        // Substitutions happen on the serialized container. Each iframe's own
        // serialization appears verbatim inside it, so replacing the first
        // occurrence per iframe, in document order, preserves positions even
        // when two embeds are byte-identical.
        let mut content = container.html();

        for iframe in container.select(&VIDEO_IFRAME_SEL) {
            let placeholder = self.localize_video(iframe)?;
            content = content.replacen(&iframe.html(), &placeholder, 1);
        }

        self.converter
            .convert(&content)
            .map_err(|e| PageError::Convert(e.to_string()))
    }

    /// Resolve one embedded video and return its placeholder markup.
    fn localize_video(&self, iframe: ElementRef<'_>) -> Result<String, PageError> {
        let src = iframe
            .value()
            .attr("src")
            .ok_or_else(|| ScrapeError::missing("iframe.video_iframe[src]"))?;

        let viewer = self.fetcher.fetch_text(src)?;
        let video = resolve_video(&viewer)?;
        tracing::debug!("localizing video '{}' from {}", video.name, video.url);

        let path = self.fetcher.download(&video.url, MediaKind::Video)?;

        Ok(format!(
            r#"<img src="{}" alt="{}">"#,
            escape_attribute(&path.display().to_string()),
            escape_attribute(&video.name),
        ))
    }
}

impl PageSource for PageResolver<'_> {
    fn page_markdown(
        &self,
        page: &Page,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let html = self.fetcher.fetch_text(&page.url)?;
        Ok(self.resolve(&html)?)
    }
}

/// Text content of the document's `<title>`.
///
/// # Errors
///
/// [`ScrapeError::MissingElement`] when the document has no title element.
pub fn parse_title(html: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SEL)
        .next()
        .ok_or_else(|| ScrapeError::missing(TITLE_SELECTOR))?;

    Ok(title.text().collect::<String>())
}

/// Escape a value for use inside a double-quoted HTML attribute.
fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
