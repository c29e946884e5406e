//! Sitemap extraction from the navigation document.
//!
//! The platform renders the course's table of contents as a fixed 3-level
//! structure: category divs containing subcategory list items containing post
//! links. The extractor walks exactly those three levels in document order.
//! Generalizing to arbitrary nesting is a non-goal; the tree model itself
//! supports deeper shapes, the markup here never produces them.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use coursedump_site::{Page, Section, Sitemap};

use crate::{ScrapeError, selector};

const SITEMAP_SELECTOR: &str = "div.panel.panel-kartra.panel-sitemap";

const CATEGORY_SELECTOR: &str = "div.navigation_category_divs";
const CATEGORY_NAME_SELECTOR: &str = "h2.navigation_category_name";

const SUBCATEGORY_SELECTOR: &str = "ul.navigation_first_child_ul > li.index_subcategory";
const SUBCATEGORY_NAME_SELECTOR: &str =
    "div.navigation_subcategory_name div:nth-child(1) > div:nth-child(1)";

const POST_SELECTOR: &str = "ul.navigation_second_child_ul > li";
const POST_NAME_SELECTOR: &str = "span.navigation_second_child_name";
const POST_LINK_SELECTOR: &str = "a.js_open_post";

static SITEMAP_SEL: LazyLock<Selector> = LazyLock::new(|| selector(SITEMAP_SELECTOR));
static CATEGORY_SEL: LazyLock<Selector> = LazyLock::new(|| selector(CATEGORY_SELECTOR));
static CATEGORY_NAME_SEL: LazyLock<Selector> = LazyLock::new(|| selector(CATEGORY_NAME_SELECTOR));
static SUBCATEGORY_SEL: LazyLock<Selector> = LazyLock::new(|| selector(SUBCATEGORY_SELECTOR));
static SUBCATEGORY_NAME_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(SUBCATEGORY_NAME_SELECTOR));
static POST_SEL: LazyLock<Selector> = LazyLock::new(|| selector(POST_SELECTOR));
static POST_NAME_SEL: LazyLock<Selector> = LazyLock::new(|| selector(POST_NAME_SELECTOR));
static POST_LINK_SEL: LazyLock<Selector> = LazyLock::new(|| selector(POST_LINK_SELECTOR));

/// Extract the sitemap tree from the navigation document's markup.
///
/// Categories become top-level [`Section`]s, subcategories nested sections,
/// posts [`Page`] leaves. Order follows document order throughout.
///
/// # Errors
///
/// [`ScrapeError::MissingElement`] as soon as any expected element is absent;
/// extraction is all-or-nothing, never best-effort.
pub fn extract_sitemap(html: &str) -> Result<Sitemap, ScrapeError> {
    let document = Html::parse_document(html);

    let container = document
        .select(&SITEMAP_SEL)
        .next()
        .ok_or_else(|| ScrapeError::missing(SITEMAP_SELECTOR))?;

    let mut sitemap = Sitemap::new();

    for category in container.select(&CATEGORY_SEL) {
        let name = text_of(category, &CATEGORY_NAME_SEL, CATEGORY_NAME_SELECTOR)?;
        let mut children = Vec::new();

        for subcategory in category.select(&SUBCATEGORY_SEL) {
            let sub_name = text_of(subcategory, &SUBCATEGORY_NAME_SEL, SUBCATEGORY_NAME_SELECTOR)?;
            let mut posts = Vec::new();

            for post in subcategory.select(&POST_SEL) {
                let post_name = text_of(post, &POST_NAME_SEL, POST_NAME_SELECTOR)?;
                let link = post
                    .select(&POST_LINK_SEL)
                    .next()
                    .ok_or_else(|| ScrapeError::missing(POST_LINK_SELECTOR))?;
                let url = link
                    .value()
                    .attr("href")
                    .ok_or_else(|| ScrapeError::missing("a.js_open_post[href]"))?;

                posts.push(Page::node(post_name, url));
            }

            children.push(Section::node(sub_name, posts));
        }

        sitemap.push(Section::node(name, children));
    }

    tracing::debug!("extracted sitemap with {} top-level sections", sitemap.len());
    Ok(sitemap)
}

/// Trimmed text content of the first element matching `sel` under `scope`.
///
/// `context` is the selector's source text, used in the error.
fn text_of(scope: ElementRef<'_>, sel: &Selector, context: &str) -> Result<String, ScrapeError> {
    let element = scope
        .select(sel)
        .next()
        .ok_or_else(|| ScrapeError::missing(context))?;
    Ok(element.text().collect::<String>().trim().to_owned())
}
