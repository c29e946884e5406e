//! Video metadata extraction from the viewer document.
//!
//! The viewer page defines the video's name and source only as executed
//! script state, never as markup attributes, so it cannot be resolved with a
//! DOM query. Instead, a micro-parser matches `key: "value"` pairs in the raw
//! text. The accepted grammar is deliberately narrow: unquoted keys, string
//! values in double or single quotes with backslash escapes, and pairs in a
//! fixed left-to-right order. That is coupled to the platform's serializer,
//! a known, accepted brittleness for this trusted source; do not widen it
//! into a general script parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::ScrapeError;
use crate::literal::decode_string_literal;

/// A quoted string literal, double or single, with backslash escapes.
const QUOTED: &str = r#"((?:"(?:[^"\\]|\\.)*")|(?:'(?:[^'\\]|\\.)*'))"#;
const COLON: &str = r"\s*:\s*";
const COMMA: &str = r"\s*,\s*";

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| string_property_pattern("name"));
static SOURCE_RE: LazyLock<Regex> =
    LazyLock::new(|| string_properties_pattern(&["src", "type"]));

/// Name and direct media URL of one embedded video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoDescriptor {
    /// Display name, used as the placeholder's alt text.
    pub name: String,
    /// Direct media URL to download.
    pub url: String,
}

/// Pattern matching a single string property, e.g. `name: "value"`.
fn string_property_pattern(key: &str) -> Regex {
    Regex::new(&format!("{key}{COLON}{QUOTED}")).expect("hand-written pattern")
}

/// Pattern matching several string properties in strict order.
///
/// A pattern for keys `(a, b)` only matches when `a`'s assignment textually
/// precedes `b`'s, separated by a comma.
fn string_properties_pattern(keys: &[&str]) -> Regex {
    let pattern = keys
        .iter()
        .map(|key| format!("{key}{COLON}{QUOTED}"))
        .collect::<Vec<_>>()
        .join(COMMA);
    Regex::new(&pattern).expect("hand-written pattern")
}

/// Scrape a [`VideoDescriptor`] out of a viewer document.
///
/// Takes the first match of each pattern: `name: "..."` for the display
/// name, `src: "...", type: "..."` for the media URL.
///
/// # Errors
///
/// [`ScrapeError::PropertyNotFound`] when either pattern fails to match,
/// [`ScrapeError::BadStringLiteral`] when a matched value fails to decode.
pub fn resolve_video(html: &str) -> Result<VideoDescriptor, ScrapeError> {
    let name = first_capture(&NAME_RE, html, "name")?;
    let url = first_capture(&SOURCE_RE, html, "src")?;

    Ok(VideoDescriptor {
        name: decode_string_literal(name)?,
        url: decode_string_literal(url)?,
    })
}

/// First captured quoted literal of `re`, or a missing-property error.
fn first_capture<'a>(re: &Regex, html: &'a str, key: &str) -> Result<&'a str, ScrapeError> {
    re.captures(html)
        .and_then(|captures| captures.get(1))
        .map(|capture| capture.as_str())
        .ok_or_else(|| ScrapeError::PropertyNotFound {
            key: key.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const VIEWER: &str = r#"
        <html><body><script>
          var player = new Player({
            name: "Intro Video",
            autoplay: false,
            sources: [{ src: "https://cdn.example/video1.mp4", type: "video/mp4" }],
          });
        </script></body></html>
    "#;

    #[test]
    fn test_resolves_name_and_url() {
        let video = resolve_video(VIEWER).unwrap();

        assert_eq!(
            video,
            VideoDescriptor {
                name: "Intro Video".to_owned(),
                url: "https://cdn.example/video1.mp4".to_owned(),
            }
        );
    }

    #[test]
    fn test_single_quoted_values() {
        let html = "name: 'My Clip', src: 'https://cdn.example/a.mp4', type: 'video/mp4'";

        let video = resolve_video(html).unwrap();

        assert_eq!(video.name, "My Clip");
        assert_eq!(video.url, "https://cdn.example/a.mp4");
    }

    #[test]
    fn test_escapes_in_values_are_decoded() {
        let html = r#"name: "It’s \"Live\"", src: "https://cdn.example/b.mp4", type: "video/mp4""#;

        let video = resolve_video(html).unwrap();

        assert_eq!(video.name, "It\u{2019}s \"Live\"");
    }

    #[test]
    fn test_missing_name_fails() {
        let html = r#"src: "https://cdn.example/a.mp4", type: "video/mp4""#;

        let err = resolve_video(html).unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::PropertyNotFound { key } if key == "name"
        ));
    }

    #[test]
    fn test_missing_source_fails() {
        let html = r#"name: "Orphan""#;

        let err = resolve_video(html).unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::PropertyNotFound { key } if key == "src"
        ));
    }

    #[test]
    fn test_key_order_is_significant() {
        // type before src never matches the (src, type) pattern
        let html = r#"name: "Swapped", type: "video/mp4", src: "https://cdn.example/c.mp4""#;

        let err = resolve_video(html).unwrap_err();

        assert!(matches!(
            err,
            ScrapeError::PropertyNotFound { key } if key == "src"
        ));
    }

    #[test]
    fn test_takes_first_match_only() {
        let html = r#"
            name: "First", src: "https://cdn.example/first.mp4", type: "video/mp4"
            name: "Second", src: "https://cdn.example/second.mp4", type: "video/mp4"
        "#;

        let video = resolve_video(html).unwrap();

        assert_eq!(video.name, "First");
        assert_eq!(video.url, "https://cdn.example/first.mp4");
    }

    #[test]
    fn test_newline_between_properties_is_accepted() {
        let html = "src: \"https://cdn.example/d.mp4\",\n      type: \"video/mp4\"\nname: \"NL\"";

        let video = resolve_video(html).unwrap();

        assert_eq!(video.url, "https://cdn.example/d.mp4");
    }
}
