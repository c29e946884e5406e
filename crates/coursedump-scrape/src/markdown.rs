//! HTML→Markdown conversion configuration.
//!
//! The transform itself is an external collaborator ([`htmd`]); this module
//! only pins the output style: ATX headings, dash bullets, dash rule lines,
//! backtick-fenced code blocks. The converter is a pure function of its
//! input fragment.

use htmd::HtmlToMarkdown;
use htmd::options::{
    BulletListMarker, CodeBlockFence, CodeBlockStyle, HeadingStyle, HrStyle, Options,
};

/// Build the shared converter instance.
pub(crate) fn converter() -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style"])
        .options(Options {
            heading_style: HeadingStyle::Atx,
            hr_style: HrStyle::Dashes,
            bullet_list_marker: BulletListMarker::Dash,
            code_block_style: CodeBlockStyle::Fenced,
            code_block_fence: CodeBlockFence::Backticks,
            ..Options::default()
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_and_inline_mapping() {
        let md = converter()
            .convert("<div><h2>Title</h2><p>Some <strong>bold</strong> text.</p></div>")
            .unwrap();

        assert!(md.contains("## Title"));
        assert!(md.contains("**bold**"));
    }

    #[test]
    fn test_lists_use_dash_bullets() {
        let md = converter()
            .convert("<ul><li>one</li><li>two</li></ul>")
            .unwrap();

        assert!(md.contains("- one"));
        assert!(md.contains("- two"));
    }

    #[test]
    fn test_images_become_markdown_images() {
        let md = converter()
            .convert(r#"<img src="out/video/clip.mp4" alt="Intro Video">"#)
            .unwrap();

        assert!(md.contains("![Intro Video](out/video/clip.mp4)"));
    }

    #[test]
    fn test_scripts_are_dropped() {
        let md = converter()
            .convert("<div><script>var x = 1;</script><p>kept</p></div>")
            .unwrap();

        assert!(!md.contains("var x"));
        assert!(md.contains("kept"));
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let html = "<div><p>a</p><ul><li>b</li></ul></div>";

        assert_eq!(
            converter().convert(html).unwrap(),
            converter().convert(html).unwrap()
        );
    }
}
