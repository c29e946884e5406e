//! Depth-first traversal and Markdown document assembly.
//!
//! Walks the sitemap tree left-to-right, one node at a time, and appends each
//! node's output to a sequential [`DocumentWriter`]. A node at depth `d`
//! (root children are depth 1) gets a header of level `d + 1`; the synthetic
//! index page occupies level 1, so the tree is bounded to five levels below
//! the document title.
//!
//! The document is built entirely in memory and returned as one string; the
//! caller writes it out once at the very end, so no partial output file ever
//! exists on disk.

use crate::tree::{Page, SitemapNode};

/// Markdown caps header nesting at `######`.
pub const MAX_HEADER_LEVEL: usize = 6;

/// Resolves a [`Page`] to its Markdown body.
///
/// The live implementation fetches and converts the page's markup; tests
/// substitute an in-memory stub.
pub trait PageSource {
    /// Return the Markdown body for `page`.
    ///
    /// # Errors
    ///
    /// Any error aborts assembly of the whole document.
    fn page_markdown(&self, page: &Page) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Document assembly error.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// The tree would need a header deeper than `######`.
    #[error("sitemap requires header level {level}, but Markdown headers stop at 6")]
    DepthExceeded {
        /// Header level the traversal would have needed.
        level: usize,
    },
    /// A page failed to resolve. Aborts the whole run, by contract.
    #[error("failed to resolve page '{name}': {source}")]
    Page {
        /// Display name of the failing page.
        name: String,
        /// Underlying fetch/scrape/convert error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Sequential writer that accumulates the output document.
///
/// Owned by a single [`assemble`] call; never shared across traversals.
/// Top-level blocks (header level 2) are set off by a wide gap, nested blocks
/// by a single blank line, matching the layout of the archived document.
struct DocumentWriter {
    buf: String,
}

impl DocumentWriter {
    /// Start a document with the level-1 title and the index page body.
    fn new(title: &str, index_markdown: &str) -> Self {
        Self {
            buf: format!("# {title}\n\n{index_markdown}\n"),
        }
    }

    /// Separator preceding a block at `level`.
    fn begin_block(&mut self, level: usize) {
        self.buf.push_str(if level == 2 { "\n\n\n\n" } else { "\n\n" });
    }

    /// Header line of the given level.
    fn heading(&mut self, level: usize, text: &str) {
        for _ in 0..level {
            self.buf.push('#');
        }
        self.buf.push(' ');
        self.buf.push_str(text);
    }

    /// Page body, separated from its header by a blank line.
    fn body(&mut self, markdown: &str) {
        self.buf.push_str("\n\n");
        self.buf.push_str(markdown);
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Assemble the full course document.
///
/// Emits the index title and body first, then every tree node in document
/// order. Traversal is a single depth-first pass; the tree is finite and
/// never mutated, so termination is trivial.
///
/// # Errors
///
/// [`AssembleError::DepthExceeded`] if any branch nests past header level 6,
/// [`AssembleError::Page`] on the first page that fails to resolve.
pub fn assemble(
    title: &str,
    index_markdown: &str,
    sitemap: &[SitemapNode],
    pages: &impl PageSource,
) -> Result<String, AssembleError> {
    let mut writer = DocumentWriter::new(title, index_markdown);
    write_level(&mut writer, sitemap, 2, pages)?;
    Ok(writer.finish())
}

/// Write all nodes of one tree level at the given header level.
fn write_level(
    writer: &mut DocumentWriter,
    nodes: &[SitemapNode],
    level: usize,
    pages: &impl PageSource,
) -> Result<(), AssembleError> {
    // Checked on entry, so a section sitting at level 6 fails even when its
    // children sequence is empty. Fatal rather than silently truncated.
    if level > MAX_HEADER_LEVEL {
        return Err(AssembleError::DepthExceeded { level });
    }

    for node in nodes {
        match node {
            SitemapNode::Section(section) => {
                tracing::debug!("section '{}' at header level {level}", section.name);
                writer.begin_block(level);
                writer.heading(level, &section.name);
                write_level(writer, &section.children, level + 1, pages)?;
            }
            SitemapNode::Page(page) => {
                tracing::debug!("page '{}' at header level {level}", page.name);
                let markdown = pages.page_markdown(page).map_err(|source| AssembleError::Page {
                    name: page.name.clone(),
                    source,
                })?;
                writer.begin_block(level);
                writer.heading(level, &page.name);
                writer.body(&markdown);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::{Page, Section};

    /// Stub source that answers every page with "body of <name>".
    struct StubPages;

    impl PageSource for StubPages {
        fn page_markdown(
            &self,
            page: &Page,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Ok(format!("body of {}", page.name))
        }
    }

    /// Stub source that fails for every page.
    struct FailingPages;

    impl PageSource for FailingPages {
        fn page_markdown(
            &self,
            _page: &Page,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err("boom".into())
        }
    }

    fn nested(depth: usize) -> SitemapNode {
        // depth 1 is a bare page; each extra level wraps it in a section
        let mut node = Page::node("Leaf", "https://example.com/leaf");
        for i in 1..depth {
            node = Section::node(format!("S{i}"), vec![node]);
        }
        node
    }

    #[test]
    fn test_empty_sitemap_keeps_index_only() {
        let doc = assemble("Course", "Welcome.", &[], &StubPages).unwrap();

        assert_eq!(doc, "# Course\n\nWelcome.\n");
    }

    #[test]
    fn test_two_level_sitemap_layout() {
        let sitemap = vec![Section::node(
            "A",
            vec![Page::node("P1", "https://example.com/p1")],
        )];

        struct Hello;
        impl PageSource for Hello {
            fn page_markdown(
                &self,
                _page: &Page,
            ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
                Ok("Hello".into())
            }
        }

        let doc = assemble("Course", "Index body.", &sitemap, &Hello).unwrap();

        assert_eq!(
            doc,
            "# Course\n\nIndex body.\n\n\n\n\n## A\n\n### P1\n\nHello"
        );
    }

    #[test]
    fn test_header_level_equals_depth_plus_one() {
        let sitemap = vec![nested(5)];

        let doc = assemble("T", "i", &sitemap, &StubPages).unwrap();

        assert!(doc.contains("\n## S4"));
        assert!(doc.contains("\n### S3"));
        assert!(doc.contains("\n#### S2"));
        assert!(doc.contains("\n##### S1"));
        assert!(doc.contains("\n###### Leaf"));
        assert!(!doc.contains("#######"));
    }

    #[test]
    fn test_depth_six_fails() {
        let sitemap = vec![nested(6)];

        let err = assemble("T", "i", &sitemap, &StubPages).unwrap_err();

        assert!(matches!(err, AssembleError::DepthExceeded { level: 7 }));
    }

    #[test]
    fn test_empty_section_past_max_level_still_fails() {
        // A childless section at level 6 still recurses to level 7.
        let mut node = Section::node("Empty", vec![]);
        for i in 0..4 {
            node = Section::node(format!("W{i}"), vec![node]);
        }

        let err = assemble("T", "i", &[node], &StubPages).unwrap_err();

        assert!(matches!(err, AssembleError::DepthExceeded { level: 7 }));
    }

    #[test]
    fn test_output_follows_document_order() {
        let a = Section::node("Alpha", vec![Page::node("One", "u1")]);
        let b = Section::node("Beta", vec![Page::node("Two", "u2")]);

        let forward = assemble("T", "i", &[a.clone(), b.clone()], &StubPages).unwrap();
        let reversed = assemble("T", "i", &[b, a], &StubPages).unwrap();

        let pos = |doc: &str, needle: &str| doc.find(needle).unwrap();
        assert!(pos(&forward, "## Alpha") < pos(&forward, "## Beta"));
        assert!(pos(&reversed, "## Beta") < pos(&reversed, "## Alpha"));
    }

    #[test]
    fn test_page_failure_aborts_with_page_name() {
        let sitemap = vec![Section::node(
            "A",
            vec![Page::node("Broken", "https://example.com/broken")],
        )];

        let err = assemble("T", "i", &sitemap, &FailingPages).unwrap_err();

        match err {
            AssembleError::Page { name, .. } => assert_eq!(name, "Broken"),
            other => panic!("expected Page error, got {other:?}"),
        }
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let sitemap = vec![
            Section::node("A", vec![Page::node("P1", "u1"), Page::node("P2", "u2")]),
            Page::node("P3", "u3"),
        ];

        let first = assemble("T", "index", &sitemap, &StubPages).unwrap();
        let second = assemble("T", "index", &sitemap, &StubPages).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_uneven_branch_depth_is_accepted() {
        let sitemap = vec![
            Section::node(
                "Deep",
                vec![Section::node("Inner", vec![Page::node("Leaf", "u1")])],
            ),
            Page::node("Shallow", "u2"),
        ];

        let doc = assemble("T", "i", &sitemap, &StubPages).unwrap();

        assert!(doc.contains("\n## Deep"));
        assert!(doc.contains("\n### Inner"));
        assert!(doc.contains("\n#### Leaf"));
        assert!(doc.contains("\n## Shallow"));
    }
}
