//! Sitemap tree types.
//!
//! The tree is built once per run from the parsed sitemap document and is
//! immutable afterwards. Branches are allowed to have uneven depth: one
//! category may nest two levels while another nests four. That shape comes
//! straight from the source markup and is deliberately not normalized.

/// Ordered sequence of top-level sitemap nodes.
///
/// Document order is output order.
pub type Sitemap = Vec<SitemapNode>;

/// A node in the sitemap tree.
///
/// The variant is resolved once at tree-construction time; there is no
/// "section if it happens to have children" ambiguity downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SitemapNode {
    /// Internal node with a name and ordered children.
    Section(Section),
    /// Leaf node with a name and a source URL.
    Page(Page),
}

impl SitemapNode {
    /// Display name of the node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Section(section) => &section.name,
            Self::Page(page) => &page.name,
        }
    }
}

/// Internal tree node: a named group of child nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// Display name.
    pub name: String,
    /// Ordered children.
    pub children: Vec<SitemapNode>,
}

impl Section {
    /// Create a section node.
    #[must_use]
    pub fn node(name: impl Into<String>, children: Vec<SitemapNode>) -> SitemapNode {
        SitemapNode::Section(Self {
            name: name.into(),
            children,
        })
    }
}

/// Leaf tree node: a content page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Display name.
    pub name: String,
    /// URL the page content is fetched from.
    pub url: String,
}

impl Page {
    /// Create a page node.
    #[must_use]
    pub fn node(name: impl Into<String>, url: impl Into<String>) -> SitemapNode {
        SitemapNode::Page(Self {
            name: name.into(),
            url: url.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_name() {
        let section = Section::node("Basics", vec![]);
        let page = Page::node("Intro", "https://example.com/intro");

        assert_eq!(section.name(), "Basics");
        assert_eq!(page.name(), "Intro");
    }

    #[test]
    fn test_uneven_depth_is_representable() {
        // One branch two levels deep, the other a bare page. Accepted shape.
        let sitemap: Sitemap = vec![
            Section::node(
                "Deep",
                vec![Section::node(
                    "Inner",
                    vec![Page::node("Leaf", "https://example.com/leaf")],
                )],
            ),
            Page::node("Shallow", "https://example.com/shallow"),
        ];

        assert_eq!(sitemap.len(), 2);
        assert_eq!(sitemap[0].name(), "Deep");
        assert_eq!(sitemap[1].name(), "Shallow");
    }
}
