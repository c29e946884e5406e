//! Sitemap tree model and Markdown document assembly.
//!
//! A course's navigational structure is an ordered tree of [`SitemapNode`]s:
//! [`Section`]s contain children, [`Page`]s are leaves with a source URL.
//! Document order in the tree is semantically meaningful: it is the exact
//! order of the assembled output.
//!
//! [`assemble`] walks the tree depth-first and concatenates resolved pages
//! into a single Markdown document. Page resolution is abstracted behind the
//! [`PageSource`] trait so assembly can be tested without network access.

mod assemble;
mod tree;

pub use assemble::{AssembleError, MAX_HEADER_LEVEL, PageSource, assemble};
pub use tree::{Page, Section, Sitemap, SitemapNode};
