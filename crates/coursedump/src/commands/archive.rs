//! `archive` command: fetch the whole course and write one Markdown file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use url::Url;

use coursedump_config::{CliSettings, Config};
use coursedump_fetch::{Fetcher, Session};
use coursedump_scrape::{PageResolver, extract_sitemap, parse_title};
use coursedump_site::assemble;

use crate::error::CliError;
use crate::output::Output;

/// Path of the course's landing page, relative to the base URL.
const INDEX_PATH: &str = "index";

/// Path of the sitemap document, relative to the base URL.
const SITEMAP_PATH: &str = "0";

/// Arguments for the archive command.
#[derive(Args)]
pub(crate) struct ArchiveArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (overrides the configured one).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ArchiveArgs {
    /// Run the archive end to end.
    ///
    /// The document is assembled entirely in memory and written once at the
    /// very end, so a failed run never leaves a corrupt partial document;
    /// at worst the previous output file survives untouched. Fetched pages
    /// and media are cached on disk as they arrive, which is what a rerun
    /// resumes from.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let settings = CliSettings {
            output_dir: self.output,
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;

        let session = Session::new(&config.course.user_agent, &config.course.access_token);
        let fetcher = Fetcher::new(
            session,
            config.output.tmp_dir.clone(),
            config.output.dir.clone(),
        );
        let resolver = PageResolver::new(&fetcher);
        let base = Url::parse(&config.course.url)?;

        output.info("Fetching landing page...");
        let index_html = fetcher.fetch_text(base.join(INDEX_PATH)?.as_str())?;
        let title = parse_title(&index_html)?;
        let index_markdown = resolver.resolve(&index_html)?;

        output.info("Fetching sitemap...");
        let sitemap_html = fetcher.fetch_text(base.join(SITEMAP_PATH)?.as_str())?;
        let sitemap = extract_sitemap(&sitemap_html)?;
        tracing::info!("sitemap has {} top-level sections", sitemap.len());

        output.info("Resolving pages...");
        let document = assemble(&title, &index_markdown, &sitemap, &resolver)?;

        fs::create_dir_all(&config.output.dir)?;
        let path = config.output.dir.join(&config.output.filename);
        fs::write(&path, document)?;

        output.success(&format!("Wrote {}", path.display()));
        Ok(())
    }
}
