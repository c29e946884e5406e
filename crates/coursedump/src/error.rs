//! CLI error types.

use coursedump_config::ConfigError;
use coursedump_fetch::FetchError;
use coursedump_scrape::{PageError, ScrapeError};
use coursedump_site::AssembleError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Scrape(#[from] ScrapeError),

    #[error("{0}")]
    Page(#[from] PageError),

    #[error("{0}")]
    Assemble(#[from] AssembleError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid course URL: {0}")]
    Url(#[from] url::ParseError),
}
