use thiserror::Error;

use crate::domain::SiteId;

#[derive(Error, Debug)]
pub enum PotdError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Scraping errors
    #[error("{site}: page layout not recognised ({message})")]
    Parse { site: SiteId, message: String },

    #[error("{site}: no image found ({message})")]
    NotFound { site: SiteId, message: String },

    // Download errors
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    // Wallpaper errors
    #[error("Could not set wallpaper: {0}")]
    Wallpaper(String),

    #[error("Unsupported desktop environment: {0}")]
    UnsupportedDesktop(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // User input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PotdError {
    pub fn parse(site: SiteId, message: impl Into<String>) -> Self {
        PotdError::Parse {
            site,
            message: message.into(),
        }
    }

    pub fn not_found(site: SiteId, message: impl Into<String>) -> Self {
        PotdError::NotFound {
            site,
            message: message.into(),
        }
    }

    /// True when the site answered but has no image for the request.
    /// Paginated callers use this to stop scanning.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PotdError::NotFound { .. })
    }
}

pub type PotdResult<T> = Result<T, PotdError>;
