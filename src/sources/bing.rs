use serde::Deserialize;

use crate::domain::SiteId;
use crate::errors::{PotdError, PotdResult};
use crate::http::HttpFetcher;
use crate::sources::traits::ImageSource;

const ARCHIVE_URL: &str = "https://www.bing.com/HPImageArchive.aspx?format=js&idx=0&n=1&mkt=en-GB";
const ORIGIN: &str = "https://www.bing.com";

/// Response of the homepage image archive endpoint
#[derive(Deserialize, Debug)]
struct ArchiveResponse {
    images: Vec<ArchiveImage>,
}

#[derive(Deserialize, Debug)]
struct ArchiveImage {
    /// Path relative to the Bing origin
    url: String,
}

pub struct BingSource;

impl BingSource {
    pub fn new() -> Self {
        Self
    }

    fn extract(body: &[u8]) -> PotdResult<String> {
        let archive: ArchiveResponse = serde_json::from_slice(body)
            .map_err(|e| PotdError::parse(SiteId::Bing, format!("archive JSON: {}", e)))?;

        let image = archive
            .images
            .first()
            .ok_or_else(|| PotdError::not_found(SiteId::Bing, "archive returned no images"))?;

        Ok(format!("{}{}", ORIGIN, image.url))
    }
}

impl Default for BingSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for BingSource {
    fn site(&self) -> SiteId {
        SiteId::Bing
    }

    fn resolve(&self, http: &dyn HttpFetcher, _index: u32) -> PotdResult<String> {
        let body = http.fetch(ARCHIVE_URL)?;
        Self::extract(&body)
    }
}
