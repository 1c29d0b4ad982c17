use crate::domain::SiteId;
use crate::errors::{PotdError, PotdResult};
use crate::extract;
use crate::http::HttpFetcher;
use crate::sources::traits::ImageSource;

/// Astronomy Picture of the Day
const BASE_URL: &str = "http://apod.nasa.gov";
const IMAGE: &str = "img";

pub struct NasaSource;

impl NasaSource {
    pub fn new() -> Self {
        Self
    }

    fn extract(page: &[u8]) -> PotdResult<String> {
        let document = extract::parse_html(page);
        let image = extract::first(SiteId::Nasa, document.root_element(), IMAGE)?
            // Video days embed a player instead of an image
            .ok_or_else(|| PotdError::not_found(SiteId::Nasa, "today's APOD has no image"))?;

        let src = extract::attr_of(SiteId::Nasa, image, "src")?;
        extract::resolve_url(BASE_URL, &src)
    }
}

impl Default for NasaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for NasaSource {
    fn site(&self) -> SiteId {
        SiteId::Nasa
    }

    fn resolve(&self, http: &dyn HttpFetcher, _index: u32) -> PotdResult<String> {
        let page = http.fetch(BASE_URL)?;
        Self::extract(&page)
    }
}
