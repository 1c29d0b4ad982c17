use crate::domain::SiteId;
use crate::errors::PotdResult;
use crate::extract;
use crate::http::HttpFetcher;
use crate::sources::traits::ImageSource;

const PAGE_URL: &str = "https://www.nationalgeographic.com/photography/photo-of-the-day/";
const IMAGE_META: &str = r#"meta[property="og:image"]"#;

/// Reads the Open Graph image of the photo-of-the-day page.
pub struct NationalGeographicSource;

impl NationalGeographicSource {
    pub fn new() -> Self {
        Self
    }

    fn extract(page: &[u8]) -> PotdResult<String> {
        let document = extract::parse_html(page);
        let image = extract::first_attr(SiteId::NationalGeographic, &document, IMAGE_META, "content")?;
        extract::resolve_url(PAGE_URL, &image)
    }
}

impl Default for NationalGeographicSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for NationalGeographicSource {
    fn site(&self) -> SiteId {
        SiteId::NationalGeographic
    }

    fn resolve(&self, http: &dyn HttpFetcher, _index: u32) -> PotdResult<String> {
        let page = http.fetch(PAGE_URL)?;
        Self::extract(&page)
    }
}
