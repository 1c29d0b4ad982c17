use crate::domain::SiteId;
use crate::errors::{PotdError, PotdResult};
use crate::extract;
use crate::http::HttpFetcher;
use crate::sources::traits::ImageSource;

const PAGE_URL: &str = "https://commons.wikimedia.org/wiki/Main_Page";
/// The picture of the day is the first image on the main page
const IMAGE: &str = "img";
const THUMB_SEGMENT: &str = "thumb/";

pub struct WikimediaSource;

impl WikimediaSource {
    pub fn new() -> Self {
        Self
    }

    /// Turn a thumbnail URL into the full-resolution original:
    /// `.../thumb/a/b/Foo.jpg/220px-Foo.jpg` becomes `.../a/b/Foo.jpg`.
    fn original_from_thumbnail(src: &str) -> PotdResult<String> {
        if !src.contains(THUMB_SEGMENT) {
            return Ok(src.to_string());
        }

        let original = src.replacen(THUMB_SEGMENT, "", 1);
        let pos = original.rfind('/').ok_or_else(|| {
            PotdError::parse(SiteId::WikimediaCommons, format!("unexpected thumbnail URL {}", src))
        })?;

        Ok(original[..pos].to_string())
    }

    fn extract(page: &[u8]) -> PotdResult<String> {
        let document = extract::parse_html(page);
        let src = extract::first_attr(SiteId::WikimediaCommons, &document, IMAGE, "src")?;
        let original = Self::original_from_thumbnail(&src)?;
        extract::resolve_url(PAGE_URL, &original)
    }
}

impl Default for WikimediaSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for WikimediaSource {
    fn site(&self) -> SiteId {
        SiteId::WikimediaCommons
    }

    fn resolve(&self, http: &dyn HttpFetcher, _index: u32) -> PotdResult<String> {
        let page = http.fetch(PAGE_URL)?;
        Self::extract(&page)
    }
}
