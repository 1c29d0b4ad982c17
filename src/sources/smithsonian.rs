use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::SiteId;
use crate::errors::{PotdError, PotdResult};
use crate::extract;
use crate::http::HttpFetcher;
use crate::sources::traits::ImageSource;

const LISTING_URL: &str = "https://www.smithsonianmag.com/photocontest/photo-of-the-day/";
/// Thumbnails on the photo contest listing, each linking to a detail page
const THUMBNAIL_LINK: &str = "div.photo-contest-results a.photo-contest-thumbnail";
const DETAIL_IMAGE: &str = "div.photo-detail-wrapper div.photo-detail img";

/// Smithsonian photo contest. The listing shows many finalists, so one is
/// picked at random each time.
pub struct SmithsonianSource;

impl SmithsonianSource {
    pub fn new() -> Self {
        Self
    }

    fn extract_detail_links(listing: &[u8]) -> PotdResult<Vec<String>> {
        let document = extract::parse_html(listing);
        let links = extract::all_attrs(SiteId::Smithsonian, &document, THUMBNAIL_LINK, "href")?;

        if links.is_empty() {
            return Err(PotdError::parse(
                SiteId::Smithsonian,
                "no thumbnails on the listing page",
            ));
        }

        links
            .iter()
            .map(|href| extract::resolve_url(LISTING_URL, href))
            .collect()
    }

    fn pick<'a, R: Rng + ?Sized>(links: &'a [String], rng: &mut R) -> PotdResult<&'a String> {
        links
            .choose(rng)
            .ok_or_else(|| PotdError::parse(SiteId::Smithsonian, "no thumbnails to pick from"))
    }

    /// Resolve today's image, choosing the finalist with `rng`
    pub fn resolve_with<R: Rng + ?Sized>(
        &self,
        http: &dyn HttpFetcher,
        rng: &mut R,
    ) -> PotdResult<String> {
        let listing = http.fetch(LISTING_URL)?;
        let links = Self::extract_detail_links(&listing)?;
        let detail_url = Self::pick(&links, rng)?;
        log::debug!("Smithsonian: picked {} of {} photos", detail_url, links.len());

        let detail = http.fetch(detail_url)?;
        Self::extract_image(detail_url, &detail)
    }

    fn extract_image(detail_url: &str, detail: &[u8]) -> PotdResult<String> {
        let document = extract::parse_html(detail);
        let src = extract::first_attr(SiteId::Smithsonian, &document, DETAIL_IMAGE, "src")?;
        extract::resolve_url(detail_url, &src)
    }
}

impl Default for SmithsonianSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for SmithsonianSource {
    fn site(&self) -> SiteId {
        SiteId::Smithsonian
    }

    fn resolve(&self, http: &dyn HttpFetcher, _index: u32) -> PotdResult<String> {
        self.resolve_with(http, &mut rand::thread_rng())
    }
}
