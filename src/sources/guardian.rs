use crate::domain::SiteId;
use crate::errors::{PotdError, PotdResult};
use crate::extract;
use crate::http::HttpFetcher;
use crate::sources::traits::ImageSource;

const FRONT_PAGE_URL: &str = "https://www.theguardian.com/international";
/// Link of the "best photographs of the day" card on the front page
const GALLERY_CARD_LINK: &str = "div.fc-item--gallery div.fc-item__container a";
/// Path from a gallery list item down to the responsive image sources
const PICTURE_SOURCE: &str = "figure a.gallery__img-container div.u-responsive-ratio picture source";

/// The Guardian's daily photo gallery. Each gallery item is one image, so
/// `index` selects an item and runs past the end with `NotFound`.
pub struct GuardianSource;

impl GuardianSource {
    pub fn new() -> Self {
        Self
    }

    fn gallery_item(index: u32) -> String {
        format!("li#img-{}", index)
    }

    fn extract_gallery_url(front_page: &[u8]) -> PotdResult<String> {
        let document = extract::parse_html(front_page);
        let href = extract::first_attr(SiteId::TheGuardian, &document, GALLERY_CARD_LINK, "href")?;
        extract::resolve_url(FRONT_PAGE_URL, &href)
    }

    fn extract_picture(gallery_url: &str, gallery: &[u8], index: u32) -> PotdResult<String> {
        let site = SiteId::TheGuardian;
        let document = extract::parse_html(gallery);

        let item = extract::first(site, document.root_element(), &Self::gallery_item(index))?
            .ok_or_else(|| PotdError::not_found(site, format!("gallery has no picture #{}", index)))?;

        let source = extract::first(site, item, PICTURE_SOURCE)?.ok_or_else(|| {
            PotdError::parse(site, format!("picture #{} has no <picture> source", index))
        })?;

        let srcset = extract::attr_of(site, source, "srcset")?;
        let url = extract::first_srcset_url(&srcset)
            .ok_or_else(|| PotdError::parse(site, format!("picture #{} has an empty srcset", index)))?;

        extract::resolve_url(gallery_url, url)
    }
}

impl Default for GuardianSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for GuardianSource {
    fn site(&self) -> SiteId {
        SiteId::TheGuardian
    }

    fn resolve(&self, http: &dyn HttpFetcher, index: u32) -> PotdResult<String> {
        let front_page = http.fetch(FRONT_PAGE_URL)?;
        let gallery_url = Self::extract_gallery_url(&front_page)?;
        log::debug!("Guardian gallery: {}", gallery_url);

        let gallery = http.fetch(&gallery_url)?;
        Self::extract_picture(&gallery_url, &gallery, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpFetcher;

    const GALLERY_URL: &str =
        "https://www.theguardian.com/news/gallery/2024/may/01/photos-of-the-day";

    const SAMPLE_FRONT_PAGE: &[u8] = br#"<html><body>
<section id="headlines">
  <div class="fc-item fc-item--standard">
    <div class="fc-item__container"><a href="/world/2024/may/01/story">Story</a></div>
  </div>
  <div class="fc-item fc-item--gallery">
    <div class="fc-item__container">
      <a href="/news/gallery/2024/may/01/photos-of-the-day">The day in pictures</a>
    </div>
  </div>
</section>
</body></html>"#;

    fn gallery_item(n: u32) -> String {
        format!(
            r##"<li id="img-{n}" class="gallery__item">
  <figure class="gallery__figure">
    <a class="gallery__img-container" href="#img-{n}">
      <div class="u-responsive-ratio">
        <picture>
          <source media="(min-width: 1300px)" srcset="https://i.guim.co.uk/img/media/{n}/master/1900.jpg?width=1900 1900w, https://i.guim.co.uk/img/media/{n}/master/1300.jpg?width=1300 1300w">
          <source media="(min-width: 980px)" srcset="https://i.guim.co.uk/img/media/{n}/master/980.jpg 980w">
          <img class="gallery__img" src="https://i.guim.co.uk/img/media/{n}/master/500.jpg">
        </picture>
      </div>
    </a>
  </figure>
</li>"##
        )
    }

    fn sample_gallery(items: u32) -> Vec<u8> {
        let body: String = (1..=items).map(gallery_item).collect();
        format!(r#"<html><body><ul class="gallery">{}</ul></body></html>"#, body).into_bytes()
    }

    fn mock_site(items: u32) -> MockHttpFetcher {
        let gallery = sample_gallery(items);
        let mut http = MockHttpFetcher::new();
        http.expect_fetch()
            .withf(|url| url == FRONT_PAGE_URL)
            .returning(|_| Ok(SAMPLE_FRONT_PAGE.to_vec()));
        http.expect_fetch()
            .withf(|url| url == GALLERY_URL)
            .returning(move |_| Ok(gallery.clone()));
        http
    }

    #[test]
    fn test_front_page_links_to_gallery() {
        let url = GuardianSource::extract_gallery_url(SAMPLE_FRONT_PAGE).unwrap();
        assert_eq!(url, GALLERY_URL);
    }

    #[test]
    fn test_resolve_first_picture() {
        let http = mock_site(3);
        let url = GuardianSource::new().resolve(&http, 1).unwrap();
        assert_eq!(url, "https://i.guim.co.uk/img/media/1/master/1900.jpg?width=1900");
    }

    #[test]
    fn test_resolve_by_index() {
        let http = mock_site(3);
        let url = GuardianSource::new().resolve(&http, 3).unwrap();
        assert_eq!(url, "https://i.guim.co.uk/img/media/3/master/1900.jpg?width=1900");
    }

    #[test]
    fn test_index_past_end_is_not_found() {
        let http = mock_site(3);
        let err = GuardianSource::new().resolve(&http, 4).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_scan_stops_at_end_of_gallery() {
        let http = mock_site(5);
        let source = GuardianSource::new();

        let mut found = Vec::new();
        for n in 1.. {
            match source.resolve(&http, n) {
                Ok(url) => found.push(url),
                Err(e) if e.is_not_found() => break,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(found.len(), 5);
    }

    #[test]
    fn test_missing_gallery_card_is_parse_error() {
        let err = GuardianSource::extract_gallery_url(b"<html><body></body></html>").unwrap_err();
        assert!(matches!(err, PotdError::Parse { site: SiteId::TheGuardian, .. }));
    }

    #[test]
    fn test_item_without_picture_is_parse_error() {
        let gallery = br#"<html><body><ul><li id="img-1"><figure><p>caption</p></figure></li></ul></body></html>"#;
        let err = GuardianSource::extract_picture(GALLERY_URL, gallery, 1).unwrap_err();
        assert!(matches!(err, PotdError::Parse { .. }));
    }
}
