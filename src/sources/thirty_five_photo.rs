use crate::domain::SiteId;
use crate::errors::{PotdError, PotdResult};
use crate::extract;
use crate::http::HttpFetcher;
use crate::sources::traits::ImageSource;

const RANKING_URL: &str = "https://35photo.pro/rating/photo_day/";
const DETAIL_LINK_PATTERN: &str = r"(https://35photo\.pro/photo_\d+/)";
const GENRE_PATTERN: &str = r"/genre_(\d+)/";
const MAIN_IMAGE_PATTERN: &str = r"photos_main/(\d+/\d+\.jpg)";
const PHOTOS_MAIN_URL: &str = "https://m1.35photo.pro/photos_main";

/// Genres treated as general photography. Nude, glamour and other adult
/// categories are absent, so a photo of the day in those genres is skipped.
const PHOTOGRAPHIC_GENRES: &[u32] = &[
    97, 98, 99, 100, 101, 102, 104, 105, 106, 107, 108, 109, 110, 111, 112, 113, 114, 115, 116,
    117, 118, 119, 120,
];

pub struct ThirtyFivePhotoSource;

impl ThirtyFivePhotoSource {
    pub fn new() -> Self {
        Self
    }

    fn extract_detail_url(ranking: &str) -> PotdResult<String> {
        extract::capture(SiteId::ThirtyFivePhoto, DETAIL_LINK_PATTERN, ranking)
    }

    fn extract_genre(detail: &str) -> PotdResult<u32> {
        let genre = extract::capture(SiteId::ThirtyFivePhoto, GENRE_PATTERN, detail)?;
        genre.parse().map_err(|_| {
            PotdError::parse(SiteId::ThirtyFivePhoto, format!("genre id {:?} is not a number", genre))
        })
    }

    fn is_photographic(genre: u32) -> bool {
        PHOTOGRAPHIC_GENRES.contains(&genre)
    }

    fn extract_image(detail: &str) -> PotdResult<String> {
        let path = extract::capture(SiteId::ThirtyFivePhoto, MAIN_IMAGE_PATTERN, detail)?;
        Ok(format!("{}/{}", PHOTOS_MAIN_URL, path))
    }
}

impl Default for ThirtyFivePhotoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource for ThirtyFivePhotoSource {
    fn site(&self) -> SiteId {
        SiteId::ThirtyFivePhoto
    }

    fn resolve(&self, http: &dyn HttpFetcher, _index: u32) -> PotdResult<String> {
        let ranking = http.fetch(RANKING_URL)?;
        let detail_url = Self::extract_detail_url(&String::from_utf8_lossy(&ranking))?;

        let detail = http.fetch(&detail_url)?;
        let detail = String::from_utf8_lossy(&detail);

        let genre = Self::extract_genre(&detail)?;
        if !Self::is_photographic(genre) {
            return Err(PotdError::not_found(
                SiteId::ThirtyFivePhoto,
                format!("photo of the day is in excluded genre {}", genre),
            ));
        }

        Self::extract_image(&detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpFetcher;

    const DETAIL_URL: &str = "https://35photo.pro/photo_4820761/";

    const SAMPLE_RANKING: &[u8] = br#"<html><body>
<div class="rating_list">
  <div class="item"><a href="https://35photo.pro/photo_4820761/"><img src="https://m1.35photo.pro/photos_col/r2/1205/4820761_500.jpg"></a></div>
  <div class="item"><a href="https://35photo.pro/photo_4820550/"><img src="https://m1.35photo.pro/photos_col/r2/1205/4820550_500.jpg"></a></div>
</div>
</body></html>"#;

    fn detail_page(genre: u32) -> Vec<u8> {
        format!(
            r#"<html><body>
<div class="photo_info">
  <a href="https://35photo.pro/genre_{genre}/">Genre</a>
</div>
<img class="mainPhoto" src="https://m1.35photo.pro/photos_main/1205/4820761.jpg">
</body></html>"#
        )
        .into_bytes()
    }

    fn mock_site(genre: u32) -> MockHttpFetcher {
        let mut http = MockHttpFetcher::new();
        http.expect_fetch()
            .withf(|url| url == RANKING_URL)
            .times(1)
            .returning(|_| Ok(SAMPLE_RANKING.to_vec()));
        http.expect_fetch()
            .withf(|url| url == DETAIL_URL)
            .times(1)
            .returning(move |_| Ok(detail_page(genre)));
        http
    }

    #[test]
    fn test_resolve_allowed_genre() {
        let http = mock_site(97);
        let url = ThirtyFivePhotoSource::new().resolve(&http, 1).unwrap();
        assert_eq!(url, "https://m1.35photo.pro/photos_main/1205/4820761.jpg");
    }

    #[test]
    fn test_excluded_genre_is_not_found() {
        let excluded = 103;
        assert!(!ThirtyFivePhotoSource::is_photographic(excluded));

        let http = mock_site(excluded);
        let err = ThirtyFivePhotoSource::new().resolve(&http, 1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_detail_url_is_first_ranked_photo() {
        let ranking = String::from_utf8_lossy(SAMPLE_RANKING);
        let url = ThirtyFivePhotoSource::extract_detail_url(&ranking).unwrap();
        assert_eq!(url, DETAIL_URL);
    }

    #[test]
    fn test_missing_genre_is_parse_error() {
        let err = ThirtyFivePhotoSource::extract_genre("<html></html>").unwrap_err();
        assert!(matches!(err, PotdError::Parse { site: SiteId::ThirtyFivePhoto, .. }));
    }
}
