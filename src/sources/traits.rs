use crate::domain::SiteId;
use crate::errors::PotdResult;
use crate::http::HttpFetcher;

pub trait ImageSource {
    /// Identifies this source
    fn site(&self) -> SiteId;

    /// Find the direct URL of today's image number `index` (1-based).
    ///
    /// A site that answered but has nothing at `index` returns
    /// `PotdError::NotFound`; markup that no longer matches returns
    /// `PotdError::Parse`.
    fn resolve(&self, http: &dyn HttpFetcher, index: u32) -> PotdResult<String>;
}
