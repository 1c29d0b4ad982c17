use crate::domain::SiteId;
use crate::errors::{PotdError, PotdResult};
use crate::http::HttpFetcher;
use crate::sources::traits::ImageSource;
use crate::sources::{
    bing::BingSource, guardian::GuardianSource, nasa::NasaSource,
    national_geographic::NationalGeographicSource, random, smithsonian::SmithsonianSource,
    thirty_five_photo::ThirtyFivePhotoSource, wikimedia::WikimediaSource,
};

pub struct SourceRegistry {
    sources: Vec<Box<dyn ImageSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            sources: Vec::new(),
        };

        registry.register(Box::new(NationalGeographicSource::new()));
        registry.register(Box::new(BingSource::new()));
        registry.register(Box::new(WikimediaSource::new()));
        registry.register(Box::new(GuardianSource::new()));
        registry.register(Box::new(NasaSource::new()));
        registry.register(Box::new(SmithsonianSource::new()));
        registry.register(Box::new(ThirtyFivePhotoSource::new()));

        registry
    }

    /// Add a source, replacing any already registered for the same site
    pub fn register(&mut self, source: Box<dyn ImageSource>) {
        self.sources.retain(|s| s.site() != source.site());
        self.sources.push(source);
    }

    pub fn find_source(&self, site: SiteId) -> Option<&dyn ImageSource> {
        self.sources
            .iter()
            .find(|s| s.site() == site)
            .map(|s| s.as_ref())
    }

    /// Resolve the image URL for `site` using its registered adapter
    pub fn resolve(&self, http: &dyn HttpFetcher, site: SiteId, index: u32) -> PotdResult<String> {
        let source = self
            .find_source(site)
            .ok_or_else(|| PotdError::InvalidInput(format!("No source registered for {}", site)))?;

        log::info!("Looking up {} photo of the day", site.display_name());
        source.resolve(http, index)
    }

    /// Pick one of the random-eligible sites
    pub fn pick_random(&self) -> SiteId {
        random::pick(&mut rand::thread_rng())
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
