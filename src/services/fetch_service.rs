use crate::domain::{Outcome, RunSummary, SiteId};
use crate::http::HttpFetcher;
use crate::services::download::FileDownloader;
use crate::sources::SourceRegistry;
use crate::storage::ImageStore;

/// Upper bound on gallery items tried when scanning a multi-image site
pub const MAX_GALLERY_ITEMS: u32 = 19;

pub struct FetchService<H: HttpFetcher> {
    http: H,
    source_registry: SourceRegistry,
    store: ImageStore,
    downloader: FileDownloader,
}

impl<H: HttpFetcher> FetchService<H> {
    pub fn new(
        http: H,
        source_registry: SourceRegistry,
        store: ImageStore,
        downloader: FileDownloader,
    ) -> Self {
        Self {
            http,
            source_registry,
            store,
            downloader,
        }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    /// Fetch image `index` of `site` into its destination, unless it is
    /// already there and `force` is unset
    pub fn fetch_one(&self, site: SiteId, index: u32, force: bool) -> Outcome {
        let target = self.store.resolve(site, index, force);

        if !target.should_download() {
            log::info!(
                "{} wallpaper already downloaded: {}",
                site.display_name(),
                target.path.display()
            );
            return Outcome::Cached(target.path);
        }

        let url = match self.source_registry.resolve(&self.http, site, target.index) {
            Ok(url) => url,
            Err(e) if e.is_not_found() => return Outcome::NotFound(e),
            Err(e) => return Outcome::Failed(e),
        };

        match self.downloader.download(&self.http, &url, &target.path) {
            Ok(()) => Outcome::Saved(target.path),
            Err(e) => Outcome::Failed(e),
        }
    }

    /// Pick a site at random and fetch its image
    pub fn fetch_random(&self, index: u32, force: bool) -> (SiteId, Outcome) {
        let site = self.source_registry.pick_random();
        log::info!("Randomly picked {}", site.display_name());
        (site, self.fetch_one(site, index, force))
    }

    /// Fetch every site in turn, carrying on past failures. Multi-image
    /// sites are scanned from index 1 until they run out of images.
    pub fn fetch_all(&self, force: bool) -> RunSummary {
        let mut summary = RunSummary::default();

        for site in SiteId::ALL {
            if !site.supports_index() {
                let outcome = self.fetch_one(site, 1, force);
                log_outcome(site, 1, &outcome);
                summary.record(site, 1, outcome);
                continue;
            }

            for index in 1..=MAX_GALLERY_ITEMS {
                let outcome = self.fetch_one(site, index, force);
                log_outcome(site, index, &outcome);

                // The same pages back every index, so a failure repeats
                let stop = matches!(outcome, Outcome::NotFound(_) | Outcome::Failed(_));
                summary.record(site, index, outcome);
                if stop {
                    break;
                }
            }
        }

        summary
    }
}

fn log_outcome(site: SiteId, index: u32, outcome: &Outcome) {
    match outcome {
        Outcome::Saved(path) => log::info!("{} #{} saved to {}", site, index, path.display()),
        Outcome::Cached(_) => {}
        Outcome::NotFound(e) => log::info!("{} #{}: {}", site, index, e),
        Outcome::Failed(e) => log::error!("{} #{} failed: {}", site, index, e),
    }
}
