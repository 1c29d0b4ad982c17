use std::path::PathBuf;

use crate::domain::SiteId;
use crate::errors::PotdError;

/// Where one site/index pair is stored locally, and whether to fetch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub site: SiteId,
    pub index: u32,
    pub path: PathBuf,
    pub exists: bool,
    pub force: bool,
}

impl DownloadTarget {
    pub fn should_download(&self) -> bool {
        !self.exists || self.force
    }
}

/// Result of running one adapter against one destination.
#[derive(Debug)]
pub enum Outcome {
    Saved(PathBuf),
    /// The file was already present and no download was forced
    Cached(PathBuf),
    NotFound(PotdError),
    Failed(PotdError),
}

/// Tally of a multi-site run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub saved: Vec<PathBuf>,
    pub cached: Vec<PathBuf>,
    pub not_found: Vec<(SiteId, u32)>,
    pub failed: Vec<(SiteId, u32, String)>,
}

impl RunSummary {
    pub fn record(&mut self, site: SiteId, index: u32, outcome: Outcome) {
        match outcome {
            Outcome::Saved(path) => self.saved.push(path),
            Outcome::Cached(path) => self.cached.push(path),
            Outcome::NotFound(_) => self.not_found.push((site, index)),
            Outcome::Failed(e) => self.failed.push((site, index, e.to_string())),
        }
    }

    /// Every image available on disk after the run
    pub fn images(&self) -> impl Iterator<Item = &PathBuf> {
        self.saved.iter().chain(self.cached.iter())
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
