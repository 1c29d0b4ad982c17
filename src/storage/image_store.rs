use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::config::CacheMode;
use crate::domain::{DownloadTarget, SiteId};
use crate::errors::PotdResult;

const IMAGE_EXTENSION: &str = "jpg";

/// The application-owned image folder. Downloaded files double as the
/// cache: a file for a (site, index) pair means there is nothing to fetch.
pub struct ImageStore {
    root: PathBuf,
    cache_mode: CacheMode,
    day: NaiveDate,
}

impl ImageStore {
    pub fn new(root: PathBuf, cache_mode: CacheMode) -> Self {
        Self::for_day(root, cache_mode, Local::now().date_naive())
    }

    pub fn for_day(root: PathBuf, cache_mode: CacheMode, day: NaiveDate) -> Self {
        Self {
            root,
            cache_mode,
            day,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding the images of the current cache period
    pub fn dir(&self) -> PathBuf {
        match self.cache_mode {
            CacheMode::Daily => self.root.join(self.day.format("%Y%m%d").to_string()),
            CacheMode::Latest => self.root.clone(),
        }
    }

    pub fn file_name(site: SiteId, index: u32) -> String {
        format!("{}-{}.{}", site.as_str(), index, IMAGE_EXTENSION)
    }

    /// Compute where `site`/`index` lives and whether it has to be fetched.
    /// Sites with a single daily image always use index 1.
    pub fn resolve(&self, site: SiteId, index: u32, force: bool) -> DownloadTarget {
        let index = if site.supports_index() { index.max(1) } else { 1 };
        let path = self.dir().join(Self::file_name(site, index));
        let exists = path.is_file();

        DownloadTarget {
            site,
            index,
            path,
            exists,
            force,
        }
    }

    /// Images saved for the current cache period, sorted by name
    pub fn images(&self) -> PotdResult<Vec<PathBuf>> {
        let dir = self.dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut images: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image(path))
            .collect();
        images.sort();

        Ok(images)
    }

    /// Delete every saved image, from every cache period. Returns the
    /// removed paths.
    pub fn clear(&self) -> PotdResult<Vec<PathBuf>> {
        let mut removed = Vec::new();
        if self.root.is_dir() {
            clear_dir(&self.root, true, &mut removed)?;
        }
        Ok(removed)
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION))
        .unwrap_or(false)
}

fn clear_dir(dir: &Path, is_root: bool, removed: &mut Vec<PathBuf>) -> PotdResult<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            // Only descend one level: the dated folders
            if is_root {
                clear_dir(&path, false, removed)?;
            }
        } else if is_image(&path) {
            log::debug!("Removing {}", path.display());
            fs::remove_file(&path)?;
            removed.push(path);
        }
    }

    if !is_root && fs::read_dir(dir)?.next().is_none() {
        fs::remove_dir(dir)?;
    }

    Ok(())
}
