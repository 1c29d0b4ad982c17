use std::path::PathBuf;
use std::thread::sleep;
use std::time::Duration;

use crate::wallpaper::{DisplayMode, WallpaperSetter};

/// Apply each image in turn, sleeping `period` after each one. Runs forever
/// when `cycles` is `None`, unless there is nothing to show. A setter
/// failure is logged and the next image is tried.
pub fn rotate<S>(
    setter: &S,
    images: &[PathBuf],
    mode: DisplayMode,
    period: Duration,
    cycles: Option<usize>,
) where
    S: WallpaperSetter + ?Sized,
{
    if images.is_empty() {
        log::warn!("No images to rotate");
        return;
    }

    let mut done = 0;

    while cycles.map(|limit| done < limit).unwrap_or(true) {
        log::debug!("Starting wallpaper cycle over {} images", images.len());

        for image in images {
            if let Err(e) = setter.apply(image, mode) {
                log::error!("{}: {}", setter.name(), e);
            }
            log::info!("Sleeping for {} seconds...", period.as_secs());
            sleep(period);
        }

        done += 1;
    }
}
