use std::path::Path;
use std::process::Command;

use crate::errors::PotdResult;
use crate::wallpaper::{absolute, run, DisplayMode, WallpaperSetter};

const CHANNEL: &str = "xfce4-desktop";
const DEFAULT_MONITOR: &str = "/backdrop/screen0/monitor0/image-path";

/// Xfce, through `xfconf-query` on every monitor's workspace backdrop
pub struct XfceSetter;

impl XfceSetter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XfceSetter {
    fn default() -> Self {
        Self::new()
    }
}

impl WallpaperSetter for XfceSetter {
    fn name(&self) -> &'static str {
        "xfce4"
    }

    fn apply(&self, path: &Path, mode: DisplayMode) -> PotdResult<()> {
        let path = absolute(path)?;
        let image = path.to_string_lossy();

        let listing = run(Command::new("xfconf-query").args(["-c", CHANNEL, "-l"]))?;
        let properties = image_properties(&listing);

        for property in &properties {
            set_property(property, &image)?;
            let style = property.replace("last-image", "image-style");
            set_property(&style, &image_style(mode).to_string())?;
        }

        if properties.is_empty() {
            log::debug!("No last-image properties; using {}", DEFAULT_MONITOR);
            set_property(DEFAULT_MONITOR, &image)?;
        }

        log::info!("Wallpaper set to {}", path.display());
        Ok(())
    }
}

fn set_property(property: &str, value: &str) -> PotdResult<()> {
    run(Command::new("xfconf-query").args(["-c", CHANNEL, "-p", property, "-s", value]))?;
    Ok(())
}

/// Backdrop image properties from an `xfconf-query -l` listing
fn image_properties(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| line.ends_with("/last-image"))
        .map(String::from)
        .collect()
}

fn image_style(mode: DisplayMode) -> u8 {
    match mode {
        DisplayMode::None => 0,
        DisplayMode::Centered => 1,
        DisplayMode::Wallpaper => 2,
        DisplayMode::Stretched => 3,
        DisplayMode::Scaled => 4,
        DisplayMode::Zoom => 5,
        DisplayMode::Spanned => 6,
    }
}
