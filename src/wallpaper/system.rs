use std::path::Path;

use crate::errors::{PotdError, PotdResult};
use crate::wallpaper::{absolute, DisplayMode, WallpaperSetter};

/// Windows and macOS, through the platform API wrapped by the `wallpaper` crate
pub struct SystemSetter;

impl SystemSetter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemSetter {
    fn default() -> Self {
        Self::new()
    }
}

impl WallpaperSetter for SystemSetter {
    fn name(&self) -> &'static str {
        "system"
    }

    fn apply(&self, path: &Path, mode: DisplayMode) -> PotdResult<()> {
        let path = absolute(path)?;
        let path_str = path
            .to_str()
            .ok_or_else(|| PotdError::Wallpaper(format!("path is not UTF-8: {}", path.display())))?;

        wallpaper::set_from_path(path_str).map_err(|e| PotdError::Wallpaper(e.to_string()))?;

        if let Some(mode) = system_mode(mode) {
            // Not every platform supports every mode; the image is already set
            if let Err(e) = wallpaper::set_mode(mode) {
                log::warn!("Could not set display mode: {}", e);
            }
        }

        log::info!("Wallpaper set to {}", path.display());
        Ok(())
    }
}

fn system_mode(mode: DisplayMode) -> Option<wallpaper::Mode> {
    match mode {
        DisplayMode::None => None,
        DisplayMode::Wallpaper => Some(wallpaper::Mode::Tile),
        DisplayMode::Centered => Some(wallpaper::Mode::Center),
        DisplayMode::Scaled => Some(wallpaper::Mode::Fit),
        DisplayMode::Stretched => Some(wallpaper::Mode::Stretch),
        DisplayMode::Zoom => Some(wallpaper::Mode::Crop),
        DisplayMode::Spanned => Some(wallpaper::Mode::Span),
    }
}
