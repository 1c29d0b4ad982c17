use std::path::Path;
use std::process::Command;

use crate::errors::PotdResult;
use crate::wallpaper::{absolute, run, DisplayMode, WallpaperSetter};

const SCHEMA: &str = "org.gnome.desktop.background";

/// GNOME and Unity, through `gsettings`
pub struct GnomeSetter;

impl GnomeSetter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GnomeSetter {
    fn default() -> Self {
        Self::new()
    }
}

impl WallpaperSetter for GnomeSetter {
    fn name(&self) -> &'static str {
        "gnome"
    }

    fn apply(&self, path: &Path, mode: DisplayMode) -> PotdResult<()> {
        let path = absolute(path)?;

        for args in gsettings_calls(&path, mode) {
            run(Command::new("gsettings").args(&args))?;
        }

        log::info!("Wallpaper set to {} ({})", path.display(), mode.as_str());
        Ok(())
    }
}

fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// `gsettings set` invocations for one wallpaper change. Newer GNOME reads
/// a separate key in dark mode, so both URIs are written.
fn gsettings_calls(path: &Path, mode: DisplayMode) -> Vec<Vec<String>> {
    let uri = file_uri(path);
    let set = |key: &str, value: &str| {
        vec![
            "set".to_string(),
            SCHEMA.to_string(),
            key.to_string(),
            value.to_string(),
        ]
    };

    vec![
        set("picture-uri", &uri),
        set("picture-uri-dark", &uri),
        set("picture-options", mode.as_str()),
    ]
}
