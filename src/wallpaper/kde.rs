use std::path::Path;
use std::process::Command;

use crate::errors::PotdResult;
use crate::wallpaper::{absolute, run, DisplayMode, WallpaperSetter};

/// KDE Plasma, by evaluating a desktop script in plasmashell over D-Bus
pub struct KdeSetter;

impl KdeSetter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KdeSetter {
    fn default() -> Self {
        Self::new()
    }
}

impl WallpaperSetter for KdeSetter {
    fn name(&self) -> &'static str {
        "kde"
    }

    fn apply(&self, path: &Path, mode: DisplayMode) -> PotdResult<()> {
        let path = absolute(path)?;
        let script = plasma_script(&path, mode);

        run(Command::new("qdbus").args([
            "org.kde.plasmashell",
            "/PlasmaShell",
            "org.kde.PlasmaShell.evaluateScript",
            script.as_str(),
        ]))?;

        log::info!("Wallpaper set to {}", path.display());
        Ok(())
    }
}

/// Plasma image wallpaper FillMode for a display mode
fn fill_mode(mode: DisplayMode) -> u8 {
    match mode {
        DisplayMode::Stretched => 0,
        DisplayMode::Scaled | DisplayMode::None => 1,
        DisplayMode::Zoom | DisplayMode::Spanned => 2,
        DisplayMode::Wallpaper => 3,
        DisplayMode::Centered => 6,
    }
}

fn plasma_script(path: &Path, mode: DisplayMode) -> String {
    let uri = format!("file://{}", path.display()).replace('"', "\\\"");
    format!(
        r#"var allDesktops = desktops();
for (var i = 0; i < allDesktops.length; i++) {{
    var d = allDesktops[i];
    d.wallpaperPlugin = "org.kde.image";
    d.currentConfigGroup = Array("Wallpaper", "org.kde.image", "General");
    d.writeConfig("Image", "{}");
    d.writeConfig("FillMode", {});
}}"#,
        uri,
        fill_mode(mode)
    )
}
