pub mod desktop;
pub mod gnome;
pub mod kde;
pub mod system;
pub mod xfce;

use std::path::{Path, PathBuf};
use std::process::Command;

use clap::ValueEnum;

use crate::errors::{PotdError, PotdResult};

pub use desktop::Desktop;
pub use gnome::GnomeSetter;
pub use kde::KdeSetter;
pub use system::SystemSetter;
pub use xfce::XfceSetter;

/// How the image is fitted to the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayMode {
    None,
    Wallpaper,
    Centered,
    Scaled,
    Stretched,
    Zoom,
    Spanned,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::None => "none",
            DisplayMode::Wallpaper => "wallpaper",
            DisplayMode::Centered => "centered",
            DisplayMode::Scaled => "scaled",
            DisplayMode::Stretched => "stretched",
            DisplayMode::Zoom => "zoom",
            DisplayMode::Spanned => "spanned",
        }
    }
}

/// Applies an image file as the desktop background.
#[cfg_attr(test, mockall::automock)]
pub trait WallpaperSetter {
    fn name(&self) -> &'static str;

    /// `path` must point to a complete image file
    fn apply(&self, path: &Path, mode: DisplayMode) -> PotdResult<()>;
}

/// Pick the setter for the detected desktop environment
pub fn setter_for(desktop: Desktop) -> PotdResult<Box<dyn WallpaperSetter>> {
    match desktop {
        Desktop::Gnome | Desktop::Unity => Ok(Box::new(GnomeSetter::new())),
        Desktop::Kde => Ok(Box::new(KdeSetter::new())),
        Desktop::Xfce4 => Ok(Box::new(XfceSetter::new())),
        Desktop::Windows | Desktop::MacOs => Ok(Box::new(SystemSetter::new())),
        Desktop::Unknown => Err(PotdError::UnsupportedDesktop(
            "could not detect the desktop environment; set POTD_DESKTOP".to_string(),
        )),
    }
}

/// Desktop tools want absolute paths
pub(crate) fn absolute(path: &Path) -> PotdResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Run a desktop tool and return its standard output
pub(crate) fn run(command: &mut Command) -> PotdResult<String> {
    let program = command.get_program().to_string_lossy().into_owned();
    log::debug!("Running {:?}", command);

    let output = command
        .output()
        .map_err(|e| PotdError::Wallpaper(format!("could not run {}: {}", program, e)))?;

    if !output.status.success() {
        return Err(PotdError::Wallpaper(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_match_cli_values() {
        for mode in DisplayMode::value_variants() {
            let value = mode.to_possible_value().unwrap();
            assert_eq!(value.get_name(), mode.as_str());
        }
    }

    #[test]
    fn test_setter_for_each_desktop() {
        assert_eq!(setter_for(Desktop::Gnome).unwrap().name(), "gnome");
        assert_eq!(setter_for(Desktop::Unity).unwrap().name(), "gnome");
        assert_eq!(setter_for(Desktop::Kde).unwrap().name(), "kde");
        assert_eq!(setter_for(Desktop::Xfce4).unwrap().name(), "xfce4");
        assert_eq!(setter_for(Desktop::Windows).unwrap().name(), "system");
        assert!(matches!(
            setter_for(Desktop::Unknown),
            Err(PotdError::UnsupportedDesktop(_))
        ));
    }

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let path = std::env::temp_dir().join("nasa-1.jpg");
        assert_eq!(absolute(&path).unwrap(), path);
        assert!(absolute(Path::new("nasa-1.jpg")).unwrap().is_absolute());
    }

    #[test]
    fn test_run_reports_missing_program() {
        let err = run(&mut Command::new("potd-no-such-tool")).unwrap_err();
        assert!(matches!(err, PotdError::Wallpaper(_)));
    }
}
