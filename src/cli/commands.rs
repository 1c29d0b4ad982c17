use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::{SiteId, SiteSelection};
use crate::wallpaper::DisplayMode;

#[derive(Parser)]
#[command(name = "potd")]
#[command(about = "Download the photo of the day from popular sites and set it as desktop wallpaper")]
#[command(version)]
pub struct Cli {
    /// Site to download from (prompts for one by default)
    #[arg(long, value_enum, default_value_t = SiteArg::Ask)]
    pub site: SiteArg,

    /// Image number, for sites publishing a gallery
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub n: u32,

    /// Download again even if the image is already saved
    #[arg(long)]
    pub force_download: bool,

    /// Download every site, then rotate through today's images forever
    #[arg(long = "loop")]
    pub loop_mode: bool,

    /// Seconds between wallpaper changes in loop mode
    #[arg(long, default_value_t = 60)]
    pub period: u64,

    /// How the wallpaper is fitted to the screen
    #[arg(long, value_enum, default_value_t = DisplayMode::Scaled)]
    pub mode: DisplayMode,

    /// Only download, leave the desktop background alone
    #[arg(long)]
    pub no_wallpaper: bool,

    /// Delete every saved image and exit
    #[arg(long)]
    pub remove_all: bool,

    /// Folder to save images in (overrides POTD_OUTPUT_DIR)
    #[arg(long, env = "POTD_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SiteArg {
    /// National Geographic
    Ng,
    /// Bing
    Bing,
    /// Wikimedia Commons
    Wiki,
    /// The Guardian (gallery, use --n)
    Guardian,
    /// NASA Astronomy Picture of the Day
    Nasa,
    /// Smithsonian
    Smith,
    /// 35photo
    #[value(name = "35photo")]
    ThirtyFivePhoto,
    /// A random site
    Random,
    /// Every site
    All,
    /// Choose from a menu
    Ask,
}

impl SiteArg {
    /// The selection this argument names; `None` means ask the user
    pub fn selection(&self) -> Option<SiteSelection> {
        let site = match self {
            SiteArg::Ng => SiteId::NationalGeographic,
            SiteArg::Bing => SiteId::Bing,
            SiteArg::Wiki => SiteId::WikimediaCommons,
            SiteArg::Guardian => SiteId::TheGuardian,
            SiteArg::Nasa => SiteId::Nasa,
            SiteArg::Smith => SiteId::Smithsonian,
            SiteArg::ThirtyFivePhoto => SiteId::ThirtyFivePhoto,
            SiteArg::Random => return Some(SiteSelection::Random),
            SiteArg::All => return Some(SiteSelection::All),
            SiteArg::Ask => return None,
        };
        Some(SiteSelection::One(site))
    }
}
