use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use env_logger::Env;
use rand::seq::SliceRandom;

use potd::cli::Cli;
use potd::config::Config;
use potd::domain::{Outcome, SiteId, SiteSelection};
use potd::errors::{PotdError, PotdResult};
use potd::http::ReqwestFetcher;
use potd::services::{rotate, FetchService, FileDownloader};
use potd::sources::SourceRegistry;
use potd::storage::ImageStore;
use potd::wallpaper::{setter_for, DisplayMode};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> PotdResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env(cli.output_dir.clone())?;
    log::debug!(
        "Saving to {} ({:?} cache) on {}",
        config.output_dir.display(),
        config.cache_mode,
        config.desktop
    );

    let store = ImageStore::new(config.output_dir.clone(), config.cache_mode);

    if cli.remove_all {
        return cmd_remove_all(&store);
    }

    let selection = if cli.loop_mode {
        SiteSelection::All
    } else {
        match cli.site.selection() {
            Some(selection) => selection,
            None => match ask_site()? {
                Some(site) => SiteSelection::One(site),
                None => return Ok(()),
            },
        }
    };

    let service = FetchService::new(
        ReqwestFetcher::new(&config.user_agent)?,
        SourceRegistry::new(),
        store,
        FileDownloader::new(config.fallback),
    );

    let image = match selection {
        SiteSelection::One(site) => {
            let outcome = service.fetch_one(site, cli.n, cli.force_download);
            Some(finish_single(site, outcome)?)
        }
        SiteSelection::Random => {
            let (site, outcome) = service.fetch_random(cli.n, cli.force_download);
            Some(finish_single(site, outcome)?)
        }
        SiteSelection::All => cmd_all(&service, cli.force_download),
    };

    if cli.no_wallpaper {
        return Ok(());
    }

    if cli.loop_mode {
        return cmd_loop(service.store(), &config, cli.mode, cli.period);
    }

    match image {
        Some(path) => set_wallpaper(&config, &path, cli.mode),
        None => Ok(()),
    }
}

fn cmd_remove_all(store: &ImageStore) -> PotdResult<()> {
    let removed = store.clear()?;

    if removed.is_empty() {
        eprintln!("No images to remove in {}.", store.root().display());
        return Ok(());
    }

    for path in &removed {
        println!("{}", path.display());
    }
    eprintln!("Removed {} images.", removed.len());

    Ok(())
}

/// Numbered site menu on stdin. Returns `None` when the user cancels.
fn ask_site() -> PotdResult<Option<SiteId>> {
    println!("Select a site:\n");
    for (i, site) in SiteId::ALL.iter().enumerate() {
        println!("  {}. {} [{}]", i + 1, site.display_name(), site.as_str());
    }
    println!();

    print!("Enter number (or 'q' to cancel): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        println!("Cancelled.");
        return Ok(None);
    }

    let index: usize = input
        .parse()
        .map_err(|_| PotdError::InvalidInput("Invalid number".to_string()))?;

    if index == 0 || index > SiteId::ALL.len() {
        return Err(PotdError::InvalidInput("Number out of range".to_string()));
    }

    Ok(Some(SiteId::ALL[index - 1]))
}

/// Print the path of a single-site run, or turn its failure into the exit error
fn finish_single(site: SiteId, outcome: Outcome) -> PotdResult<PathBuf> {
    match outcome {
        Outcome::Saved(path) | Outcome::Cached(path) => {
            println!("{}", path.display());
            Ok(path)
        }
        Outcome::NotFound(e) | Outcome::Failed(e) => {
            log::error!("Could not get today's {} image", site.display_name());
            Err(e)
        }
    }
}

/// Download every site; returns the last image on disk
fn cmd_all(service: &FetchService<ReqwestFetcher>, force: bool) -> Option<PathBuf> {
    let summary = service.fetch_all(force);

    for path in summary.images() {
        println!("{}", path.display());
    }

    if !summary.not_found.is_empty() {
        eprintln!("\nNo image available:");
        for (site, index) in &summary.not_found {
            eprintln!("  - {} #{}", site, index);
        }
    }

    if summary.has_failures() {
        eprintln!("\nFailed {} downloads:", summary.failed.len());
        for (site, index, error) in &summary.failed {
            eprintln!("  ! {} #{}: {}", site, index, error);
        }
    }

    eprintln!(
        "\nDone: {} saved, {} already present, {} failed",
        summary.saved.len(),
        summary.cached.len(),
        summary.failed.len()
    );

    summary.images().last().cloned()
}

fn cmd_loop(store: &ImageStore, config: &Config, mode: DisplayMode, period: u64) -> PotdResult<()> {
    let mut images = store.images()?;
    if images.is_empty() {
        return Err(PotdError::InvalidInput(format!(
            "no images in {} to rotate",
            store.dir().display()
        )));
    }
    images.shuffle(&mut rand::thread_rng());

    let setter = setter_for(config.desktop)?;
    log::info!(
        "Rotating {} images every {} seconds with the {} setter",
        images.len(),
        period,
        setter.name()
    );
    rotate(setter.as_ref(), &images, mode, Duration::from_secs(period), None);

    Ok(())
}

fn set_wallpaper(config: &Config, path: &Path, mode: DisplayMode) -> PotdResult<()> {
    let setter = setter_for(config.desktop)?;
    setter.apply(path, mode)
}
