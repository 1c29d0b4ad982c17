use std::path::PathBuf;

use crate::errors::{PotdError, PotdResult};
use crate::wallpaper::Desktop;

/// How downloaded images are keyed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// One folder per calendar day, so every day fetches fresh images
    Daily,
    /// A single flat folder; a site/index pair is fetched once until forced
    Latest,
}

impl std::str::FromStr for CacheMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "day" => Ok(CacheMode::Daily),
            "latest" => Ok(CacheMode::Latest),
            _ => Err(format!("Unknown cache mode: {}", s)),
        }
    }
}

/// External program used when the built-in HTTP download is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTool {
    Curl,
    Wget,
    None,
}

impl FallbackTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackTool::Curl => "curl",
            FallbackTool::Wget => "wget",
            FallbackTool::None => "none",
        }
    }
}

impl std::str::FromStr for FallbackTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "curl" => Ok(FallbackTool::Curl),
            "wget" => Ok(FallbackTool::Wget),
            "none" | "off" => Ok(FallbackTool::None),
            _ => Err(format!("Unknown fallback downloader: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    pub cache_mode: CacheMode,
    pub fallback: FallbackTool,
    pub desktop: Desktop,
    pub user_agent: String,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Load the configuration. `output_dir` comes from the command line and
    /// takes precedence over the environment.
    pub fn from_env(output_dir: Option<PathBuf>) -> PotdResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok(), output_dir)
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(var: F, output_dir: Option<PathBuf>) -> PotdResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let desktop = match var("POTD_DESKTOP") {
            Some(name) => name.parse().map_err(PotdError::Config)?,
            None => Desktop::detect(&var),
        };

        let output_dir = match output_dir.or_else(|| var("POTD_OUTPUT_DIR").map(PathBuf::from)) {
            Some(dir) => dir,
            None => Self::default_output_dir(desktop, &var)?,
        };

        let cache_mode = var("POTD_CACHE")
            .map(|v| v.parse())
            .transpose()
            .map_err(PotdError::Config)?
            .unwrap_or(CacheMode::Daily);

        let fallback = var("POTD_FALLBACK")
            .map(|v| v.parse())
            .transpose()
            .map_err(PotdError::Config)?
            .unwrap_or(FallbackTool::Curl);

        let user_agent = var("POTD_USER_AGENT")
            .unwrap_or_else(|| format!("potd/{}", env!("CARGO_PKG_VERSION")));

        Ok(Self {
            output_dir,
            cache_mode,
            fallback,
            desktop,
            user_agent,
        })
    }

    fn default_output_dir<F>(desktop: Desktop, var: &F) -> PotdResult<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if desktop == Desktop::Windows {
            let profile = var("USERPROFILE")
                .ok_or_else(|| PotdError::Config("USERPROFILE is not set".to_string()))?;
            return Ok(PathBuf::from(profile).join("Pictures").join("potd"));
        }

        let home = var("HOME").ok_or_else(|| {
            PotdError::Config("HOME is not set; use POTD_OUTPUT_DIR".to_string())
        })?;
        Ok(PathBuf::from(home).join(".potd"))
    }
}
