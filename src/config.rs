use envconfig::Envconfig;
use reqwest::Url;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/process_image/";

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "EXTRACTIFY_ENDPOINT", default = "http://localhost:8000/process_image/")]
    pub endpoint: String,

    /// Empty means "the platform download directory".
    #[envconfig(from = "EXTRACTIFY_DOWNLOAD_DIR", default = "")]
    pub download_dir: String,
}

/// Validated configuration the application is built from.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: Url,
    pub download_dir: PathBuf,
}

impl Config {
    pub fn resolve(self) -> Result<Settings> {
        let endpoint = parse_endpoint(&self.endpoint)?;

        let download_dir = if self.download_dir.trim().is_empty() {
            default_download_dir()
        } else {
            PathBuf::from(self.download_dir)
        };

        Ok(Settings {
            endpoint,
            download_dir,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::InvalidEndpoint {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::InvalidEndpoint {
            url: raw.to_owned(),
            reason: format!("unsupported scheme {scheme:?}"),
        }),
    }
}

/// Where `output.csv` lands when nothing is configured:
/// - Linux: ~/Downloads (XDG_DOWNLOAD_DIR)
/// - macOS: ~/Downloads
/// - Windows: {FOLDERID_Downloads}
fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
