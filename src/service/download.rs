/// Delivery of the processed CSV to disk
///
/// The payload is first written to a staging file next to its destination and
/// only then renamed to `output.csv`. The staging file is owned by a
/// `NamedTempFile`, so it is removed on every path that doesn't persist it.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::processor::CsvPayload;
use crate::error::Result;

/// Fixed name of the delivered file
pub const OUTPUT_FILE_NAME: &str = "output.csv";

const STAGING_PREFIX: &str = ".output-";
const STAGING_SUFFIX: &str = ".csv.part";

#[derive(Debug, Clone)]
pub struct DownloadSink {
    dir: PathBuf,
}

impl DownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the next delivery will land
    pub fn destination(&self) -> PathBuf {
        self.dir.join(OUTPUT_FILE_NAME)
    }

    /// Write the payload to [`Self::destination`], replacing any previous file.
    pub async fn deliver(&self, payload: CsvPayload) -> Result<PathBuf> {
        let dir = self.dir.clone();
        let destination = self.destination();

        // Spawn blocking because tempfile is synchronous
        tokio::task::spawn_blocking(move || deliver_blocking(&dir, &destination, &payload))
            .await?
    }
}

fn deliver_blocking(dir: &Path, destination: &Path, payload: &CsvPayload) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let mut staged = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(STAGING_SUFFIX)
        .tempfile_in(dir)?;
    debug!("Staging download at {}", staged.path().display());

    staged.write_all(&payload.bytes)?;
    staged.as_file().sync_all()?;

    staged.persist(destination).map_err(|e| e.error)?;

    info!("💾 Saved {} bytes to {}", payload.len(), destination.display());
    Ok(destination.to_path_buf())
}
