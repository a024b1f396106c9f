/// Talking to the outside world
///
/// This module handles:
/// - Uploading the invoice to the processing endpoint (processor.rs)
/// - Delivering the returned CSV to disk (download.rs)

pub mod download;
pub mod processor;

#[cfg(test)]
pub(crate) mod testing;

use std::path::PathBuf;

use crate::error::Result;
use crate::state::image::SelectedImage;
use download::DownloadSink;
use processor::Processor;

/// One submission, start to finish: upload, then save the CSV.
///
/// Takes owned values so it can run as a background task.
pub async fn submit_invoice(
    processor: Processor,
    image: Option<SelectedImage>,
    downloads: DownloadSink,
) -> Result<PathBuf> {
    let payload = processor.process_image(image.as_ref()).await?;
    downloads.deliver(payload).await
}
