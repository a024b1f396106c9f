/// The invoice picture the user picked
///
/// The bytes are held in memory for the lifetime of the selection: they back
/// both the on-screen preview and the body of the next upload.
use iced::widget::image::Handle;
use image::ImageFormat;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;

/// Extensions offered by the file dialog. This is a hint, not a check.
pub const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// MIME type the upload part is labelled with
pub const JPEG_MIME: &str = "image/jpeg";

#[derive(Clone)]
pub struct SelectedImage {
    /// File name only (e.g., "invoice_0042.jpg"); the backend names its temp file after it
    pub file_name: String,
    /// Full path the image was read from
    pub path: PathBuf,
    /// Raw file content, sent as-is
    pub bytes: Vec<u8>,
    /// Pixel size, when the data could be decoded
    pub dimensions: Option<(u32, u32)>,
    /// Preview handle for the image widget
    pub preview: Handle,
}

impl SelectedImage {
    /// Build a selection from bytes already in memory.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "invoice.jpg".to_owned());

        match image::guess_format(&bytes) {
            Ok(ImageFormat::Jpeg) => {}
            Ok(format) => warn!("{file_name} is {format:?}, not JPEG; uploading anyway"),
            Err(_) => warn!("{file_name} is not a recognized image; uploading anyway"),
        }

        let dimensions = read_dimensions(&bytes);
        let preview = Handle::from_bytes(bytes.clone());

        Self {
            file_name,
            path,
            bytes,
            dimensions,
            preview,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// One-line description for the status bar
    pub fn summary(&self) -> String {
        match self.dimensions {
            Some((width, height)) => format!(
                "{} ({}x{}, {} KB)",
                self.file_name,
                width,
                height,
                self.len().div_ceil(1024)
            ),
            None => format!("{} ({} KB)", self.file_name, self.len().div_ceil(1024)),
        }
    }
}

// The preview handle and raw bytes are noise in logs
impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("path", &self.path)
            .field("len", &self.bytes.len())
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

/// Read a picked file into a [`SelectedImage`].
pub async fn load_selected_image(path: PathBuf) -> Result<SelectedImage> {
    let bytes = tokio::fs::read(&path).await?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(SelectedImage::from_bytes(path, bytes))
}

/// Whether the extension matches the dialog filter.
pub fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| JPEG_EXTENSIONS.contains(&ext.as_str()))
}

fn read_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}
