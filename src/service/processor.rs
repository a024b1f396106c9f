use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Url};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::state::image::{SelectedImage, JPEG_MIME};

/// Name of the multipart field the backend reads the image from
pub const FILE_FIELD: &str = "file";

/// Media type the backend answers with on success
pub const CSV_MIME: &str = "text/csv";

/// Body of a successful response, kept byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvPayload {
    pub bytes: Vec<u8>,
}

impl CsvPayload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Client for the remote invoice processing endpoint.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its pool.
#[derive(Debug, Clone)]
pub struct Processor {
    client: Client,
    endpoint: Url,
}

impl Processor {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one invoice to the endpoint and return the CSV it produced.
    ///
    /// `None` is sent as a form without a `file` part; rejecting that is
    /// left to the server.
    pub async fn process_image(&self, image: Option<&SelectedImage>) -> Result<CsvPayload> {
        let form = match image {
            Some(image) => {
                if image.is_empty() {
                    warn!("{} is empty", image.file_name);
                }
                let part = Part::bytes(image.bytes.clone())
                    .file_name(image.file_name.clone())
                    .mime_str(JPEG_MIME)?;
                Form::new().part(FILE_FIELD, part)
            }
            None => {
                warn!("Submitting without an image");
                Form::new()
            }
        };

        info!(
            "📤 Uploading {} to {}",
            image.map_or("nothing", |image| image.file_name.as_str()),
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        // A streamed form can't be replayed, so redirects come back unfollowed
        let status = response.status();
        if !status.is_success() {
            warn!("Endpoint answered {status}, no CSV");
            return Err(Error::Status { status });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        if !content_type
            .as_deref()
            .is_some_and(|value| value.starts_with(CSV_MIME))
        {
            debug!("Response content type is {content_type:?}, treating it as CSV");
        }

        let payload = CsvPayload {
            bytes: response.bytes().await?.to_vec(),
        };
        if payload.is_empty() {
            warn!("Endpoint answered with an empty body");
        }
        info!("📥 Received {} bytes of CSV", payload.len());

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{refused_endpoint, StandIn, CSV};

    #[tokio::test]
    async fn test_sends_image_under_file_field() {
        let stand_in = StandIn::start().await;
        let image = SelectedImage::from_bytes("invoice.jpg", b"\xFF\xD8jpeg bytes\xFF\xD9".to_vec());

        let payload = Processor::new(stand_in.endpoint())
            .process_image(Some(&image))
            .await
            .unwrap();

        assert_eq!(payload.bytes, CSV);

        let requests = stand_in.requests().await;
        assert_eq!(requests.len(), 1);
        let parts = &requests[0];
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name.as_deref(), Some(FILE_FIELD));
        assert_eq!(parts[0].file_name.as_deref(), Some("invoice.jpg"));
        assert_eq!(parts[0].content_type.as_deref(), Some(JPEG_MIME));
        assert_eq!(parts[0].data, image.bytes);
    }

    #[tokio::test]
    async fn test_without_image_sends_no_file_part() {
        let stand_in = StandIn::start().await;

        let result = Processor::new(stand_in.endpoint()).process_image(None).await;
        assert!(result.is_ok());

        let requests = stand_in.requests().await;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_a_failure() {
        let stand_in = StandIn::start_failing().await;
        let image = SelectedImage::from_bytes("invoice.jpg", b"bytes".to_vec());

        let err = Processor::new(stand_in.endpoint())
            .process_image(Some(&image))
            .await
            .unwrap_err();

        match err {
            Error::Status { status } => assert_eq!(status.as_u16(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unfollowed_redirect_is_a_failure() {
        let stand_in = StandIn::start_redirecting().await;
        let image = SelectedImage::from_bytes("invoice.jpg", b"bytes".to_vec());

        let err = Processor::new(stand_in.bare_endpoint())
            .process_image(Some(&image))
            .await
            .unwrap_err();

        match err {
            Error::Status { status } => assert!(status.is_redirection()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slashed_route_answers_directly() {
        let stand_in = StandIn::start_redirecting().await;
        let image = SelectedImage::from_bytes("invoice.jpg", b"bytes".to_vec());

        let payload = Processor::new(stand_in.endpoint())
            .process_image(Some(&image))
            .await
            .unwrap();

        assert_eq!(payload.bytes, CSV);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_failure() {
        let endpoint = refused_endpoint().await;

        let err = Processor::new(endpoint).process_image(None).await.unwrap_err();

        assert!(matches!(err, Error::Request(ref e) if e.is_connect()));
    }
}
