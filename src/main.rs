use envconfig::Envconfig;
use iced::{Element, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod service;
mod state;
mod ui;

use config::{Config, Settings};
use error::Error;
use service::download::DownloadSink;
use service::processor::Processor;
use state::form::{Outcome, SelectionTicket, UploadForm};
use state::image::{has_jpeg_extension, load_selected_image, SelectedImage, JPEG_EXTENSIONS};

/// Main application state
struct Extractify {
    /// Selected image, busy flag and last outcome
    form: UploadForm,
    /// Client for the processing endpoint
    processor: Processor,
    /// Where the CSV ends up
    downloads: DownloadSink,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Choose image"
    ChooseImage,
    /// A picked file finished loading
    ImageLoaded(SelectionTicket, Result<SelectedImage, Arc<Error>>),
    /// User clicked "Submit"
    Submit,
    /// The upload and download settled, one way or the other
    SubmissionSettled(Result<PathBuf, Arc<Error>>),
}

impl Extractify {
    fn new(settings: Settings) -> (Self, Task<Message>) {
        let processor = Processor::new(settings.endpoint);
        let downloads = DownloadSink::new(settings.download_dir);
        info!(
            "🧾 Extractify ready: endpoint {}, saving to {}",
            processor.endpoint(),
            downloads.dir().display()
        );

        (
            Extractify {
                form: UploadForm::new(),
                processor,
                downloads,
                status: "Ready.".to_owned(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChooseImage => {
                let Some(path) = FileDialog::new()
                    .set_title("Select Invoice Picture")
                    .add_filter("JPEG image", &JPEG_EXTENSIONS)
                    .pick_file()
                else {
                    debug!("File dialog cancelled");
                    return Task::none();
                };

                if !has_jpeg_extension(&path) {
                    warn!("{} doesn't look like a JPEG", path.display());
                }

                let ticket = self.form.start_selection();
                Task::perform(load_selected_image(path), move |result| {
                    Message::ImageLoaded(ticket, result.map_err(Arc::new))
                })
            }
            Message::ImageLoaded(ticket, Ok(image)) => {
                let summary = image.summary();
                if self.form.select(ticket, image) {
                    self.status = format!("Selected {summary}");
                }

                Task::none()
            }
            Message::ImageLoaded(ticket, Err(err)) => {
                error!("Error reading image: {err}");
                if self.form.is_current(ticket) {
                    self.status = "Could not read that file.".to_owned();
                }

                Task::none()
            }
            Message::Submit => {
                let Some(submission) = self.form.begin_submission() else {
                    return Task::none();
                };
                self.status.clear();

                Task::perform(
                    service::submit_invoice(
                        self.processor.clone(),
                        submission.image,
                        self.downloads.clone(),
                    ),
                    |result| Message::SubmissionSettled(result.map_err(Arc::new)),
                )
            }
            Message::SubmissionSettled(result) => {
                match self.form.finish_submission(result) {
                    Outcome::Delivered(path) => info!("✅ CSV downloaded to {}", path.display()),
                    Outcome::Failed(err) => error!("Error downloading CSV: {err}"),
                }

                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        ui::form::view(&self.form, &self.status)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        ui::theme::theme()
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Config::init_from_env()?.resolve()?;

    iced::application("Extractify", Extractify::update, Extractify::view)
        .theme(Extractify::theme)
        .centered()
        .run_with(move || Extractify::new(settings))
        .map_err(|e| Error::Gui(e.to_string()))?;

    Ok(())
}
