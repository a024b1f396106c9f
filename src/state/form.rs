/// State of the upload form
///
/// Two pieces of state drive the whole UI: the selected image and the busy
/// flag. At most one submission is in flight: `begin_submission` refuses to
/// start another until the current one is settled with `finish_submission`.
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use super::image::SelectedImage;
use crate::error::Error;

/// How the last submission ended
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The CSV was saved at this path
    Delivered(PathBuf),
    /// Nothing was saved; the cause is kept for whoever wants to report it
    Failed(Arc<Error>),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Identifies one file pick, so a slow load can't overwrite a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket(u64);

/// What a started submission sends
#[derive(Debug, Clone)]
pub struct Submission {
    /// `None` when the user submitted without picking a file
    pub image: Option<SelectedImage>,
}

#[derive(Debug, Default)]
pub struct UploadForm {
    selected: Option<SelectedImage>,
    submitting: bool,
    outcome: Option<Outcome>,
    latest_ticket: u64,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_image(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    /// The busy flag
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Start a new file pick. Earlier tickets become stale.
    pub fn start_selection(&mut self) -> SelectionTicket {
        self.latest_ticket += 1;
        SelectionTicket(self.latest_ticket)
    }

    /// Whether `ticket` belongs to the most recent pick
    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// Replace the selection with a loaded image.
    ///
    /// Returns `false` (and keeps the current selection) if a newer pick was
    /// started after this ticket was issued.
    pub fn select(&mut self, ticket: SelectionTicket, image: SelectedImage) -> bool {
        if !self.is_current(ticket) {
            debug!("Dropping stale selection {}", image.file_name);
            return false;
        }

        debug!("Selected {:?}", image);
        self.selected = Some(image);
        true
    }

    /// Flip the busy flag and hand out what to send.
    ///
    /// Returns `None` while another submission is in flight.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        if self.submitting {
            warn!("Submission already in progress, ignoring");
            return None;
        }

        self.submitting = true;
        self.outcome = None;

        Some(Submission {
            image: self.selected.clone(),
        })
    }

    /// Clear the busy flag and record how the submission ended.
    pub fn finish_submission(&mut self, result: Result<PathBuf, Arc<Error>>) -> &Outcome {
        if !self.submitting {
            warn!("Settling a submission that was never started");
        }

        self.submitting = false;
        let outcome = match result {
            Ok(path) => Outcome::Delivered(path),
            Err(err) => Outcome::Failed(err),
        };

        self.outcome.insert(outcome)
    }
}
