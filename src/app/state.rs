use crate::markup::RenderedMarkup;

/// Only the file at this position is sent with a request. The list may hold
/// more files, they just never leave the widget.
pub const SUBMITTED_FILE_INDEX: usize = 0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Prompt is required")]
    MissingPrompt,
    #[error("At least one file is required")]
    MissingFile,
    #[error("The request failed. Please try again.")]
    RequestFailed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    /// Transient: entered and left within a single `submit` call.
    Validating,
    InFlight,
    Succeeded(RenderedMarkup),
    Failed(String),
}

impl SubmissionState {
    pub fn can_submit(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed(_))
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }

    pub fn shows_result(&self) -> bool {
        matches!(self, SubmissionState::Succeeded(_))
    }

    pub fn result(&self) -> Option<&RenderedMarkup> {
        match self {
            SubmissionState::Succeeded(markup) => Some(markup),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "Ready",
            SubmissionState::Validating => "Checking input",
            SubmissionState::InFlight => "Generating...",
            SubmissionState::Succeeded(_) => "Done",
            SubmissionState::Failed(_) => "Failed",
        }
    }
}
