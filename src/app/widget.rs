use super::state::{SubmissionError, SubmissionState, SUBMITTED_FILE_INDEX};
use crate::config::WidgetConfig;
use crate::generate::{EncodedFile, GenerationError, GenerationRequest, TextGenerator};
use crate::markup::MarkdownRenderer;
use crate::upload::{FileIntake, FilesChanged, IntakeError, IntakeLimits, UploadedFile};
use crate::utils::AcceptFilter;
use std::sync::mpsc::{self as std_mpsc, Receiver, TryRecvError};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

type Outcome = Result<String, GenerationError>;

/// File intake plus a single prompt submission to the text generator.
pub struct UploadSubmitWidget {
    intake: FileIntake,
    accept: AcceptFilter,
    prompt: String,
    state: SubmissionState,
    generator: Arc<dyn TextGenerator>,
    renderer: Box<dyn MarkdownRenderer>,
    outcome_receiver: Option<Receiver<Outcome>>,
}

impl UploadSubmitWidget {
    pub fn new(
        config: &WidgetConfig,
        generator: Arc<dyn TextGenerator>,
        renderer: Box<dyn MarkdownRenderer>,
    ) -> Self {
        let limits = IntakeLimits {
            max_files: config.max_files,
            max_file_size_mb: config.max_file_size_mb,
        };
        Self {
            intake: FileIntake::new(limits),
            accept: AcceptFilter::parse(&config.accept),
            prompt: String::new(),
            state: SubmissionState::Idle,
            generator,
            renderer,
            outcome_receiver: None,
        }
    }

    pub fn with_files_listener(mut self, on_change: FilesChanged) -> Self {
        self.intake = self.intake.with_listener(on_change);
        self
    }

    pub fn intake(&self) -> &FileIntake {
        &self.intake
    }

    pub fn accept(&self) -> &AcceptFilter {
        &self.accept
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut String {
        &mut self.prompt
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn add_files(&mut self, candidates: Vec<UploadedFile>) -> Result<(), IntakeError> {
        if self.state.shows_result() {
            debug!("Ignoring {} file(s) while the result is shown", candidates.len());
            return Ok(());
        }
        self.intake.add_files(candidates)?;
        self.dismiss_failure();
        Ok(())
    }

    pub fn remove_file(&mut self, index: usize) {
        self.intake.remove_file(index);
    }

    pub fn drag_enter(&mut self) {
        self.intake.drag_enter();
    }

    pub fn drag_leave(&mut self) {
        self.intake.drag_leave();
    }

    pub fn drop_files(&mut self, candidates: Vec<UploadedFile>) -> Result<(), IntakeError> {
        if self.state.shows_result() {
            self.intake.drag_leave();
            debug!("Ignoring drop of {} file(s) while the result is shown", candidates.len());
            return Ok(());
        }
        self.intake.drop_files(candidates)?;
        self.dismiss_failure();
        Ok(())
    }

    /// A changed file list makes the last submission error stale.
    fn dismiss_failure(&mut self) {
        if matches!(self.state, SubmissionState::Failed(_)) {
            self.state = SubmissionState::Idle;
        }
    }

    /// Returns true when a request was dispatched.
    pub fn submit(&mut self) -> bool {
        if !self.state.can_submit() {
            debug!("Submit ignored while {}", self.state.status_text());
            return false;
        }

        self.state = SubmissionState::Validating;
        let file = match self.validate() {
            Ok(file) => file,
            Err(e) => {
                info!("Submission rejected: {}", e);
                self.state = SubmissionState::Failed(e.to_string());
                return false;
            }
        };

        self.intake.clear_error();
        self.state = SubmissionState::InFlight;
        self.dispatch(self.prompt.clone(), file);
        true
    }

    fn validate(&self) -> Result<UploadedFile, SubmissionError> {
        if self.prompt.trim().is_empty() {
            return Err(SubmissionError::MissingPrompt);
        }
        self.intake
            .files()
            .get(SUBMITTED_FILE_INDEX)
            .cloned()
            .ok_or(SubmissionError::MissingFile)
    }

    fn dispatch(&mut self, prompt: String, file: UploadedFile) {
        info!(
            "Submitting {} as the only file of {} listed",
            file.name,
            self.intake.files().len()
        );

        let (sender, receiver) = std_mpsc::channel();
        self.outcome_receiver = Some(receiver);
        let generator = Arc::clone(&self.generator);
        let limits = self.intake.limits();

        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(run_submission(generator.as_ref(), limits, prompt, file)),
                Err(e) => Err(GenerationError::Runtime(e)),
            };
            let _ = sender.send(outcome);
        });
    }

    /// Applies the outcome of the outstanding request, if it has arrived.
    /// Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(receiver) = &self.outcome_receiver else {
            return false;
        };

        let outcome = match receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(GenerationError::WorkerStopped),
        };
        self.outcome_receiver = None;

        match outcome {
            Ok(text) => {
                info!("Generation succeeded with {} chars", text.len());
                self.state = SubmissionState::Succeeded(self.renderer.render(&text));
            }
            Err(e) => {
                error!("Text generation failed: {}", e);
                self.state = SubmissionState::Failed(SubmissionError::RequestFailed.to_string());
            }
        }
        true
    }

    /// Leaves the result view; prompt and files stay as they were.
    pub fn clear_result(&mut self) {
        if self.state.shows_result() {
            self.state = SubmissionState::Idle;
        }
    }

    pub fn reset(&mut self) {
        if self.state.is_in_flight() {
            warn!("Reset ignored while a request is in flight");
            return;
        }
        info!("Resetting widget");
        self.intake.clear();
        self.prompt.clear();
        self.state = SubmissionState::Idle;
    }
}

async fn run_submission(
    generator: &dyn TextGenerator,
    limits: IntakeLimits,
    prompt: String,
    file: UploadedFile,
) -> Outcome {
    let bytes = file
        .content
        .read()
        .await
        .map_err(|source| GenerationError::ReadFile {
            name: file.name.clone(),
            source,
        })?;
    // Path-backed files are read at submit time and may have changed since intake.
    if limits.exceeds_size(bytes.len() as u64) {
        return Err(GenerationError::FileTooLarge {
            name: file.name.clone(),
            limit_mb: limits.max_file_size_mb,
        });
    }
    let encoded = EncodedFile::encode(&file.name, &file.mime_type, &bytes);
    generator
        .generate(GenerationRequest {
            prompt,
            file: encoded,
        })
        .await
}
