use super::types::UploadedFile;
use tracing::{debug, info};

/// Called with the full ordered list after every successful change.
pub type FilesChanged = Box<dyn FnMut(&[UploadedFile])>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeError {
    #[error("Some files exceed the {limit_mb}MB limit")]
    FileTooLarge { limit_mb: f64 },
    #[error("You can only upload up to {max_files} files")]
    TooManyFiles { max_files: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntakeLimits {
    pub max_files: usize,
    pub max_file_size_mb: f64,
}

impl IntakeLimits {
    pub fn exceeds_size(&self, size_bytes: u64) -> bool {
        size_bytes as f64 > self.max_file_size_mb * 1024.0 * 1024.0
    }
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_file_size_mb: 5.0,
        }
    }
}

/// Validated, ordered list of files waiting to be submitted.
pub struct FileIntake {
    limits: IntakeLimits,
    files: Vec<UploadedFile>,
    error: Option<IntakeError>,
    is_dragging: bool,
    on_change: Option<FilesChanged>,
}

impl FileIntake {
    pub fn new(limits: IntakeLimits) -> Self {
        Self {
            limits,
            files: Vec::new(),
            error: None,
            is_dragging: false,
            on_change: None,
        }
    }

    pub fn with_listener(mut self, on_change: FilesChanged) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn limits(&self) -> IntakeLimits {
        self.limits
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn error(&self) -> Option<&IntakeError> {
        self.error.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Admits the whole batch or none of it.
    pub fn add_files(&mut self, candidates: Vec<UploadedFile>) -> Result<(), IntakeError> {
        if candidates.is_empty() {
            return Ok(());
        }

        if let Some(oversized) = candidates
            .iter()
            .find(|file| self.limits.exceeds_size(file.size_bytes))
        {
            debug!(
                "Rejecting batch of {}: {} is {} bytes",
                candidates.len(),
                oversized.name,
                oversized.size_bytes
            );
            return Err(self.reject(IntakeError::FileTooLarge {
                limit_mb: self.limits.max_file_size_mb,
            }));
        }

        if self.files.len() + candidates.len() > self.limits.max_files {
            debug!(
                "Rejecting batch of {}: {} files already listed",
                candidates.len(),
                self.files.len()
            );
            return Err(self.reject(IntakeError::TooManyFiles {
                max_files: self.limits.max_files,
            }));
        }

        self.error = None;
        info!("Added {} file(s)", candidates.len());
        self.files.extend(candidates);
        self.notify();
        Ok(())
    }

    /// Out-of-range indices are ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<UploadedFile> {
        if index >= self.files.len() {
            debug!("Ignoring removal of index {} ({} files)", index, self.files.len());
            return None;
        }
        let removed = self.files.remove(index);
        info!("Removed {}", removed.name);
        self.notify();
        Some(removed)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.error = None;
        self.is_dragging = false;
        self.notify();
    }

    pub fn drag_enter(&mut self) {
        self.is_dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.is_dragging = false;
    }

    pub fn drop_files(&mut self, candidates: Vec<UploadedFile>) -> Result<(), IntakeError> {
        self.is_dragging = false;
        self.add_files(candidates)
    }

    fn reject(&mut self, error: IntakeError) -> IntakeError {
        self.error = Some(error.clone());
        error
    }

    fn notify(&mut self) {
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.files);
        }
    }
}
