mod intake;
mod types;

pub use intake::{FileIntake, FilesChanged, IntakeError, IntakeLimits};
pub use types::UploadedFile;
