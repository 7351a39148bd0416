pub mod accept;
pub mod file_size;
pub mod mime;

pub use accept::AcceptFilter;
pub use file_size::FileSizeUtils;
