use crate::utils::mime::mime_for_name;
use derivative::Derivative;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where an uploaded file's bytes live until submission reads them.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum FileContent {
    Path(PathBuf),
    Bytes(#[derivative(Debug = "ignore")] Arc<[u8]>),
}

impl FileContent {
    pub async fn read(&self) -> io::Result<Vec<u8>> {
        match self {
            FileContent::Path(path) => tokio::fs::read(path).await,
            FileContent::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub content: FileContent,
}

impl UploadedFile {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            mime_type: mime_for_name(&name).to_string(),
            name,
            size_bytes: metadata.len(),
            content: FileContent::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        let name = name.into();
        Self {
            mime_type: mime_for_name(&name).to_string(),
            size_bytes: bytes.len() as u64,
            name,
            content: FileContent::Bytes(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_path_reads_size_and_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.pdf");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[7u8; 2048]).unwrap();

        let uploaded = UploadedFile::from_path(&path).unwrap();
        assert_eq!(uploaded.name, "invoice.pdf");
        assert_eq!(uploaded.size_bytes, 2048);
        assert_eq!(uploaded.mime_type, "application/pdf");
    }

    #[test]
    fn from_path_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(UploadedFile::from_path(dir.path()).is_err());
    }

    #[test]
    fn debug_output_hides_in_memory_bytes() {
        let uploaded = UploadedFile::from_bytes("a.png", Arc::from(vec![42u8; 16]));
        let debug = format!("{:?}", uploaded);
        assert!(debug.contains("a.png"));
        assert!(!debug.contains("42, 42"));
    }

    #[tokio::test]
    async fn path_content_reads_the_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();
        let uploaded = UploadedFile::from_path(&path).unwrap();

        assert_eq!(uploaded.content.read().await.unwrap(), b"hello");
    }
}
