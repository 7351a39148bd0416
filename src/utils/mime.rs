use std::path::Path;

pub const FALLBACK_MIME: &str = "application/octet-stream";

const MIME_TABLE: [(&str, &str); 24] = [
    // Images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
    // Documents
    ("pdf", "application/pdf"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("doc", "application/msword"),
    ("rtf", "application/rtf"),
    // Text
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("xml", "text/xml"),
    ("json", "application/json"),
    ("js", "text/javascript"),
    ("py", "text/x-python"),
    // Audio / video
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
];

/// Infers a MIME type from the file name's extension.
pub fn mime_for_name(name: &str) -> &'static str {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .and_then(|ext| {
            MIME_TABLE
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(FALLBACK_MIME)
}

/// Matches a MIME type against a pattern such as `image/png` or `image/*`.
pub fn mime_matches(pattern: &str, mime: &str) -> bool {
    let pattern = pattern.trim().to_lowercase();
    let mime = mime.to_lowercase();
    match pattern.strip_suffix("/*") {
        Some(kind) => mime
            .split_once('/')
            .is_some_and(|(mime_kind, _)| mime_kind == kind),
        None => pattern == mime,
    }
}

/// Every known extension whose MIME type satisfies `pattern`.
pub fn extensions_for_mime(pattern: &str) -> Vec<&'static str> {
    MIME_TABLE
        .iter()
        .filter(|(_, mime)| mime_matches(pattern, mime))
        .map(|(ext, _)| *ext)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_resolve_case_insensitively() {
        assert_eq!(mime_for_name("scan.PDF"), "application/pdf");
        assert_eq!(mime_for_name("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for_name("archive.tar.gz"), FALLBACK_MIME);
        assert_eq!(mime_for_name("Makefile"), FALLBACK_MIME);
    }

    #[test]
    fn wildcard_patterns_match_the_top_level_type() {
        assert!(mime_matches("image/*", "image/png"));
        assert!(!mime_matches("image/*", "application/pdf"));
        assert!(mime_matches("application/pdf", "application/PDF"));
    }

    #[test]
    fn image_wildcard_expands_to_image_extensions() {
        let extensions = extensions_for_mime("image/*");
        assert!(extensions.contains(&"png"));
        assert!(extensions.contains(&"jpg"));
        assert!(!extensions.contains(&"pdf"));
    }
}
