use super::mime::extensions_for_mime;

/// Parsed form of the `accept` option: a comma separated list of `.ext`
/// entries and MIME patterns, or `*` for anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptFilter {
    raw: String,
    entries: Vec<String>,
}

impl AcceptFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let entries = if raw == "*" || raw.is_empty() {
            Vec::new()
        } else {
            raw.split(',')
                .map(|entry| entry.trim().to_lowercase())
                .filter(|entry| !entry.is_empty() && entry != "*")
                .collect()
        };
        Self {
            raw: if raw.is_empty() { "*".to_string() } else { raw.to_string() },
            entries,
        }
    }

    pub fn accepts_any(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hint text under the drop zone.
    pub fn display(&self) -> String {
        if self.accepts_any() {
            "Any file format".to_string()
        } else {
            self.raw.replace(',', ", ")
        }
    }

    /// Extensions (without the leading dot) for the native picker filter.
    pub fn extensions(&self) -> Vec<String> {
        let mut extensions = Vec::new();
        for entry in &self.entries {
            let expanded = match entry.strip_prefix('.') {
                Some(ext) => vec![ext.to_string()],
                None if entry.contains('/') => extensions_for_mime(entry)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                None => vec![entry.clone()],
            };
            for ext in expanded {
                if !extensions.contains(&ext) {
                    extensions.push(ext);
                }
            }
        }
        extensions
    }
}
