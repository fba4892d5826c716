const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const TEXT_APPLICATION_TYPES: &[&str] = &[
    "application/json",
    "application/xml",
    "application/javascript",
    "application/x-yaml",
    "application/yaml",
    "application/sql",
];

const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "csv", "json", "xml", "yaml", "yml", "sql", "js", "jsx", "ts", "tsx", "css",
    "html", "htm", "py", "java", "c", "h", "cpp", "cs", "php", "rb", "go", "rs", "swift", "kt",
];

pub fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

pub fn guess_from_name(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

/// Whether a file can be previewed as text, judged by its MIME type first and
/// its extension second.
pub fn is_text(content_type: &str, filename: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence.starts_with("text/") || TEXT_APPLICATION_TYPES.contains(&essence.as_str()) {
        return true;
    }

    extension(filename).is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
}
