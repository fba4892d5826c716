pub mod content_type;
pub mod file;
pub mod language;
pub mod snippet;
