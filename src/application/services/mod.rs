pub mod keyword_classifier;
pub mod language_detector;
pub mod snippet_service;
pub mod storage_service;
pub mod vault_service;

pub use language_detector::LanguageDetector;
pub use snippet_service::SnippetService;
pub use storage_service::StorageService;
pub use vault_service::{DeleteAllReport, FileVault};
