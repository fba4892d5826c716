use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::content_type;

/// Language tags understood by the detector and the snippet store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Cpp,
    C,
    Sql,
    Html,
    Css,
    Json,
    Xml,
    Markdown,
    Php,
    Ruby,
    Go,
    Rust,
    Swift,
    Kotlin,
    #[serde(rename = "text")]
    PlainText,
}

impl Language {
    pub const ALL: [Language; 19] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Java,
        Language::Cpp,
        Language::C,
        Language::Sql,
        Language::Html,
        Language::Css,
        Language::Json,
        Language::Xml,
        Language::Markdown,
        Language::Php,
        Language::Ruby,
        Language::Go,
        Language::Rust,
        Language::Swift,
        Language::Kotlin,
        Language::PlainText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Sql => "sql",
            Language::Html => "html",
            Language::Css => "css",
            Language::Json => "json",
            Language::Xml => "xml",
            Language::Markdown => "markdown",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::PlainText => "text",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Sql => "SQL",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Json => "JSON",
            Language::Xml => "XML",
            Language::Markdown => "Markdown",
            Language::Php => "PHP",
            Language::Ruby => "Ruby",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Swift => "Swift",
            Language::Kotlin => "Kotlin",
            Language::PlainText => "Plain Text",
        }
    }

    /// Maps a file name to a language by extension. C headers and sources
    /// are grouped under C++, matching the editor's syntax mode.
    pub fn from_extension(filename: &str) -> Language {
        match content_type::extension(filename).as_deref() {
            Some("js" | "jsx") => Language::JavaScript,
            Some("ts" | "tsx") => Language::TypeScript,
            Some("py") => Language::Python,
            Some("java") => Language::Java,
            Some("cpp" | "c" | "h") => Language::Cpp,
            Some("css") => Language::Css,
            Some("html" | "htm") => Language::Html,
            Some("json") => Language::Json,
            Some("xml") => Language::Xml,
            Some("md") => Language::Markdown,
            Some("sql") => Language::Sql,
            Some("php") => Language::Php,
            Some("rb") => Language::Ruby,
            Some("go") => Language::Go,
            Some("rs") => Language::Rust,
            Some("swift") => Language::Swift,
            Some("kt") => Language::Kotlin,
            _ => Language::PlainText,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown language tag: {0}")]
pub struct UnknownLanguage(pub String);

/// Display name for a stored tag. Tags outside the known set are shown with
/// their first letter capitalized (`cobol` becomes `Cobol`).
pub fn display_name_for_tag(tag: &str) -> String {
    if let Ok(language) = tag.parse::<Language>() {
        return language.display_name().to_string();
    }

    let tag = tag.trim();
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|language| language.as_str() == tag)
            .ok_or(UnknownLanguage(s.to_string()))
    }
}
