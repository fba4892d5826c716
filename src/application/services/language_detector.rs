use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::keyword_classifier::KeywordClassifier;
use crate::domain::models::language::Language;

/// Texts at or below this many characters skip the keyword fallback.
pub const MIN_FALLBACK_LENGTH: usize = 10;

struct Signature {
    language: Language,
    pattern: Regex,
}

impl Signature {
    fn new(language: Language, pattern: &str) -> Self {
        Self {
            language,
            pattern: Regex::new(pattern).unwrap(),
        }
    }
}

// Evaluated top to bottom, first match wins. Languages whose syntax is a
// superset or near relative of another (C++ over C, TypeScript over
// JavaScript, Ruby over Python) are listed before it.
lazy_static! {
    static ref SIGNATURES: Vec<Signature> = vec![
        Signature::new(Language::Xml, r"^\s*<\?xml\b"),
        Signature::new(Language::Php, r"<\?php\b|\$_(GET|POST|SESSION|SERVER)\b"),
        Signature::new(
            Language::Rust,
            r"\bfn\s+\w+\s*[<(]|\blet\s+mut\s+|\buse\s+std::|\bprintln!\(|\bimpl(<[^>]*>)?\s+\w+",
        ),
        Signature::new(
            Language::Swift,
            r"\bimport\s+(UIKit|Foundation|SwiftUI)\b|\bclass\s+\w+\s*:\s*UIViewController\b|\bguard\s+let\b|\bfunc\s+\w+\s*\([^)]*\)\s*->",
        ),
        Signature::new(
            Language::Go,
            r"\bpackage\s+main\b|\bfunc\s+(\(\s*\w+\s+\*?\w+\s*\)\s*)?\w+\s*\(|\bfmt\.Print|\bgo\s+func\b",
        ),
        Signature::new(
            Language::Kotlin,
            r"\bfun\s+\w+\s*\(|\bimport\s+kotlin\.|\bval\s+\w+\s*[:=]|\bdata\s+class\b",
        ),
        Signature::new(
            Language::Cpp,
            r"#include\s*<(iostream|vector|string|map|algorithm|memory|cstdio|cstdlib)>|\busing\s+namespace\s+std\b|\bstd::\w+|\bcout\s*<<|\bcin\s*>>|\btemplate\s*<",
        ),
        Signature::new(
            Language::C,
            r"#include\s*<\w+\.h>|\bprintf\s*\(|\bscanf\s*\(|\bmalloc\s*\(|\bint\s+main\s*\(",
        ),
        Signature::new(
            Language::Java,
            r"\bpublic\s+(static\s+)?(final\s+)?class\s+\w+|\bpublic\s+static\s+void\s+main\b|\bSystem\.out\.print|\bimport\s+java\.|\bpackage\s+[\w.]+\s*;",
        ),
        Signature::new(
            Language::TypeScript,
            r"\binterface\s+\w+\s*(extends\s+[\w, ]+)?\{|\btype\s+\w+\s*=|:\s*(string|number|boolean|any|void|unknown)\b|\bas\s+const\b|\b(private|public|protected|readonly)\s+\w+\s*:",
        ),
        Signature::new(
            Language::Ruby,
            r#"\bputs\s+|\battr_(accessor|reader|writer)\b|\brequire\s+['"]|\.each\s+do\b|\bdo\s*\|\w+\||(?m:^\s*end\s*$)"#,
        ),
        Signature::new(
            Language::Python,
            r#"\bdef\s+\w+\s*\(|\bfrom\s+[\w.]+\s+import\b|(?m:^\s*import\s+[\w.]+\s*$)|\bprint\s*\(|__name__\s*==\s*['"]__main__['"]|\belif\b|(?m:^\s*(class|if|for|while|with|try|except)\b[^\n{;]*:\s*$)"#,
        ),
        Signature::new(
            Language::JavaScript,
            r"\bfunction\b|\bconsole\.(log|error|warn)\s*\(|\b(const|let|var)\s+\w+\s*=|=>|\brequire\s*\(|\bexport\s+(default\s+)?(function|const|class|let)\b|\bdocument\.\w+|\bwindow\.\w+",
        ),
        Signature::new(
            Language::Html,
            r"(?i)<!doctype\s+html|<(html|head|body|div|span|p|a|h[1-6]|ul|ol|li|table|form|input|button|script|link|meta|img)\b[^>]*>",
        ),
        Signature::new(
            Language::Sql,
            r"(?i)\b(select\s+[\w*,\s.()]+\s+from|insert\s+into|update\s+\w+\s+set|delete\s+from|create\s+(table|index|view)|drop\s+table|alter\s+table)\b",
        ),
        Signature::new(
            Language::Json,
            r#"^\s*(\{\s*("[^"]*"\s*:|\})|\[\s*(\]|[\[{"\d-]|true|false|null))"#,
        ),
        Signature::new(
            Language::Css,
            r"(?m)^\s*[.#]?[A-Za-z_][\w-]*(\s*[,>+~]?\s*[.#:]?[\w-]+)*\s*\{\s*[\w-]+\s*:\s*[^;{}]+;?",
        ),
        Signature::new(
            Language::Markdown,
            r"(?m)^#{1,6}\s+\S|^\s*[-*+]\s+\[[ xX]\]|\[[^\]]+\]\([^)\s]+\)|^```|\*\*[^*\n]+\*\*",
        ),
    ];
}

/// Guesses the language of a snippet. Signatures are tried in order and the
/// first hit is returned; otherwise texts longer than
/// [`MIN_FALLBACK_LENGTH`] go through the keyword classifier, and anything
/// left over is plain text.
#[derive(Debug, Clone, Default)]
pub struct LanguageDetector {
    fallback: KeywordClassifier,
}

impl LanguageDetector {
    pub fn new() -> Self {
        Self {
            fallback: KeywordClassifier::new(),
        }
    }

    pub fn detect(&self, text: &str) -> Language {
        if let Some(language) = self.detect_with_patterns(text) {
            return language;
        }

        if text.trim().chars().count() > MIN_FALLBACK_LENGTH {
            if let Some(language) = self.fallback.classify(text) {
                debug!("Language {} guessed by keyword frequency", language);
                return language;
            }
        }

        Language::PlainText
    }

    pub fn detect_with_patterns(&self, text: &str) -> Option<Language> {
        SIGNATURES
            .iter()
            .find(|signature| signature.pattern.is_match(text))
            .map(|signature| signature.language)
    }
}
