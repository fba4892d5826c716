use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::domain::models::language::Language;

/// Fewest keyword hits that count as a guess.
const MIN_KEYWORD_HITS: usize = 2;

struct KeywordProfile {
    language: Language,
    keywords: HashSet<&'static str>,
}

impl KeywordProfile {
    fn new(language: Language, keywords: &[&'static str]) -> Self {
        Self {
            language,
            keywords: keywords.iter().copied().collect(),
        }
    }
}

// Words that are common in English prose ("if", "for", "and", ...) are left
// out so that ordinary notes fall through to plain text.
lazy_static! {
    static ref PROFILES: Vec<KeywordProfile> = vec![
        KeywordProfile::new(
            Language::Go,
            &["func", "package", "import", "defer", "chan", "struct", "interface", "nil", "err", "fmt", "goroutine", "var", "return"],
        ),
        KeywordProfile::new(
            Language::Rust,
            &["fn", "let", "mut", "impl", "trait", "struct", "enum", "match", "pub", "mod", "crate", "Self", "Some", "None", "Ok", "Err", "unwrap", "loop", "return"],
        ),
        KeywordProfile::new(
            Language::Python,
            &["def", "elif", "None", "True", "False", "lambda", "self", "import", "except", "raise", "continue", "print", "len", "return", "class"],
        ),
        KeywordProfile::new(
            Language::TypeScript,
            &["interface", "implements", "readonly", "enum", "namespace", "declare", "keyof", "string", "number", "boolean", "unknown", "never", "const", "let", "return"],
        ),
        KeywordProfile::new(
            Language::JavaScript,
            &["function", "const", "let", "var", "undefined", "null", "typeof", "async", "await", "console", "document", "window", "continue", "return"],
        ),
        KeywordProfile::new(
            Language::Java,
            &["public", "private", "protected", "static", "void", "class", "extends", "implements", "final", "throws", "try", "catch", "String", "int", "return"],
        ),
        KeywordProfile::new(
            Language::Cpp,
            &["include", "std", "cout", "cin", "endl", "namespace", "template", "typename", "vector", "auto", "nullptr", "class", "int", "return"],
        ),
        KeywordProfile::new(
            Language::C,
            &["include", "printf", "scanf", "malloc", "struct", "sizeof", "typedef", "int", "char", "void", "NULL", "return"],
        ),
        KeywordProfile::new(
            Language::Php,
            &["echo", "function", "array", "foreach", "isset", "public", "private", "namespace", "return"],
        ),
        KeywordProfile::new(
            Language::Ruby,
            &["def", "end", "puts", "require", "module", "attr_accessor", "unless", "elsif", "nil", "self", "each"],
        ),
        KeywordProfile::new(
            Language::Swift,
            &["func", "let", "var", "guard", "struct", "extension", "protocol", "import", "self", "nil", "return"],
        ),
        KeywordProfile::new(
            Language::Kotlin,
            &["fun", "val", "var", "companion", "class", "import", "null", "return"],
        ),
        KeywordProfile::new(
            Language::Sql,
            &["SELECT", "FROM", "WHERE", "INSERT", "INTO", "VALUES", "UPDATE", "DELETE", "JOIN", "GROUP", "ORDER", "BY", "CREATE", "TABLE"],
        ),
    ];
}

/// Frequency-based guesser used when no signature matches: every profile is
/// scored by how many identifier tokens of the text are among its keywords.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Best-scoring language, or `None` when no profile reaches the minimum
    /// number of hits. Ties go to the profile listed first.
    pub fn classify(&self, text: &str) -> Option<Language> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return None;
        }

        let mut best: Option<(Language, usize)> = None;
        for profile in PROFILES.iter() {
            let hits = tokens
                .iter()
                .filter(|token| profile.keywords.contains(*token))
                .count();

            if hits < MIN_KEYWORD_HITS {
                continue;
            }
            match best {
                Some((_, best_hits)) if hits <= best_hits => {}
                _ => best = Some((profile.language, hits)),
            }
        }

        best.map(|(language, _)| language)
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_splits_on_punctuation() {
        assert_eq!(
            tokenize("if err != nil { return err }"),
            vec!["if", "err", "nil", "return", "err"]
        );
    }

    #[test]
    fn classifies_go_by_keyword_frequency() {
        let text = "if err != nil {\n    return nil, err\n}\ndefer conn.Close()";
        assert_eq!(KeywordClassifier::new().classify(text), Some(Language::Go));
    }

    #[test]
    fn prose_is_not_classified() {
        let text = "Remember to buy milk and bread on the way home";
        assert_eq!(KeywordClassifier::new().classify(text), None);
    }

    #[test]
    fn single_hit_is_not_enough() {
        assert_eq!(KeywordClassifier::new().classify("the print shop"), None);
    }

    #[test]
    fn ties_go_to_the_first_profile() {
        // "struct" and "return" are Go, Rust and Swift keywords alike.
        assert_eq!(
            KeywordClassifier::new().classify("struct point return"),
            Some(Language::Go)
        );
    }
}
