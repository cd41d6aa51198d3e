//! Canonical token stream for key derivation.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::config::StringPairs;

static NON_KEY_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

struct Synonym {
    pattern: Regex,
    replacement: String,
}

/// Lowercases text, applies whole-word synonyms, and reduces it to
/// space-separated `[a-z0-9]` words.
#[derive(Default)]
pub struct Normalizer {
    synonyms: Vec<Synonym>,
}

impl Normalizer {
    pub fn new(synonyms: &StringPairs) -> Self {
        let synonyms = synonyms
            .iter()
            .filter_map(|(word, replacement)| {
                let source = format!(r"(?i)\b{}\b", regex::escape(word));
                match Regex::new(&source) {
                    Ok(pattern) => Some(Synonym {
                        pattern,
                        replacement: replacement.clone(),
                    }),
                    Err(err) => {
                        warn!(word = %word, error = %err, "skipping unusable synonym");
                        None
                    }
                }
            })
            .collect();
        Self { synonyms }
    }

    pub fn normalize(&self, raw: &str) -> String {
        let mut text = raw.to_lowercase();
        for synonym in &self.synonyms {
            // NoExpand keeps `$` in replacements literal.
            text = synonym
                .pattern
                .replace_all(&text, regex::NoExpand(&synonym.replacement))
                .into_owned();
        }
        let text = text.to_lowercase();
        let text = NON_KEY_CHARS.replace_all(&text, " ");
        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }
}
