//! Slug derivation for translation keys.
//!
//! Like the classifier, key generation is an ordered rule table evaluated
//! first-match-wins. The fallback rule always produces a slug, so the chain
//! never runs dry. Every result goes through [`finalize_slug`] which enforces
//! the `[a-z0-9_]` alphabet and the configured length bound; an empty result
//! tells the caller to leave the site for manual handling.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use super::normalize::Normalizer;
use crate::config::KeyTables;

/// Words that carry no meaning in a key.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "the", "to", "of", "is", "has", "have", "had", "been", "be", "are", "was", "were",
    "no", "not", "and", "or", "for", "in", "on", "at", "by", "with", "this", "that", "these",
    "those", "you", "how", "being", "select", "as", "both",
];

/// KeyMap value that aborts the KeyMap stage so later heuristics decide.
const FAILED_AFTER: &[&str] = &["failed_after", "_failed_after"];

/// KeyMap value that derives `<action>_permission_denied` from the text.
const PERMISSION_DENIED_AFTER: &[&str] = &["permission_denied_after", "_permission_denied_after"];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

static PERMISSION_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"permission to\s+([a-z0-9_\s]+)").unwrap());
static LEADING_TO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^to\s+([a-z0-9_\s]+)").unwrap());
static NOT_ALLOWED_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:not allowed to|forbidden to)\s+([a-z0-9_\s]+)").unwrap());
static IMAGES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bimages?\b").unwrap());
static USAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(use|usage|used|using)\b").unwrap());
static FAILURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:failed to|unable to|could not)\s+([a-z0-9_\s]+)").unwrap());

/// `(singular, plural, base)`: the singular form gets a `_single` suffix.
static SINGULAR_PLURAL: LazyLock<Vec<(Regex, Regex, &'static str)>> = LazyLock::new(|| {
    [
        ("following", "following_conversation"),
        ("typing", "typing"),
        ("online", "online"),
        ("offline", "offline"),
    ]
    .iter()
    .map(|(verb, base)| {
        (
            Regex::new(&format!(r"^is\s+{verb}")).unwrap(),
            Regex::new(&format!(r"^are\s+{verb}")).unwrap(),
            *base,
        )
    })
    .collect()
});

/// Positional context for key derivation.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyContext<'a> {
    /// The dotted group of the file; its segments are never used as action words.
    pub group: &'a str,
}

/// Input handed to every rule.
pub struct KeyInput<'a> {
    /// Raw text, trimmed but otherwise untouched.
    pub trimmed: &'a str,
    /// Normalized text.
    pub base: &'a str,
    pub context: KeyContext<'a>,
    generator: &'a KeyGenerator,
}

type RuleFn = fn(&KeyInput<'_>) -> Option<String>;

pub struct KeyRule {
    pub name: &'static str,
    derive: RuleFn,
}

/// The rule chain, in evaluation order.
pub static RULES: &[KeyRule] = &[
    KeyRule {
        name: "short-text",
        derive: short_text,
    },
    KeyRule {
        name: "empty-text",
        derive: |input| input.base.is_empty().then(|| "empty_text".to_string()),
    },
    KeyRule {
        name: "singular-plural",
        derive: singular_plural,
    },
    KeyRule {
        name: "keymap",
        derive: keymap_override,
    },
    KeyRule {
        name: "images-usage",
        derive: |input| {
            (IMAGES.is_match(input.base) && USAGE.is_match(input.base))
                .then(|| "images_usage".to_string())
        },
    },
    KeyRule {
        name: "failure-phrase",
        derive: |input| {
            let caps = FAILURE.captures(input.base)?;
            let action = significant_words(&caps[1], &[], 3);
            Some(format!("{action}_failed"))
        },
    },
    KeyRule {
        name: "no-longer-active",
        derive: |input| {
            input
                .base
                .contains("no longer active")
                .then(|| "inactive".to_string())
        },
    },
    KeyRule {
        name: "fallback",
        derive: |input| {
            let key = significant_words(input.base, &[], 4);
            Some(if key.is_empty() {
                "text".to_string()
            } else {
                key
            })
        },
    },
];

fn short_text(input: &KeyInput<'_>) -> Option<String> {
    if input.trimmed.chars().count() > 3 {
        return None;
    }
    let slug = match input.trimmed {
        "and" => "and".to_string(),
        "or" => "or".to_string(),
        "," => "comma".to_string(),
        "." => "period".to_string(),
        "!" => "exclamation".to_string(),
        "?" => "question".to_string(),
        other => other
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect(),
    };
    Some(slug)
}

fn singular_plural(input: &KeyInput<'_>) -> Option<String> {
    SINGULAR_PLURAL.iter().find_map(|(single, plural, base)| {
        if single.is_match(input.base) {
            Some(format!("{base}_single"))
        } else if plural.is_match(input.base) {
            Some(base.to_string())
        } else {
            None
        }
    })
}

fn keymap_override(input: &KeyInput<'_>) -> Option<String> {
    let base = input.base;
    for (pattern, value) in &input.generator.keymap {
        let Some(hit) = base.find(pattern.as_str()) else {
            continue;
        };
        if FAILED_AFTER.contains(&value.as_str()) {
            return None;
        }
        if PERMISSION_DENIED_AFTER.contains(&value.as_str()) {
            return Some(permission_denied(input, hit + pattern.len()));
        }
        return Some(value.clone());
    }
    None
}

/// Builds `<action>_permission_denied` from the phrase following the hit.
fn permission_denied(input: &KeyInput<'_>, after_hit: usize) -> String {
    let base = input.base;
    let action = PERMISSION_TO
        .captures(base)
        .map(|caps| caps[1].to_string())
        .or_else(|| {
            LEADING_TO
                .captures(base[after_hit..].trim())
                .map(|caps| caps[1].to_string())
        })
        .or_else(|| NOT_ALLOWED_TO.captures(base).map(|caps| caps[1].to_string()));

    let Some(action) = action else {
        return "permission_denied".to_string();
    };

    let group_words: Vec<&str> = input.context.group.split('.').collect();
    let normalized = input.generator.normalizer.normalize(&action);
    let words = significant_words(&normalized, &group_words, 2);
    if words.is_empty() {
        "action_permission_denied".to_string()
    } else {
        format!("{words}_permission_denied")
    }
}

/// Joins up to `limit` words of `text` that are neither stopwords nor excluded.
fn significant_words(text: &str, excluded: &[&str], limit: usize) -> String {
    text.split(' ')
        .filter(|w| !w.is_empty() && !STOPWORD_SET.contains(w) && !excluded.contains(w))
        .take(limit)
        .collect::<Vec<_>>()
        .join("_")
}

/// Restricts a slug to `[a-z0-9_]`, collapses underscores and bounds its length.
pub fn finalize_slug(slug: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(slug.len());
    for c in slug.chars() {
        let c = if c.is_ascii_alphanumeric() {
            c.to_ascii_lowercase()
        } else {
            '_'
        };
        if c == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(c);
    }
    out.truncate(max_len);
    out.trim_end_matches('_').to_string()
}

pub struct KeyGenerator {
    normalizer: Normalizer,
    /// KeyMap with normalized patterns; empty patterns are dropped.
    keymap: Vec<(String, String)>,
    max_len: usize,
}

impl KeyGenerator {
    pub fn new(tables: &KeyTables, max_len: usize) -> Self {
        let normalizer = Normalizer::new(&tables.synonyms);
        let keymap = tables
            .keymap
            .iter()
            .map(|(pattern, value)| (normalizer.normalize(pattern), value.clone()))
            .filter(|(pattern, _)| !pattern.is_empty())
            .collect();
        Self {
            normalizer,
            keymap,
            max_len,
        }
    }

    /// Derive the slug for `raw`. An empty string means "no usable key".
    pub fn key_from_text(&self, raw: &str, context: &KeyContext<'_>) -> String {
        self.explain(raw, context).0
    }

    /// Derive the slug and report the rule that produced it.
    pub fn explain(&self, raw: &str, context: &KeyContext<'_>) -> (String, &'static str) {
        let base = self.normalizer.normalize(raw);
        let input = KeyInput {
            trimmed: raw.trim(),
            base: &base,
            context: *context,
            generator: self,
        };

        RULES
            .iter()
            .find_map(|rule| {
                (rule.derive)(&input).map(|slug| (finalize_slug(&slug, self.max_len), rule.name))
            })
            .unwrap_or_else(|| ("text".to_string(), "fallback"))
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(&KeyTables::default(), 64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(keymap: &[(&str, &str)], synonyms: &[(&str, &str)]) -> KeyTables {
        let pairs = |entries: &[(&str, &str)]| {
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };
        KeyTables {
            keymap: pairs(keymap),
            synonyms: pairs(synonyms),
        }
    }

    fn key(raw: &str) -> String {
        KeyGenerator::default().key_from_text(raw, &KeyContext::default())
    }

    fn rule(generator: &KeyGenerator, raw: &str) -> (String, &'static str) {
        generator.explain(raw, &KeyContext { group: "room" })
    }

    #[test]
    fn test_short_text() {
        assert_eq!(key("and"), "and");
        assert_eq!(key(" or "), "or");
        assert_eq!(key(", "), "comma");
        assert_eq!(key("?"), "question");
        assert_eq!(key("OK"), "ok");
        assert_eq!(key("Hi!"), "hi");
        assert_eq!(key("..."), "");
    }

    #[test]
    fn test_empty_after_normalization() {
        let generator = KeyGenerator::default();
        assert_eq!(rule(&generator, "!!!!"), ("empty_text".to_string(), "empty-text"));
    }

    #[test]
    fn test_singular_plural() {
        assert_eq!(key("is following the conversation"), "following_conversation_single");
        assert_eq!(key("are following the conversation"), "following_conversation");
        assert_eq!(key("are typing…"), "typing");
        assert_eq!(key("is online"), "online_single");
    }

    #[test]
    fn test_keymap_override() {
        let generator = KeyGenerator::new(&tables(&[("Saved successfully", "saved")], &[]), 64);
        assert_eq!(
            rule(&generator, "Your changes were saved successfully!"),
            ("saved".to_string(), "keymap")
        );
        assert_eq!(rule(&generator, "Save Changes").1, "fallback");
    }

    #[test]
    fn test_keymap_first_entry_wins() {
        let generator = KeyGenerator::new(
            &tables(&[("invite", "invite_first"), ("invite users", "invite_second")], &[]),
            64,
        );
        assert_eq!(rule(&generator, "Invite users").0, "invite_first");
    }

    #[test]
    fn test_keymap_patterns_use_synonyms() {
        let generator = KeyGenerator::new(
            &tables(&[("upload pic", "upload_image")], &[("pic", "image")]),
            64,
        );
        assert_eq!(rule(&generator, "Upload image").0, "upload_image");
    }

    #[test]
    fn test_permission_denied_with_action() {
        let generator = KeyGenerator::new(
            &tables(&[("do not have permission", "permission_denied_after")], &[]),
            64,
        );
        assert_eq!(
            rule(&generator, "You do not have permission to invite users to this room").0,
            "invite_users_permission_denied"
        );
    }

    #[test]
    fn test_permission_denied_fallback_regexes() {
        let generator = KeyGenerator::new(
            &tables(&[("forbidden", "_permission_denied_after")], &[]),
            64,
        );
        // The phrase right after the hit starts with "to".
        assert_eq!(
            rule(&generator, "You are forbidden to kick members").0,
            "kick_members_permission_denied"
        );
        // Nothing follows: plain slug.
        assert_eq!(rule(&generator, "Forbidden").0, "permission_denied");
    }

    #[test]
    fn test_permission_denied_action_all_filtered() {
        let generator = KeyGenerator::new(
            &tables(&[("no permission", "permission_denied_after")], &[]),
            64,
        );
        // The only words left are stopwords and the group name.
        assert_eq!(
            rule(&generator, "No permission to this room").0,
            "action_permission_denied"
        );
    }

    #[test]
    fn test_failed_after_falls_through() {
        let generator = KeyGenerator::new(
            &tables(&[("failed", "failed_after"), ("upload", "upload_key")], &[]),
            64,
        );
        assert_eq!(
            rule(&generator, "Failed to upload file"),
            ("upload_file_failed".to_string(), "failure-phrase")
        );
    }

    #[test]
    fn test_heuristics() {
        assert_eq!(key("You can use images in messages"), "images_usage");
        assert_eq!(key("Could not connect to the server"), "connect_server_failed");
        assert_eq!(key("Unable to load the room list"), "load_room_list_failed");
        assert_eq!(key("This session is no longer active"), "inactive");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(key("Hello World"), "hello_world");
        assert_eq!(key("Hello {{name}}"), "hello_name");
        assert_eq!(key("Select a room to join"), "room_join");
        assert_eq!(
            key("Create new private encrypted space room"),
            "create_new_private_encrypted"
        );
        assert_eq!(key("To be or not to be"), "text");
    }

    #[test]
    fn test_length_bound() {
        let generator = KeyGenerator::new(&KeyTables::default(), 25);
        let slug = generator.key_from_text(
            "Configure notification preferences everywhere",
            &KeyContext::default(),
        );
        assert_eq!(slug, "configure_notification_pr");
    }

    #[test]
    fn test_finalize_slug() {
        assert_eq!(finalize_slug("_failed", 64), "failed");
        assert_eq!(finalize_slug("Room Name!", 64), "room_name");
        assert_eq!(finalize_slug("a.b-c", 64), "a_b_c");
        assert_eq!(finalize_slug("abcdef_ghi", 7), "abcdef");
        assert_eq!(finalize_slug("__", 64), "");
    }

    #[test]
    fn test_slugs_are_valid_and_bounded() {
        let generator = KeyGenerator::new(
            &tables(&[("Custom.Key", "Weird Value!"), ("denied", "permission_denied_after")], &[]),
            25,
        );
        let samples = [
            "Hello World",
            "Access denied to Ünïcödé rooms",
            "custom key",
            "Could not save: permission denied to edit this",
            "123 Main Street",
            "a",
            "Start a new conversation with the people you care about",
        ];
        for sample in samples {
            let slug = generator.key_from_text(sample, &KeyContext { group: "room" });
            assert!(slug.len() <= 25, "{slug:?} too long");
            assert!(
                slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "{slug:?} has invalid characters"
            );
        }
    }

    #[test]
    fn test_is_deterministic() {
        let make = || KeyGenerator::new(&tables(&[("pic", "picture")], &[("img", "image")]), 64);
        let (a, b) = (make(), make());
        for sample in ["Upload img", "Hello World", "Could not upload the pic"] {
            assert_eq!(
                a.key_from_text(sample, &KeyContext::default()),
                b.key_from_text(sample, &KeyContext::default())
            );
        }
    }
}
