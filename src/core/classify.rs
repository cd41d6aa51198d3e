//! Decides whether a string literal is human-facing text.
//!
//! The classifier is an ordered table of rules. Each rule either gives a
//! verdict or passes; the first verdict wins. The chain is biased towards
//! accepting: a false positive costs a reviewer a glance, a false negative
//! leaves text untranslated.

use std::sync::LazyLock;

use regex::Regex;

use super::data::AttrContext;

/// Characters that may make up a "punctuation only" string.
const PUNCTUATION: &str = ".,!?;:()[]{}\"'`~@#$%^&*+=|\\/<>";

/// Common UI words. A short string containing one of these is accepted.
const UI_WORDS: &[&str] = &[
    "create", "edit", "delete", "save", "cancel", "close", "open", "add", "remove", "select",
    "choose", "enable", "disable", "show", "hide", "search", "filter", "sort", "refresh",
    "update", "submit", "reset", "back", "next", "previous", "first", "last", "home",
    "settings", "profile", "account", "user", "admin", "guest", "public", "private", "space",
    "room", "message", "notification", "error", "warning", "info", "success", "loading",
    "processing", "waiting", "ready", "online", "offline", "active", "inactive", "visible",
    "hidden", "enabled", "disabled", "required", "optional", "valid", "invalid", "empty",
    "full", "new", "old", "current", "all", "none", "some", "many", "few", "more", "less",
    "most", "least", "best", "good", "bad", "yes", "no", "ok", "confirm", "deny", "accept",
    "reject", "allow", "grant", "revoke", "lock", "unlock", "secure", "shared", "personal",
    "global", "local", "remote", "incoming", "outgoing", "upload", "download", "import",
    "export", "copy", "paste", "cut", "undo", "redo", "zoom", "move", "resize", "left",
    "right", "top", "bottom", "start", "end", "begin", "finish", "complete", "done",
    "pending", "scheduled", "expired", "collapsed", "expanded", "selected", "checked",
    "pinned", "archived", "deleted", "restored", "copied", "renamed", "created", "updated",
    "changed", "added", "removed", "cleared", "connected", "disconnected", "joined", "left",
    "opened", "closed", "started", "stopped", "paused", "failed", "completed", "available",
    "unavailable", "restricted", "limited", "unlimited", "free", "basic", "advanced",
    "important", "urgent", "unknown", "manual", "automatic",
];

static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^</?[a-z][a-z0-9]*>$").unwrap());

/// Input handed to every rule.
pub struct ClassifyInput<'a> {
    pub text: &'a str,
    pub attr: Option<&'a AttrContext>,
    pub structural_attributes: &'a [String],
    pub lookup_function: &'a str,
}

type RuleFn = fn(&ClassifyInput<'_>) -> Option<bool>;

/// One entry of the rule chain.
pub struct ClassifyRule {
    pub name: &'static str,
    check: RuleFn,
}

/// The rule chain, in evaluation order.
pub static RULES: &[ClassifyRule] = &[
    ClassifyRule {
        name: "too-short",
        check: |input| (input.text.chars().count() <= 1).then_some(false),
    },
    ClassifyRule {
        name: "separator",
        check: |input| (input.text.contains("__") || input.text.contains("--")).then_some(false),
    },
    ClassifyRule {
        name: "single-punctuation",
        check: |input| {
            let mut chars = input.text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if PUNCTUATION.contains(c) => Some(false),
                _ => None,
            }
        },
    },
    ClassifyRule {
        name: "numeric",
        check: |input| NUMERIC_REGEX.is_match(input.text).then_some(false),
    },
    ClassifyRule {
        name: "html-tag",
        check: |input| TAG_REGEX.is_match(input.text).then_some(false),
    },
    ClassifyRule {
        name: "structural-attribute",
        check: |input| {
            let attr = input.attr?;
            let structural = input.structural_attributes.contains(&attr.name);
            (structural && !input.text.contains(' ') && input.text.chars().count() < 10)
                .then_some(false)
        },
    },
    ClassifyRule {
        name: "code-fragment",
        check: |input| {
            let text = input.text;
            let lookup_call = format!("{}(", input.lookup_function);
            (text.starts_with("ERROR:")
                || text.starts_with("M_")
                || text.contains("console.")
                || text.starts_with(&lookup_call))
            .then_some(false)
        },
    },
    ClassifyRule {
        name: "has-space",
        check: |input| input.text.contains(' ').then_some(true),
    },
    ClassifyRule {
        name: "capitalized",
        check: |input| {
            input
                .text
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase())
                .then_some(true)
        },
    },
    ClassifyRule {
        name: "ui-word",
        check: |input| {
            let lower = input.text.to_lowercase();
            UI_WORDS
                .iter()
                .any(|word| lower.contains(word))
                .then_some(true)
        },
    },
    ClassifyRule {
        name: "wordlike",
        check: |input| {
            let symbols_only = input
                .text
                .chars()
                .all(|c| c.is_ascii_digit() || PUNCTUATION.contains(c));
            (input.text.chars().count() > 2 && !symbols_only).then_some(true)
        },
    },
];

/// Outcome of classifying one string, with the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub accepted: bool,
    pub rule: &'static str,
}

/// Rule name reported when no rule in the chain gives a verdict.
pub const FALLBACK_RULE: &str = "no-match";

pub struct TextClassifier {
    structural_attributes: Vec<String>,
    lookup_function: String,
}

impl TextClassifier {
    pub fn new(structural_attributes: Vec<String>, lookup_function: impl Into<String>) -> Self {
        Self {
            structural_attributes,
            lookup_function: lookup_function.into(),
        }
    }

    pub fn should_translate(&self, text: &str, attr: Option<&AttrContext>) -> bool {
        self.explain(text, attr).accepted
    }

    /// Run the chain and report which rule decided.
    pub fn explain(&self, text: &str, attr: Option<&AttrContext>) -> Verdict {
        let input = ClassifyInput {
            text,
            attr,
            structural_attributes: &self.structural_attributes,
            lookup_function: &self.lookup_function,
        };

        RULES
            .iter()
            .find_map(|rule| {
                (rule.check)(&input).map(|accepted| Verdict {
                    accepted,
                    rule: rule.name,
                })
            })
            .unwrap_or(Verdict {
                accepted: false,
                rule: FALLBACK_RULE,
            })
    }
}

impl Default for TextClassifier {
    fn default() -> Self {
        let structural = ["className", "style", "id", "name", "type", "variant", "size"]
            .map(String::from)
            .to_vec();
        Self::new(structural, "t")
    }
}
