use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = ".i18n-codemod.json";

/// Side file receiving one line per site that needs a human decision.
pub const MANUAL_LOG_FILE_NAME: &str = "i18n-codemod.manual.txt";

/// Side file receiving one line per source file actually rewritten.
pub const MODIFIED_LOG_FILE_NAME: &str = "i18n-codemod.modified.txt";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

pub const MIN_SLUG_LENGTH: usize = 8;
pub const MAX_SLUG_LENGTH: usize = 128;

/// How the group part of a key is derived from the directories below a
/// namespace prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupMode {
    /// Every intermediate directory, dot-joined: `room/timeline/X.tsx` -> `room.timeline`.
    #[default]
    Nested,
    /// Only the first directory below the prefix: `room/timeline/X.tsx` -> `room`.
    Segment,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamespacePrefix {
    pub prefix: String,
    pub namespace: String,
}

impl NamespacePrefix {
    pub fn new(prefix: &str, namespace: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            namespace: namespace.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_translatable_attributes")]
    pub translatable_attributes: Vec<String>,
    #[serde(default = "default_structural_attributes")]
    pub structural_attributes: Vec<String>,
    #[serde(default = "default_rich_text_components")]
    pub rich_text_components: Vec<String>,
    #[serde(default = "default_skipped_tags")]
    pub skipped_tags: Vec<String>,
    #[serde(default = "default_lookup_function")]
    pub lookup_function: String,
    #[serde(default)]
    pub group_mode: GroupMode,
    #[serde(default = "default_slug_max_length")]
    pub slug_max_length: usize,
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<NamespacePrefix>,
    #[serde(default = "default_keymap_path")]
    pub keymap_path: String,
    #[serde(default = "default_synonyms_path")]
    pub synonyms_path: String,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_translatable_attributes() -> Vec<String> {
    [
        "title",
        "placeholder",
        "aria-label",
        "alt",
        "label",
        "description",
        "subTitle",
    ]
    .map(String::from)
    .to_vec()
}

fn default_structural_attributes() -> Vec<String> {
    ["className", "style", "id", "name", "type", "variant", "size"]
        .map(String::from)
        .to_vec()
}

fn default_rich_text_components() -> Vec<String> {
    vec!["Trans".to_string()]
}

fn default_skipped_tags() -> Vec<String> {
    vec!["style".to_string(), "script".to_string()]
}

fn default_lookup_function() -> String {
    "t".to_string()
}

fn default_slug_max_length() -> usize {
    64
}

fn default_namespace() -> String {
    "features".to_string()
}

fn default_namespaces() -> Vec<NamespacePrefix> {
    [
        ("src/app/atoms", "atoms"),
        ("src/app/molecules", "molecules"),
        ("src/app/organisms", "organisms"),
        ("src/app/components", "components"),
        ("src/app/features", "features"),
        ("src/app/pages", "pages"),
        ("src/app/hooks", "hooks"),
        ("src/app/utils", "utils"),
        ("src/app/state", "state"),
        ("src/app/styles", "styles"),
        ("src/app/plugins", "plugins"),
        ("src/app/partials", "partials"),
        ("src/client", "client"),
        ("src/util", "util"),
        ("src/types", "types"),
    ]
    .iter()
    .map(|(prefix, namespace)| NamespacePrefix::new(prefix, namespace))
    .collect()
}

fn default_keymap_path() -> String {
    "scripts/i18n-keymap.json".to_string()
}

fn default_synonyms_path() -> String {
    "scripts/i18n-synonyms.json".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translatable_attributes: default_translatable_attributes(),
            structural_attributes: default_structural_attributes(),
            rich_text_components: default_rich_text_components(),
            skipped_tags: default_skipped_tags(),
            lookup_function: default_lookup_function(),
            group_mode: GroupMode::default(),
            slug_max_length: default_slug_max_length(),
            default_namespace: default_namespace(),
            namespaces: default_namespaces(),
            keymap_path: default_keymap_path(),
            synonyms_path: default_synonyms_path(),
            includes: default_includes(),
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns, an out-of-range slug bound,
    /// an empty lookup function name or an incomplete namespace entry.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if !(MIN_SLUG_LENGTH..=MAX_SLUG_LENGTH).contains(&self.slug_max_length) {
            bail!(
                "'slugMaxLength' must be between {} and {}, got {}",
                MIN_SLUG_LENGTH,
                MAX_SLUG_LENGTH,
                self.slug_max_length
            );
        }

        if self.lookup_function.trim().is_empty() {
            bail!("'lookupFunction' must not be empty");
        }

        if self.default_namespace.trim().is_empty() {
            bail!("'defaultNamespace' must not be empty");
        }

        for entry in &self.namespaces {
            if entry.prefix.trim().is_empty() || entry.namespace.trim().is_empty() {
                bail!(
                    "Invalid entry in 'namespaces': prefix \"{}\" -> namespace \"{}\"",
                    entry.prefix,
                    entry.namespace
                );
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory that relative paths in the config resolve against: the
    /// config file's directory, or the start directory when using defaults.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}

/// Ordered `pattern -> replacement` pairs, in file order.
pub type StringPairs = Vec<(String, String)>;

/// The optional override tables consulted by key generation.
///
/// `keymap` maps a text fragment to a slug (or a sentinel instruction),
/// `synonyms` maps an informal word to its canonical replacement. Both keep
/// the order of the JSON file because the first matching entry wins.
#[derive(Debug, Clone, Default)]
pub struct KeyTables {
    pub keymap: StringPairs,
    pub synonyms: StringPairs,
}

impl KeyTables {
    /// Load both tables, resolving the configured paths against `base_dir`.
    ///
    /// A missing file is an empty table; a file that exists but is not a JSON
    /// object is an error.
    pub fn load(config: &Config, base_dir: &Path) -> Result<Self> {
        let keymap = load_string_pairs(&base_dir.join(&config.keymap_path))?;
        let synonyms = load_string_pairs(&base_dir.join(&config.synonyms_path))?;
        debug!(
            keymap = keymap.len(),
            synonyms = synonyms.len(),
            "loaded key tables"
        );
        Ok(Self { keymap, synonyms })
    }
}

fn load_string_pairs(path: &Path) -> Result<StringPairs> {
    if !path.exists() {
        debug!(path = %path.display(), "key table not found, using empty table");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let map: Map<String, Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse key table: {}", path.display()))?;

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            other => {
                warn!(path = %path.display(), key = %key, value = %other, "skipping non-string entry");
                None
            }
        })
        .collect())
}
