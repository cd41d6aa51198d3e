//! Namespace and group inference from a file's location.

use std::path::Path;

use crate::{
    config::{Config, GroupMode, NamespacePrefix},
    utils::{file_stem, slugify_segment},
};

use super::data::NsGroup;

pub struct NamespaceResolver {
    prefixes: Vec<NamespacePrefix>,
    default_namespace: String,
    mode: GroupMode,
}

impl NamespaceResolver {
    pub fn new(prefixes: Vec<NamespacePrefix>, default_namespace: &str, mode: GroupMode) -> Self {
        Self {
            prefixes,
            default_namespace: default_namespace.to_string(),
            mode,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.namespaces.clone(),
            &config.default_namespace,
            config.group_mode,
        )
    }

    /// Map a source path to its namespace and group.
    ///
    /// Prefixes are tried in order and match anywhere in the path as long as
    /// a `/` follows them. Without a match the default namespace is used and
    /// the group is the slugified file stem.
    pub fn infer(&self, path: &Path) -> NsGroup {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.infer_str(&normalized)
    }

    fn infer_str(&self, path: &str) -> NsGroup {
        for entry in &self.prefixes {
            let needle = format!("{}/", entry.prefix.trim_end_matches('/'));
            let Some(idx) = path.find(&needle) else {
                continue;
            };
            let rest = &path[idx + needle.len()..];
            let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
            let dirs = &segments[..segments.len().saturating_sub(1)];

            let group = match self.mode {
                GroupMode::Nested => dirs
                    .iter()
                    .map(|dir| slugify_segment(dir))
                    .collect::<Vec<_>>()
                    .join("."),
                GroupMode::Segment => match dirs.first() {
                    Some(dir) => slugify_segment(dir),
                    None => slugify_segment(file_stem(rest)),
                },
            };
            return NsGroup::new(&entry.namespace, group);
        }

        NsGroup::new(&self.default_namespace, slugify_segment(file_stem(path)))
    }
}

impl Default for NamespaceResolver {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
