//! Per-run bookkeeping for the rewrite pass.
//!
//! A [`ConversionContext`] lives for exactly one file. The rewriter records
//! every converted site and every site it set aside; the CLI reads the
//! context afterwards to print the report and write the side files.

use std::collections::{HashMap, HashSet};

use super::data::{Category, ConversionRecord, ManualEntry, ManualReason, NsGroup, SiteKind};

/// Per-category conversion counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    counts: HashMap<Category, usize>,
}

impl Statistics {
    pub fn increment(&mut self, category: Category) {
        *self.counts.entry(category).or_default() += 1;
    }

    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Two distinct source texts that were given the same full key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub full_key: String,
    /// Text of the first site that used the key.
    pub first_text: String,
    pub other_text: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ConversionContext {
    pub file_path: String,
    pub ns_group: NsGroup,
    pub stats: Statistics,
    pub records: Vec<ConversionRecord>,
    pub manual: Vec<ManualEntry>,
    pub collisions: Vec<KeyCollision>,
    first_text_by_key: HashMap<String, String>,
}

impl ConversionContext {
    pub fn new(file_path: impl Into<String>, ns_group: NsGroup) -> Self {
        Self {
            file_path: file_path.into(),
            ns_group,
            ..Self::default()
        }
    }

    /// Record one rewritten site. A distinct text landing on a key that is
    /// already taken is remembered as a collision; the rewrite still stands.
    pub fn record(&mut self, kind: SiteKind, original: &str, slug: &str, full_key: &str, line: usize) {
        self.stats.increment(kind.category());

        match self.first_text_by_key.get(full_key) {
            Some(first) if first != original => {
                let already_reported = self
                    .collisions
                    .iter()
                    .any(|c| c.full_key == full_key && c.other_text == original);
                if !already_reported {
                    self.collisions.push(KeyCollision {
                        full_key: full_key.to_string(),
                        first_text: first.clone(),
                        other_text: original.to_string(),
                        line,
                    });
                }
            }
            Some(_) => {}
            None => {
                self.first_text_by_key
                    .insert(full_key.to_string(), original.to_string());
            }
        }

        self.records.push(ConversionRecord {
            kind,
            original: original.to_string(),
            slug: slug.to_string(),
            full_key: full_key.to_string(),
            line,
        });
    }

    pub fn flag_manual(&mut self, line: usize, reason: ManualReason, text: &str) {
        self.manual.push(ManualEntry {
            line,
            reason,
            text: text.to_string(),
        });
    }

    /// Records deduplicated by full key, first occurrence wins.
    pub fn unique_records(&self) -> Vec<&ConversionRecord> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|record| seen.insert(record.full_key.as_str()))
            .collect()
    }

    pub fn has_changes(&self) -> bool {
        !self.records.is_empty()
    }
}
