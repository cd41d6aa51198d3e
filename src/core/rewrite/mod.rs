//! Source-to-source rewriting of UI strings into lookup calls.
//!
//! ## Pipeline
//!
//! 1. Parse the source with swc (`parsers::jsx`).
//! 2. Collect candidate sites with a read-only visitor (`collector`).
//! 3. Decide per site: classify, derive the key, record it in the
//!    [`ConversionContext`], and render the replacement call (`call`).
//! 4. Splice the replacements into the original text (`edit`).
//!
//! Splicing instead of re-printing the tree keeps every byte outside the
//! rewritten ranges identical, comments and formatting included.

mod call;
mod collector;
mod edit;


use tracing::debug;

use call::render_call;
use collector::{CollectOptions, SiteCollector};
use edit::{Edit, apply_edits};

use crate::config::{Config, KeyTables};

use super::{
    classify::TextClassifier,
    conversion::ConversionContext,
    data::{CandidateSite, ManualReason, SiteKind, TranslationKey},
    error::CodemodError,
    keygen::{KeyContext, KeyGenerator},
    parsers::jsx::parse_source,
};

/// Literal fragments that make a multi-interpolation template worth converting.
/// Case-sensitive.
const COMPLEX_TEMPLATE_TRIGGERS: &[&str] = &[
    "Space",
    "Room",
    "space",
    "room",
    "Creating",
    "create",
    "Select",
    "join",
    "already in use",
    "address",
    "name",
];

/// The conversion engine. Immutable once built; one instance can serve any
/// number of files, each with its own [`ConversionContext`].
pub struct Codemod {
    classifier: TextClassifier,
    keygen: KeyGenerator,
    translatable_attributes: Vec<String>,
    rich_text_components: Vec<String>,
    skipped_tags: Vec<String>,
    lookup_function: String,
}

impl Codemod {
    pub fn new(config: &Config, tables: &KeyTables) -> Self {
        Self {
            classifier: TextClassifier::new(
                config.structural_attributes.clone(),
                &config.lookup_function,
            ),
            keygen: KeyGenerator::new(tables, config.slug_max_length),
            translatable_attributes: config.translatable_attributes.clone(),
            rich_text_components: config.rich_text_components.clone(),
            skipped_tags: config.skipped_tags.clone(),
            lookup_function: config.lookup_function.clone(),
        }
    }

    /// Rewrite `source`, recording every decision in `ctx`.
    ///
    /// A parse failure returns an error and leaves `ctx` untouched; the source
    /// is never partially rewritten.
    pub fn transform(
        &self,
        source: &str,
        ctx: &mut ConversionContext,
    ) -> Result<String, CodemodError> {
        let parsed = parse_source(source.to_string(), &ctx.file_path)?;
        let options = CollectOptions {
            translatable_attributes: &self.translatable_attributes,
            rich_text_components: &self.rich_text_components,
            skipped_tags: &self.skipped_tags,
            lookup_function: &self.lookup_function,
        };
        let mut sites = SiteCollector::new(&parsed, &options).collect();
        // Outer sites first, so a converted template swallows its nested sites.
        sites.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

        let mut edits: Vec<Edit> = Vec::new();
        for site in &sites {
            let covered = edits.last().is_some_and(|edit| site.start < edit.end);
            if covered {
                continue;
            }
            if let Some(replacement) = self.decide(site, ctx) {
                edits.push(Edit::new(site.start, site.end, replacement));
            }
        }

        debug!(
            file = %ctx.file_path,
            candidates = sites.len(),
            converted = edits.len(),
            manual = ctx.manual.len(),
            "transformed source"
        );

        if edits.is_empty() {
            return Ok(source.to_string());
        }
        Ok(apply_edits(parsed.text(), edits))
    }

    /// Decide a single site. Returns the replacement text when it is converted.
    fn decide(&self, site: &CandidateSite, ctx: &mut ConversionContext) -> Option<String> {
        if site.kind == SiteKind::TemplateComplex && !has_complex_trigger(&site.chunks) {
            return None;
        }

        let tag = site.tag.as_deref().unwrap_or("-");
        let verdict = self.classifier.explain(&site.text, site.attr.as_ref());
        if !verdict.accepted {
            debug!(
                line = site.line,
                rule = verdict.rule,
                text = %site.text,
                tag = %tag,
                depth = site.depth,
                "rejected"
            );
            return None;
        }

        if let Some(reason) = site.ambiguity {
            ctx.flag_manual(site.line, reason, &site.text);
            return None;
        }

        let (slug, rule) = self.keygen.explain(
            &site.text,
            &KeyContext {
                group: &ctx.ns_group.group,
            },
        );
        if slug.is_empty() {
            ctx.flag_manual(site.line, ManualReason::EmptyKey, &site.text);
            return None;
        }

        let key = TranslationKey::new(&ctx.ns_group, slug);
        let full_key = key.full();
        debug!(
            line = site.line,
            rule,
            key = %full_key,
            tag = %tag,
            depth = site.depth,
            "converted"
        );
        ctx.record(site.kind, &site.text, &key.slug, &full_key, site.line);

        Some(render_call(&self.lookup_function, &full_key, site))
    }
}

fn has_complex_trigger(chunks: &[String]) -> bool {
    chunks
        .iter()
        .any(|chunk| COMPLEX_TEMPLATE_TRIGGERS.iter().any(|word| chunk.contains(word)))
}
