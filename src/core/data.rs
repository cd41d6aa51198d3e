//! Data types shared by the rewrite pipeline.

use std::{fmt, fs, path::Path};

use super::{error::CodemodError, namespace::NamespaceResolver};

/// Syntactic position a candidate string was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteKind {
    /// `title="Save"`
    JsxAttribute,
    /// `<p>Save</p>`
    JsxText,
    /// `<p>{'Save'}</p>`
    JsxExpressionLiteral,
    /// `cond ? 'Open' : 'Close'`
    TernaryBranch,
    /// `{ text: 'Save' }`
    ObjectText,
    /// `` `Hello ${name}` ``
    TemplateSimple,
    /// `` `${a} joined ${b}` ``
    TemplateComplex,
}

impl SiteKind {
    pub fn category(self) -> Category {
        match self {
            SiteKind::JsxAttribute => Category::Attributes,
            SiteKind::JsxText => Category::TextContent,
            SiteKind::JsxExpressionLiteral => Category::JsxExpressions,
            SiteKind::TernaryBranch => Category::Conditionals,
            SiteKind::ObjectText => Category::Arrays,
            SiteKind::TemplateSimple | SiteKind::TemplateComplex => Category::Templates,
        }
    }

    /// Whether the replacement must be wrapped in a JSX expression container.
    pub fn needs_jsx_container(self) -> bool {
        matches!(self, SiteKind::JsxAttribute | SiteKind::JsxText)
    }
}

/// Reporting bucket for conversion statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Attributes,
    TextContent,
    JsxExpressions,
    Conditionals,
    Arrays,
    Templates,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Attributes,
        Category::TextContent,
        Category::JsxExpressions,
        Category::Conditionals,
        Category::Arrays,
        Category::Templates,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Attributes => write!(f, "attributes"),
            Category::TextContent => write!(f, "text content"),
            Category::JsxExpressions => write!(f, "jsx expressions"),
            Category::Conditionals => write!(f, "conditionals"),
            Category::Arrays => write!(f, "arrays"),
            Category::Templates => write!(f, "templates"),
        }
    }
}

/// Attribute a site belongs to, used by the classifier's structural rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrContext {
    pub name: String,
}

impl AttrContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An expression bound into the lookup call's options, e.g. `name: user.name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolation {
    pub name: String,
    /// Source text of the expression, copied verbatim.
    pub source: String,
}

/// Why a site was set aside for a human instead of being rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualReason {
    EmptyKey,
    SplitAroundTag,
}

impl fmt::Display for ManualReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManualReason::EmptyKey => write!(f, "empty-key-generated"),
            ManualReason::SplitAroundTag => write!(f, "split-around-tag"),
        }
    }
}

/// A located string eligible for externalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSite {
    pub kind: SiteKind,
    /// The text as it would appear in the catalog (the default value).
    pub text: String,
    pub interpolations: Vec<Interpolation>,
    /// Set when inside an attribute (directly or through its expression).
    pub attr: Option<AttrContext>,
    pub tag: Option<String>,
    pub depth: usize,
    /// Byte range in the original source that the replacement covers.
    pub start: usize,
    pub end: usize,
    /// 1-based line of `start`.
    pub line: usize,
    /// Literal chunks of a template, used by the complex-template trigger.
    pub chunks: Vec<String>,
    pub ambiguity: Option<ManualReason>,
}

impl CandidateSite {
    pub fn new(kind: SiteKind, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            interpolations: Vec::new(),
            attr: None,
            tag: None,
            depth: 0,
            start,
            end,
            line: 1,
            chunks: Vec::new(),
            ambiguity: None,
        }
    }
}

/// Namespace and group inferred from a file's location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NsGroup {
    pub namespace: String,
    pub group: String,
}

impl NsGroup {
    pub fn new(namespace: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            group: group.into(),
        }
    }
}

/// A derived lookup identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    pub namespace: String,
    pub group: String,
    pub slug: String,
}

impl TranslationKey {
    pub fn new(ns_group: &NsGroup, slug: impl Into<String>) -> Self {
        Self {
            namespace: ns_group.namespace.clone(),
            group: ns_group.group.clone(),
            slug: slug.into(),
        }
    }

    /// `namespace:group.slug`, or `namespace:slug` when the group is empty.
    pub fn full(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}:{}", self.namespace, self.slug)
        } else {
            write!(f, "{}:{}.{}", self.namespace, self.group, self.slug)
        }
    }
}

/// One accepted and rewritten site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRecord {
    pub kind: SiteKind,
    pub original: String,
    pub slug: String,
    pub full_key: String,
    pub line: usize,
}

/// One site left untouched for manual handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEntry {
    pub line: usize,
    pub reason: ManualReason,
    pub text: String,
}

/// One source file loaded for a single run.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Path as given by the caller, used in logs and reports.
    pub display_path: String,
    pub text: String,
    pub ns_group: NsGroup,
}

impl SourceUnit {
    pub fn load(
        path: &Path,
        display_path: &str,
        resolver: &NamespaceResolver,
    ) -> Result<Self, CodemodError> {
        let text = fs::read_to_string(path).map_err(|source| CodemodError::Io {
            path: display_path.to_string(),
            source,
        })?;
        Ok(Self {
            display_path: display_path.to_string(),
            text,
            ns_group: resolver.infer(path),
        })
    }
}
