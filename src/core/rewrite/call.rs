//! Rendering of the replacement lookup call.

use crate::core::data::CandidateSite;

/// Render `t('ns:group.slug', { defaultValue: '...', name: expr })` for `site`,
/// wrapped in `{...}` where the site sits in JSX markup.
pub fn render_call(lookup_function: &str, full_key: &str, site: &CandidateSite) -> String {
    let mut call = format!(
        "{lookup_function}({}, {{ defaultValue: {}",
        quote_js(full_key),
        quote_js(&site.text)
    );
    for interpolation in &site.interpolations {
        call.push_str(&format!(", {}: {}", interpolation.name, interpolation.source));
    }
    call.push_str(" })");

    if site.kind.needs_jsx_container() {
        format!("{{{call}}}")
    } else {
        call
    }
}

/// Single-quoted JavaScript string literal for `value`.
pub fn quote_js(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}
