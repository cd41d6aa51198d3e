//! Common utility functions shared across the codebase.

/// Turns a path segment into a group-safe identifier.
///
/// camelCase boundaries become underscores, anything outside `[a-z0-9_-]`
/// becomes an underscore, and runs of underscores collapse to one.
///
/// # Examples
///
/// ```
/// use i18n_codemod::utils::slugify_segment;
///
/// assert_eq!(slugify_segment("RoomTimeline"), "room_timeline");
/// assert_eq!(slugify_segment("create-room"), "create-room");
/// assert_eq!(slugify_segment("Button.test"), "button_test");
/// ```
pub fn slugify_segment(segment: &str) -> String {
    let mut snake = String::with_capacity(segment.len() + 4);
    for (idx, c) in segment.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if idx != 0 {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }

    let mut slug = String::with_capacity(snake.len());
    for c in snake.chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-' {
            c
        } else {
            '_'
        };
        if c == '_' && slug.ends_with('_') {
            continue;
        }
        slug.push(c);
    }
    slug
}

/// Characters JSX treats as collapsible whitespace in text children.
pub const JSX_WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

/// Collapses every run of JSX whitespace (including line breaks) into a
/// single space and trims both ends. Non-breaking spaces are kept.
///
/// # Examples
///
/// ```
/// use i18n_codemod::utils::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Hello\n      World  "), "Hello World");
/// assert_eq!(collapse_whitespace("Jerry\u{a0}rock"), "Jerry\u{a0}rock");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split(JSX_WHITESPACE)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the file stem of a `/`-separated path.
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}
