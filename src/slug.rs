//! Deterministic slug identifiers.
//!
//! Concept nodes and patterns are keyed by slugs derived from their display
//! text, so the same concept registered twice resolves to the same id.

/// Slugify display text into a stable identifier.
///
/// Lowercases, maps whitespace runs to single underscores, and strips every
/// character that is not alphanumeric or an underscore. The result is stable
/// across calls and platforms.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_separator = false;

    for ch in text.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_separator && !slug.is_empty() {
                slug.push('_');
                last_was_separator = true;
            }
        } else if ch.is_alphanumeric() || ch == '_' {
            // Lowercasing can expand to multiple chars, and the expansion
            // may include combining marks that are not alphanumeric.
            for lower in ch.to_lowercase().filter(|c| c.is_alphanumeric() || *c == '_') {
                slug.push(lower);
            }
            last_was_separator = false;
        }
        // Everything else (punctuation, symbols) is dropped.
    }

    // A trailing separator can appear when the text ends in punctuation.
    while slug.ends_with('_') {
        slug.pop();
    }

    slug
}
