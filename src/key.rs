//! Lookup key composition.

/// Separator between context and source text in a composed key (U+0004).
///
/// Part of the wire contract: runtimes compose `context + "\u{4}" + source`
/// before hashing, so changing this breaks every existing lookup.
pub const CONTEXT_SEPARATOR: char = '\u{4}';

/// Builds the lookup key for `source_text` under an optional `context_text`.
///
/// An empty context means "no context" and yields the source text unchanged.
///
/// # Examples
/// ```
/// use ymo_index::key::compose_key;
///
/// assert_eq!(compose_key("hello", ""), "hello");
/// assert_eq!(compose_key("hello", "menu"), "menu\u{4}hello");
/// ```
#[must_use]
pub fn compose_key(source_text: &str, context_text: &str) -> String {
    if context_text.is_empty() {
        return source_text.to_string();
    }

    let mut key = String::with_capacity(context_text.len() + 1 + source_text.len());
    key.push_str(context_text);
    key.push(CONTEXT_SEPARATOR);
    key.push_str(source_text);
    key
}
