//! Context assembly: turns retrieved passages into one bounded text block.

/// Passages at or below this many characters are discarded as noise.
const MIN_PASSAGE_CHARS: usize = 10;

/// At most this many passages make it into the context window.
const MAX_CONTEXT_PASSAGES: usize = 3;

/// Sentinel returned when nothing usable was retrieved.
pub const NO_INFORMATION: &str = "No information available.";

/// Filters, trims, and concatenates retrieved passages.
///
/// Keeps the first `MAX_CONTEXT_PASSAGES` passages longer than
/// `MIN_PASSAGE_CHARS` in their incoming (similarity) order, joined with a
/// single space. Returns [`NO_INFORMATION`] when everything is filtered out.
pub fn assemble(docs: &[String]) -> String {
    let kept: Vec<&str> = docs
        .iter()
        .map(|doc| doc.trim())
        .filter(|doc| doc.chars().count() > MIN_PASSAGE_CHARS)
        .take(MAX_CONTEXT_PASSAGES)
        .collect();

    if kept.is_empty() {
        NO_INFORMATION.to_string()
    } else {
        kept.join(" ")
    }
}
