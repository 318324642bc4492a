//! Extractive answer synthesis via sentence-level keyword scoring.
//!
//! No learned generation: candidate sentences from the context are ranked by
//! lexical overlap with the question and quoted verbatim.

use super::context::NO_INFORMATION;

/// Sentences at or below this many characters are never quoted.
const MIN_SENTENCE_CHARS: usize = 10;

/// At most this many sentences are quoted in an answer.
const MAX_ANSWER_SENTENCES: usize = 3;

/// Fixed reply when the context holds nothing relevant.
pub const NOT_AVAILABLE: &str = "The information is not available in the provided research.";

const ANSWER_HEADER: &str = "Based on available sources:";

const SUMMARY_NOTE: &str = "Overall, the available information relates to the topics listed above.";

/// Question markers that trigger the closing summary sentence, one per
/// supported language (English and Arabic).
const SUMMARY_MARKERS: [&str; 2] = ["what", "ما"];

/// Composes a ranked-extract answer from `context` for `question`.
///
/// Sentences are the `.`-delimited substrings of the context. A sentence is
/// kept when at least one distinct question term occurs in it as a substring
/// (case-insensitive) and its trimmed length exceeds `MIN_SENTENCE_CHARS`.
/// Kept sentences are sorted by match count, descending and stable, and the
/// top `MAX_ANSWER_SENTENCES` are rendered as bullets.
pub fn synthesize(context: &str, question: &str) -> String {
    if context.is_empty() || context == NO_INFORMATION {
        return NOT_AVAILABLE.to_string();
    }

    let question_lower = question.to_lowercase();
    let mut terms: Vec<&str> = Vec::new();
    for term in question_lower.split_whitespace() {
        if !terms.contains(&term) {
            terms.push(term);
        }
    }

    let mut scored: Vec<(String, usize)> = Vec::new();
    for sentence in context.split('.') {
        let sentence_lower = sentence.to_lowercase();
        let matches = terms
            .iter()
            .filter(|term| sentence_lower.contains(*term))
            .count();
        let trimmed = sentence.trim();
        if matches > 0 && trimmed.chars().count() > MIN_SENTENCE_CHARS {
            scored.push((trimmed.to_string(), matches));
        }
    }

    // sort_by is stable, so ties keep their similarity order
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    if scored.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    let mut answer = format!("{ANSWER_HEADER}\n\n");
    for (sentence, _) in scored.iter().take(MAX_ANSWER_SENTENCES) {
        answer.push_str(&format!("• {sentence}.\n"));
    }

    if SUMMARY_MARKERS
        .iter()
        .any(|marker| question_lower.contains(marker))
    {
        answer.push_str(&format!("\n{SUMMARY_NOTE}"));
    }

    answer
}
