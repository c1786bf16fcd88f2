/*!
 * Punctuation-based sentence segmentation.
 *
 * A sentence ends at `.`, `!` or `?` followed by whitespace. There is no
 * abbreviation handling: "Mr. Smith" becomes two sentences.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Terminal punctuation followed by a whitespace run
static SENTENCE_END_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").expect("Invalid sentence end regex")
});

/// Split text into trimmed sentences
///
/// The terminal punctuation stays attached to the sentence it closes and the
/// whitespace after it is dropped. Text without terminal punctuation comes
/// back as a single sentence; empty input yields no sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_END_REGEX.find_iter(text) {
        // the punctuation is a single ASCII byte
        let end = boundary.start() + 1;
        push_trimmed(&mut sentences, &text[start..end]);
        start = boundary.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}
