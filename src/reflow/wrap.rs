/*!
 * Greedy word wrapping.
 */

/// Split text into lines of at most `width` characters, breaking between words
///
/// A width of 0 disables wrapping, as does text that already fits. Words are
/// never split: a word longer than `width` gets a line of its own. A word is
/// moved to the next line once the current line, a space, the word and one
/// trailing separator would no longer fit, so multi-word lines stay strictly
/// shorter than `width`.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let joined = words.join(" ");
    if width == 0 || joined.chars().count() <= width {
        return vec![joined];
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in words {
        let word_len = word.chars().count();

        if line_len > 0 && line_len + 1 + word_len + 1 > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }

        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }

    if line_len > 0 {
        lines.push(line);
    }

    lines
}
