/*!
 * Caption line normalization and repeat suppression.
 *
 * Auto-generated captions scroll: each cue tends to re-show the line the
 * previous cue ended with. Only a line identical to the last retained line is
 * suppressed; the same text reappearing after something else is kept.
 */

/// Speaker change marker used by some caption styles
pub const SPEAKER_MARKER: &str = ">>";

/// Strip one leading speaker marker and the whitespace after it
pub fn strip_speaker_marker(text: &str) -> &str {
    match text.strip_prefix(SPEAKER_MARKER) {
        Some(rest) => rest.trim(),
        None => text,
    }
}

/// Turn a content line into the text that takes part in deduplication
///
/// Returns `None` when nothing is left after trimming and marker stripping;
/// such lines never reach the dedup cursor.
pub fn content_text(line: &str, strip_marker: bool) -> Option<&str> {
    let mut text = line.trim();
    if strip_marker {
        text = strip_speaker_marker(text);
    }

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Tracks the last retained caption line
#[derive(Debug, Default, Clone)]
pub struct DedupCursor {
    last: Option<String>,
}

impl DedupCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `text` should be retained, and remembers it if so
    pub fn accept(&mut self, text: &str) -> bool {
        if self.last.as_deref() == Some(text) {
            return false;
        }
        self.last = Some(text.to_string());
        true
    }

    /// Last retained line, if any
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

/// Drop lines equal to the line immediately before them
pub fn dedup_adjacent<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut cursor = DedupCursor::new();
    lines
        .iter()
        .map(|line| line.as_ref())
        .filter(|line| cursor.accept(line))
        .map(str::to_string)
        .collect()
}
