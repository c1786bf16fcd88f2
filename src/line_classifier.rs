/*!
 * Per-line classification of SubRip text.
 *
 * A SubRip cue is an index line, a timing line, one or more caption lines
 * and a blank separator. The classifier does not rebuild cues; it only tags
 * each raw line so the reflow engine can drop the metadata inline. Anything
 * it does not recognize is treated as caption text.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// @const: Leading SRT timestamp (HH:MM:SS,mmm)
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}").expect("Invalid timestamp regex")
});

/// Kind of a raw subtitle line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Empty after trimming
    Blank,
    /// Cue sequence number
    Index,
    /// Cue timing line
    Timestamp,
    /// Caption text
    Content,
}

impl LineKind {
    /// Index and timestamp lines carry no caption text
    pub fn is_metadata(self) -> bool {
        matches!(self, Self::Index | Self::Timestamp)
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blank => "blank",
            Self::Index => "index",
            Self::Timestamp => "timestamp",
            Self::Content => "content",
        };
        write!(f, "{}", name)
    }
}

/// Classify a single raw line
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        LineKind::Blank
    } else if TIMESTAMP_REGEX.is_match(trimmed) {
        LineKind::Timestamp
    } else if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        LineKind::Index
    } else {
        LineKind::Content
    }
}

/// Classify every line, keeping the original text alongside its kind
pub fn classify_all<S: AsRef<str>>(lines: &[S]) -> Vec<(&str, LineKind)> {
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            (line, classify(line))
        })
        .collect()
}

/// Number of lines of each kind, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationCounts {
    pub blank: usize,
    pub index: usize,
    pub timestamp: usize,
    pub content: usize,
}

impl ClassificationCounts {
    /// Tally the kinds of the given lines
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut counts = Self::default();
        for line in lines {
            match classify(line.as_ref()) {
                LineKind::Blank => counts.blank += 1,
                LineKind::Index => counts.index += 1,
                LineKind::Timestamp => counts.timestamp += 1,
                LineKind::Content => counts.content += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.blank + self.index + self.timestamp + self.content
    }
}

impl fmt::Display for ClassificationCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} content, {} index, {} timestamp, {} blank",
            self.content, self.index, self.timestamp, self.blank
        )
    }
}
