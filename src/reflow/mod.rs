/*!
 * Transcript reflow engine.
 *
 * Turns classified SubRip lines into readable text in one pass:
 * - Speaker marker stripping and adjacent-repeat suppression (`dedup`)
 * - Optional paragraph grouping at blank lines
 * - Sentence segmentation (`sentences`)
 * - Width wrapping (`wrap`)
 *
 * The engine is a pure function of its input lines and options. It never
 * fails on malformed subtitles: unrecognized lines are treated as text.
 */

pub mod dedup;
pub mod sentences;
pub mod wrap;

use log::debug;

use crate::errors::ReflowError;
use crate::line_classifier::{classify, LineKind};

pub use dedup::{content_text, dedup_adjacent, strip_speaker_marker, DedupCursor};
pub use sentences::split_sentences;
pub use wrap::wrap_words;

/// Options controlling how the transcript is reassembled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflowOptions {
    /// Flush a paragraph at every blank source line instead of flattening
    pub group_by_blank_line: bool,

    /// Maximum output line width in characters (0 disables wrapping)
    pub wrap_width: usize,

    /// Strip a leading `>>` speaker marker from caption lines
    pub strip_speaker_marker: bool,

    /// Break the text into sentences at terminal punctuation
    ///
    /// Unset means "only when not grouping by paragraph": paragraphs keep
    /// their sentences together unless splitting is asked for.
    pub split_sentences: Option<bool>,
}

impl Default for ReflowOptions {
    fn default() -> Self {
        Self {
            group_by_blank_line: false,
            wrap_width: 0,
            strip_speaker_marker: true,
            split_sentences: None,
        }
    }
}

impl ReflowOptions {
    /// Validate a user-supplied wrap width
    pub fn checked_wrap_width(width: i64) -> Result<usize, ReflowError> {
        usize::try_from(width).map_err(|_| ReflowError::NegativeWrapWidth(width))
    }

    /// Set the wrap width from a signed value, rejecting negatives
    pub fn with_wrap_width(mut self, width: i64) -> Result<Self, ReflowError> {
        self.wrap_width = Self::checked_wrap_width(width)?;
        Ok(self)
    }

    pub fn with_paragraphs(mut self, group_by_blank_line: bool) -> Self {
        self.group_by_blank_line = group_by_blank_line;
        self
    }

    pub fn with_speaker_markers_stripped(mut self, strip: bool) -> Self {
        self.strip_speaker_marker = strip;
        self
    }

    pub fn with_sentences(mut self, split: bool) -> Self {
        self.split_sentences = Some(split);
        self
    }

    /// Whether sentence segmentation is in effect for these options
    pub fn sentences_enabled(&self) -> bool {
        self.split_sentences.unwrap_or(!self.group_by_blank_line)
    }
}

/// A unit of output: a sentence or a paragraph, possibly wrapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBlock {
    lines: Vec<String>,
}

impl OutputBlock {
    fn from_lines(lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            None
        } else {
            Some(Self { lines })
        }
    }

    /// Wrapped lines of this block (a single line when not wrapped)
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Block text with its lines joined by newlines
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Words of this block in order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().flat_map(|line| line.split_whitespace())
    }
}

/// Counters collected while reflowing, for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReflowStats {
    /// Lines classified as content
    pub content_lines: usize,
    /// Content lines that were empty after marker stripping
    pub empty_lines: usize,
    /// Lines dropped as immediate repeats
    pub duplicate_lines: usize,
    /// Lines that made it into the transcript
    pub retained_lines: usize,
    /// Paragraph groups formed
    pub groups: usize,
}

/// Cleaned transcript, ready to render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    blocks: Vec<OutputBlock>,
    stats: ReflowStats,
}

impl Transcript {
    pub fn blocks(&self) -> &[OutputBlock] {
        &self.blocks
    }

    pub fn stats(&self) -> ReflowStats {
        self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of words across all blocks
    pub fn word_count(&self) -> usize {
        self.blocks.iter().map(|block| block.words().count()).sum()
    }

    /// Render the final document
    ///
    /// Blocks are separated by a blank line and a non-empty document ends
    /// with a single newline. No blocks renders as the empty string.
    pub fn render(&self) -> String {
        if self.blocks.is_empty() {
            return String::new();
        }

        let mut output = self
            .blocks
            .iter()
            .map(OutputBlock::text)
            .collect::<Vec<_>>()
            .join("\n\n");
        output.push('\n');
        output
    }
}

/// Single-pass reflow engine
#[derive(Debug, Clone, Default)]
pub struct ReflowEngine {
    options: ReflowOptions,
}

impl ReflowEngine {
    pub fn new(options: ReflowOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReflowOptions {
        &self.options
    }

    /// Reflow raw subtitle lines into a transcript
    pub fn reflow<S: AsRef<str>>(&self, lines: &[S]) -> Transcript {
        let mut stats = ReflowStats::default();
        let groups = self.collect_groups(lines, &mut stats);
        stats.groups = groups.len();

        let blocks: Vec<OutputBlock> = if self.options.group_by_blank_line {
            groups
                .iter()
                .filter_map(|group| self.paragraph_block(&join_words(group)))
                .collect()
        } else {
            let stream: Vec<String> = groups.into_iter().flatten().collect();
            self.flat_blocks(&join_words(&stream))
        };

        debug!(
            "Reflow: {} content lines, {} retained, {} repeats dropped, {} empty, {} blocks",
            stats.content_lines,
            stats.retained_lines,
            stats.duplicate_lines,
            stats.empty_lines,
            blocks.len()
        );

        Transcript { blocks, stats }
    }

    /// Classify, strip and deduplicate, grouping at blank lines when asked
    fn collect_groups<S: AsRef<str>>(&self, lines: &[S], stats: &mut ReflowStats) -> Vec<Vec<String>> {
        let mut cursor = DedupCursor::new();
        let mut groups = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for line in lines {
            let line = line.as_ref();
            match classify(line) {
                LineKind::Blank => {
                    if self.options.group_by_blank_line && !current.is_empty() {
                        groups.push(std::mem::take(&mut current));
                    }
                }
                LineKind::Index | LineKind::Timestamp => {}
                LineKind::Content => {
                    stats.content_lines += 1;
                    let Some(text) = content_text(line, self.options.strip_speaker_marker) else {
                        stats.empty_lines += 1;
                        continue;
                    };

                    if cursor.accept(text) {
                        stats.retained_lines += 1;
                        current.push(text.to_string());
                    } else {
                        stats.duplicate_lines += 1;
                    }
                }
            }
        }

        if !current.is_empty() {
            groups.push(current);
        }

        groups
    }

    /// Blocks for the flattened stream: one per sentence, or one overall
    fn flat_blocks(&self, stream: &str) -> Vec<OutputBlock> {
        if self.options.sentences_enabled() {
            split_sentences(stream)
                .iter()
                .filter_map(|sentence| OutputBlock::from_lines(self.wrap(sentence)))
                .collect()
        } else {
            OutputBlock::from_lines(self.wrap(stream)).into_iter().collect()
        }
    }

    /// One block per paragraph; sentences go on their own lines when split
    fn paragraph_block(&self, paragraph: &str) -> Option<OutputBlock> {
        let lines = if self.options.sentences_enabled() {
            split_sentences(paragraph)
                .iter()
                .flat_map(|sentence| self.wrap(sentence))
                .collect()
        } else {
            self.wrap(paragraph)
        };
        OutputBlock::from_lines(lines)
    }

    fn wrap(&self, text: &str) -> Vec<String> {
        wrap_words(text, self.options.wrap_width)
    }
}

/// Join caption lines into one stream with single spaces between words
fn join_words<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .flat_map(|line| line.as_ref().split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean raw SubRip lines into readable text
pub fn clean_transcript<S: AsRef<str>>(lines: &[S], options: &ReflowOptions) -> String {
    ReflowEngine::new(options.clone()).reflow(lines).render()
}
