/*!
 * Mock subtitle sources for testing
 *
 * These implement the SubtitleSource trait with canned titles and lines so
 * controller tests never start yt-dlp.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use cleansrt::errors::SourceError;
use cleansrt::subtitle_source::SubtitleSource;

/// Type of failure to simulate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Title lookup fails
    Title,
    /// Subtitle download fails
    Fetch,
}

/// Source returning predetermined data
#[derive(Debug)]
pub struct MockSource {
    pub title: String,
    pub lines: Vec<String>,
    pub failure: Option<MockFailure>,
    /// Number of fetch_lines calls made
    pub fetch_calls: AtomicUsize,
}

impl MockSource {
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: content.lines().map(str::to_string).collect(),
            failure: None,
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(title: &str, failure: MockFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(title, "")
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubtitleSource for MockSource {
    fn describe(&self) -> String {
        format!("mock {}", self.title)
    }

    async fn title(&self) -> Result<String, SourceError> {
        if self.failure == Some(MockFailure::Title) {
            return Err(SourceError::EmptyTitle);
        }
        Ok(self.title.clone())
    }

    async fn fetch_lines(&self) -> Result<Vec<String>, SourceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.failure == Some(MockFailure::Fetch) {
            return Err(SourceError::ToolFailed {
                tool: "mock".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "ERROR: Video unavailable".to_string(),
            });
        }
        Ok(self.lines.clone())
    }
}
