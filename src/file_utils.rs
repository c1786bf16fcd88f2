use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Index line followed by a cue timing line
static SRT_CUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\s*\r?\n\d{2}:\d{2}:\d{2},\d{3}\s+-->\s+\d{2}:\d{2}:\d{2},\d{3}")
        .expect("Invalid SRT cue regex")
});

// @const: Characters not allowed in output file names
const UNSAFE_FILENAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Extension of cleaned transcripts
pub const TRANSCRIPT_EXTENSION: &str = "txt";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Replace characters that are not valid in file names with '-'
    pub fn sanitize_filename(title: &str) -> String {
        title
            .trim()
            .chars()
            .map(|c| if UNSAFE_FILENAME_CHARS.contains(&c) { '-' } else { c })
            .collect()
    }

    // @generates: Output path for a cleaned transcript
    // @params: output_dir, title
    pub fn generate_output_path<P: AsRef<Path>>(output_dir: P, title: &str) -> PathBuf {
        let mut output_filename = Self::sanitize_filename(title);
        output_filename.push('.');
        output_filename.push_str(TRANSCRIPT_EXTENSION);

        output_dir.as_ref().join(output_filename)
    }

    /// Find subtitle files in a directory, recursively
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::has_srt_extension(path) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a text file into lines without line terminators
    ///
    /// A leading UTF-8 byte order mark is dropped so the first cue index is
    /// still recognized.
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let content = Self::read_to_string(path)?;
        Ok(Self::split_lines(&content))
    }

    /// Split text into lines, dropping a leading byte order mark
    pub fn split_lines(content: &str) -> Vec<String> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        content.lines().map(str::to_string).collect()
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Detect whether a file holds SubRip subtitles
    ///
    /// The extension decides first; files without an `.srt` extension are
    /// recognized by the presence of a complete cue header.
    pub fn is_subtitle_file<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();

        if !Self::file_exists(path) {
            return false;
        }

        if Self::has_srt_extension(path) {
            return true;
        }

        match fs::read_to_string(path) {
            Ok(content) => content.contains("-->") && SRT_CUE_REGEX.is_match(&content),
            Err(_) => false,
        }
    }

    fn has_srt_extension(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("srt"))
            .unwrap_or(false)
    }
}
