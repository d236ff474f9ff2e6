//! Text Analyzer
//!
//! Computes line, word and character counts for a batch of stored files.
//!
//! ## Counting Rules
//!
//! - **Lines**: the number of segments after splitting on `'\n'`. A file with
//!   `k` line feeds always reports `k + 1` lines, so a trailing newline adds
//!   an (empty) line.
//! - **Words**: non-empty tokens after splitting on [`WORD_DELIMITERS`].
//! - **Characters**: Unicode scalar values of the decoded text.
//!
//! Content is decoded as UTF-8; invalid sequences become U+FFFD and a
//! leading byte order mark is dropped.
//!
//! ## Concurrency
//!
//! ```text
//!              ┌── task: read + count file 1 ──┐
//! analyze() ───┼── task: read + count file 2 ──┼──> join ──> Vec<FileAnalysis>
//!              └── task: read + count file N ──┘
//! ```
//!
//! Results come back in completion order. The first failing file aborts
//! the whole batch; the remaining tasks are cancelled.

use crate::analysis::types::{FileAnalysis, TextStats};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::debug;

/// Characters that separate words
pub const WORD_DELIMITERS: [char; 13] = [
    ' ', ',', '.', ':', ';', '?', '!', '(', ')', '`', '\n', '\r', '\t',
];

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Errors that can occur while analyzing files.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// One or more input paths are not existing files
    #[error("files not found:\n{}", display_paths(.0))]
    FilesNotFound(Vec<PathBuf>),

    /// A file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An analysis task panicked or was cancelled
    #[error("analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Analyzes a validated batch of files.
///
/// # Example
///
/// ```ignore
/// use filestat::analysis::TextAnalyzer;
///
/// let analyzer = TextAnalyzer::new(paths).await?;
/// let results = analyzer.analyze().await?;
/// ```
#[derive(Debug)]
pub struct TextAnalyzer {
    paths: Vec<PathBuf>,
}

impl TextAnalyzer {
    /// Creates an analyzer after checking that every path is an existing
    /// file.
    ///
    /// All paths are checked before anything is read. If any are missing the
    /// error lists every one of them.
    pub async fn new(paths: Vec<PathBuf>) -> Result<Self, AnalysisError> {
        let mut missing = Vec::new();
        for path in &paths {
            if !is_file(path).await {
                missing.push(path.clone());
            }
        }

        if !missing.is_empty() {
            return Err(AnalysisError::FilesNotFound(missing));
        }

        Ok(Self { paths })
    }

    /// Analyzes every file concurrently.
    pub async fn analyze(self) -> Result<Vec<FileAnalysis>, AnalysisError> {
        let mut tasks = JoinSet::new();
        for path in self.paths {
            tasks.spawn(analyze_file(path));
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            // Returning early drops `tasks`, which aborts the rest
            results.push(joined??);
        }

        Ok(results)
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Reads one file and counts it on the blocking pool.
async fn analyze_file(path: PathBuf) -> Result<FileAnalysis, AnalysisError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| AnalysisError::Read {
            path: path.clone(),
            source,
        })?;

    let stats = tokio::task::spawn_blocking(move || analyze_bytes(&bytes)).await?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!(
        file = %filename,
        lines = stats.lines,
        words = stats.words,
        chars = stats.chars,
        "File analyzed"
    );

    Ok(FileAnalysis::new(filename, stats))
}

/// Decodes raw file content and counts it.
pub fn analyze_bytes(bytes: &[u8]) -> TextStats {
    let text = String::from_utf8_lossy(bytes);
    analyze_text(text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(&*text))
}

/// Counts lines, words and characters of `text`.
pub fn analyze_text(text: &str) -> TextStats {
    TextStats {
        lines: count_lines(text),
        words: count_words(text),
        chars: text.chars().count(),
    }
}

/// Number of segments produced by splitting on `'\n'`.
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Splits `text` into non-empty words.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(WORD_DELIMITERS).filter(|token| !token.is_empty())
}

/// Number of non-empty words in `text`.
pub fn count_words(text: &str) -> usize {
    tokenize(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "Hello world\nSecond line\nThird line!";

    #[test]
    fn test_sample_counts() {
        let stats = analyze_text(SAMPLE);
        assert_eq!(
            stats,
            TextStats {
                lines: 3,
                words: 6,
                chars: 35
            }
        );
    }

    #[test]
    fn test_line_count_is_newlines_plus_one() {
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("one"), 1);
        assert_eq!(count_lines("one\n"), 2);
        assert_eq!(count_lines("one\ntwo"), 2);
        assert_eq!(count_lines("\n\n\n"), 4);
        assert_eq!(count_lines("a\r\nb\r\n"), 3);
    }

    #[test]
    fn test_word_delimiters() {
        let words: Vec<&str> = tokenize("a,b.c:d;e?f!g(h)i`j k\nl\rm\tn").collect();
        assert_eq!(
            words,
            ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n"]
        );
    }

    #[test]
    fn test_runs_of_delimiters_produce_no_empty_words() {
        assert_eq!(count_words("  ,,  hello...   world!!!  "), 2);
        assert_eq!(count_words(" \t\r\n"), 0);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn test_other_punctuation_is_part_of_words() {
        let words: Vec<&str> = tokenize("don't re-use \"quoted\"").collect();
        assert_eq!(words, ["don't", "re-use", "\"quoted\""]);
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let text = "Привет, мир! (tokens) `code`; a.b.c\n\tend?";
        let tokens: Vec<&str> = tokenize(text).collect();
        let retokenized: Vec<&str> = tokens.iter().flat_map(|t| tokenize(t)).collect();
        assert_eq!(tokens, retokenized);
    }

    #[test]
    fn test_chars_not_bytes() {
        let stats = analyze_text("Привет мир");
        assert_eq!(stats.chars, 10);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_analyze_bytes_strips_bom() {
        let mut bytes = "\u{FEFF}".as_bytes().to_vec();
        bytes.extend_from_slice(b"abc");
        assert_eq!(analyze_bytes(&bytes).chars, 3);
    }

    #[test]
    fn test_analyze_bytes_replaces_invalid_utf8() {
        let stats = analyze_bytes(&[b'a', 0xff, b'b']);
        assert_eq!(stats.chars, 3);
        assert_eq!(stats.words, 1);
    }

    #[tokio::test]
    async fn test_analyze_files() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, SAMPLE).unwrap();
        std::fs::write(&second, "Hello world\nNew line").unwrap();

        let analyzer = TextAnalyzer::new(vec![first, second]).await.unwrap();
        let mut results = analyzer.analyze().await.unwrap();
        results.sort_by(|a, b| a.filename.cmp(&b.filename));

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].filename, "first.txt");
        assert_eq!((results[0].lines, results[0].words, results[0].chars), (3, 6, 35));
        assert_eq!(results[1].filename, "second.txt");
        assert_eq!((results[1].lines, results[1].words, results[1].chars), (2, 4, 20));
    }

    #[tokio::test]
    async fn test_many_files_fan_out() {
        let dir = TempDir::new().unwrap();
        let paths: Vec<PathBuf> = (0..50)
            .map(|i| {
                let path = dir.path().join(format!("{i}.txt"));
                std::fs::write(&path, "word ".repeat(i + 1)).unwrap();
                path
            })
            .collect();

        let results = TextAnalyzer::new(paths).await.unwrap().analyze().await.unwrap();

        assert_eq!(results.len(), 50);
        for result in results {
            let i: usize = result.filename.trim_end_matches(".txt").parse().unwrap();
            assert_eq!(result.words, i + 1);
        }
    }

    #[tokio::test]
    async fn test_missing_files_are_all_reported() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("present.txt");
        std::fs::write(&present, "x").unwrap();
        let gone_a = dir.path().join("gone_a.txt");
        let gone_b = dir.path().join("gone_b.txt");

        let err = TextAnalyzer::new(vec![gone_a.clone(), present, gone_b.clone()])
            .await
            .unwrap_err();

        match err {
            AnalysisError::FilesNotFound(missing) => assert_eq!(missing, vec![gone_a, gone_b]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let err = TextAnalyzer::new(vec![dir.path().to_path_buf()])
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::FilesNotFound(_)));
        assert!(err.to_string().starts_with("files not found:\n"));
    }

    #[tokio::test]
    async fn test_file_removed_after_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short-lived.txt");
        std::fs::write(&path, "x").unwrap();

        let analyzer = TextAnalyzer::new(vec![path.clone()]).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = analyzer.analyze().await.unwrap_err();
        assert!(matches!(err, AnalysisError::Read { .. }));
    }
}
