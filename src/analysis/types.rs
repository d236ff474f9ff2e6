//! Analysis Result Types
//!
//! A [`FileAnalysis`] is rendered as a two-line analysis block:
//!
//! ```text
//! Имя файла: notes.txt
//! Строк: 3, Слов: 6, Символов: 35
//! ```
//!
//! The labels are kept as they were first written so that existing
//! consumers of `analysis_result.txt` keep working. A report is the blocks
//! joined by a blank line, followed by a trailing blank line.

use std::fmt;

/// Separator between blocks in a report; also terminates the report
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Raw counts for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Number of segments produced by splitting on `'\n'`
    pub lines: usize,
    /// Number of non-empty tokens between word delimiters
    pub words: usize,
    /// Number of characters (Unicode scalar values)
    pub chars: usize,
}

/// Statistics for one stored file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    /// Base name of the analyzed file
    pub filename: String,
    pub lines: usize,
    pub words: usize,
    pub chars: usize,
}

impl FileAnalysis {
    /// Attaches a file name to a set of counts.
    pub fn new(filename: impl Into<String>, stats: TextStats) -> Self {
        Self {
            filename: filename.into(),
            lines: stats.lines,
            words: stats.words,
            chars: stats.chars,
        }
    }
}

impl fmt::Display for FileAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Имя файла: {}\nСтрок: {}, Слов: {}, Символов: {}",
            self.filename, self.lines, self.words, self.chars
        )
    }
}

/// Renders analyses as a report: blocks separated and terminated by a
/// blank line.
pub fn format_report(results: &[FileAnalysis]) -> String {
    let mut report = results
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR);
    report.push_str(BLOCK_SEPARATOR);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(name: &str, lines: usize, words: usize, chars: usize) -> FileAnalysis {
        FileAnalysis::new(name, TextStats { lines, words, chars })
    }

    #[test]
    fn test_display_block() {
        let block = analysis("a.txt", 3, 6, 35).to_string();
        assert_eq!(block, "Имя файла: a.txt\nСтрок: 3, Слов: 6, Символов: 35");
    }

    #[test]
    fn test_report_single() {
        let report = format_report(&[analysis("a.txt", 1, 2, 11)]);
        assert_eq!(
            report,
            "Имя файла: a.txt\nСтрок: 1, Слов: 2, Символов: 11\n\n"
        );
    }

    #[test]
    fn test_report_multiple() {
        let report = format_report(&[analysis("a.txt", 1, 2, 3), analysis("b.txt", 4, 5, 6)]);
        assert_eq!(
            report,
            "Имя файла: a.txt\nСтрок: 1, Слов: 2, Символов: 3\n\n\
             Имя файла: b.txt\nСтрок: 4, Слов: 5, Символов: 6\n\n"
        );
    }
}
