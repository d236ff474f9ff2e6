//! Text Analysis Module
//!
//! Turns stored files into line/word/character counts and renders them as
//! analysis blocks.
//!
//! ## Modules
//!
//! - `analyzer`: Counting rules and the concurrent [`TextAnalyzer`]
//! - `types`: [`FileAnalysis`] and report formatting
//!
//! ## Example
//!
//! ```
//! use filestat::analysis::{analyze_text, format_report, FileAnalysis};
//!
//! let stats = analyze_text("Hello world\nSecond line\nThird line!");
//! assert_eq!((stats.lines, stats.words, stats.chars), (3, 6, 35));
//!
//! let report = format_report(&[FileAnalysis::new("a.txt", stats)]);
//! assert!(report.ends_with("\n\n"));
//! ```

pub mod analyzer;
pub mod types;

// Re-export commonly used items for convenience
pub use analyzer::{
    analyze_bytes, analyze_text, count_lines, count_words, tokenize, AnalysisError, TextAnalyzer,
    WORD_DELIMITERS,
};
pub use types::{format_report, FileAnalysis, TextStats, BLOCK_SEPARATOR};
