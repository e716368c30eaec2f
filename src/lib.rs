//! Adds "Next: <chapter>" links to the pages of a generated HTML book,
//! following the reading order of its `toc.html`.

pub mod config;
pub mod error;
pub mod panic_handler;
pub mod parsing;
pub mod patcher;
pub mod test_utils;
pub mod types;

pub use config::{Config, RewriteStrategy};
pub use error::{Error, PatchError, Result, TocError};
pub use parsing::toc_parser::TocParser;
pub use patcher::{PagePatcher, PatchOutcome, PatchSummary};
pub use types::{ChapterRef, ChapterSequence, NextLink};

/// Extracts the chapter order from `toc.html` and links every chapter page
/// to the one after it.
pub fn run(config: &Config) -> Result<PatchSummary> {
    let chapters = TocParser::load(config)?;
    let summary = PagePatcher::new(config.clone()).run(&chapters)?;
    Ok(summary)
}
