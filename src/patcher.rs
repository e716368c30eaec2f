use crate::config::{Config, RewriteStrategy};
use crate::error::PatchError;
use crate::parsing::dom;
use crate::types::{ChapterRef, ChapterSequence, NextLink};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

const BODY_CLOSE_LINE: &str = "  </body>\n";
const HTML_CLOSE_LINE: &str = "</html>\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Patched,
    AlreadyLinked,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PatchSummary {
    pub patched: Vec<PathBuf>,
    pub unchanged: Vec<PathBuf>,
}

impl PatchSummary {
    fn record(&mut self, path: PathBuf, outcome: PatchOutcome) {
        match outcome {
            PatchOutcome::Patched => self.patched.push(path),
            PatchOutcome::AlreadyLinked => self.unchanged.push(path),
        }
    }
}

/// Writes next-links into chapter pages, one read-modify-write per page.
pub struct PagePatcher {
    config: Config,
}

impl PagePatcher {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Stops at the first failing page. Pages written before it stay written.
    pub fn run(&self, chapters: &ChapterSequence) -> Result<PatchSummary, PatchError> {
        let mut summary = PatchSummary::default();
        for (chapter, link) in chapters.transitions() {
            let outcome = self.patch_page(chapter, &link)?;
            summary.record(self.config.page_path(chapter.file()), outcome);
        }
        Ok(summary)
    }

    pub fn patch_page(
        &self,
        chapter: &ChapterRef,
        link: &NextLink,
    ) -> Result<PatchOutcome, PatchError> {
        let path = self.config.page_path(chapter.file());
        let content = fs::read_to_string(&path).map_err(|source| PatchError::Io {
            path: path.clone(),
            source,
        })?;

        let rewritten = match self.config.strategy {
            RewriteStrategy::LineSplice => splice_next_link(&path, &content, link)?,
            RewriteStrategy::Structural => append_next_link(&content, link)?,
        };

        let Some(rewritten) = rewritten else {
            debug!("{} already links to {}", path.display(), link.href);
            return Ok(PatchOutcome::AlreadyLinked);
        };

        fs::write(&path, rewritten).map_err(|source| PatchError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Linked {} -> {}", path.display(), link.href);
        Ok(PatchOutcome::Patched)
    }
}

/// Inserts the link as its own line before the closing `</body>` and
/// `</html>` lines. The page must end with exactly those two lines.
///
/// `\r\n` and lone `\r` are read as `\n`, so the result always uses `\n`.
///
/// Returns `None` when the link already sits right above the tail.
pub fn splice_next_link(
    path: &Path,
    content: &str,
    link: &NextLink,
) -> Result<Option<String>, PatchError> {
    let content = normalize_newlines(content);
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let count = lines.len();

    if count < 2 || lines[count - 2..] != [BODY_CLOSE_LINE, HTML_CLOSE_LINE] {
        let line_before = if count >= 3 { lines[count - 3] } else { "" };
        return Err(PatchError::UnexpectedTail {
            path: path.to_path_buf(),
            line_before: line_before.to_string(),
        });
    }

    // The label may span several lines, so match on the whole tail.
    let link_line = format!("{}\n", link.to_html());
    if content.ends_with(&format!("{link_line}{BODY_CLOSE_LINE}{HTML_CLOSE_LINE}")) {
        return Ok(None);
    }

    let tail_start = content.len() - BODY_CLOSE_LINE.len() - HTML_CLOSE_LINE.len();
    Ok(Some(format!(
        "{}{link_line}{BODY_CLOSE_LINE}{HTML_CLOSE_LINE}",
        &content[..tail_start]
    )))
}

fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Appends the link as the last child of `<body>` and serializes the whole
/// page, writing non-breaking spaces back as `&nbsp;`.
///
/// Returns `None` when the last non-blank child of `<body>` already is the
/// link.
pub fn append_next_link(content: &str, link: &NextLink) -> Result<Option<String>, PatchError> {
    let dom = dom::parse_html(content);
    let html = dom::find_child(&dom.document, "html").ok_or(PatchError::MissingElement("html"))?;
    let body = dom::find_child(&html, "body").ok_or(PatchError::MissingElement("body"))?;

    if dom::last_significant_child(&body).is_some_and(|last| dom::is_same_link(&last, link)) {
        return Ok(None);
    }

    dom::append_child(&body, dom::new_link_element(link));
    let serialized = dom::serialize_document(&dom).map_err(PatchError::Serialize)?;
    Ok(Some(serialized.replace('\u{a0}', "&nbsp;")))
}
