use std::collections::HashSet;
use std::fmt;

pub const NEXT_PREFIX: &str = "Next: ";

/// Split href into path and anchor components
pub fn split_href_and_anchor(href: &str) -> (&str, Option<&str>) {
    match href.split_once('#') {
        Some((path, anchor)) => (path, Some(anchor)),
        None => (href, None),
    }
}

/// One chapter link taken from the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRef {
    /// Href exactly as written in the TOC, anchor included.
    pub href: String,
    /// Text content of the link, verbatim.
    pub label: String,
}

impl ChapterRef {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }

    /// Page file relative to the book directory.
    pub fn file(&self) -> &str {
        split_href_and_anchor(&self.href).0
    }

    pub fn anchor(&self) -> Option<&str> {
        split_href_and_anchor(&self.href).1
    }

    pub fn next_link(&self) -> NextLink {
        NextLink {
            href: self.href.clone(),
            label: format!("{NEXT_PREFIX}{}", self.label),
        }
    }
}

/// Chapters in reading order, at most one entry per page file.
#[derive(Debug, Default, Clone)]
pub struct ChapterSequence {
    chapters: Vec<ChapterRef>,
    seen: HashSet<String>,
}

impl ChapterSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the chapter unless its page was already seen. Returns whether
    /// it was recorded.
    pub fn push(&mut self, chapter: ChapterRef) -> bool {
        if !self.seen.insert(chapter.file().to_string()) {
            return false;
        }
        self.chapters.push(chapter);
        true
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChapterRef> {
        self.chapters.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ChapterRef> {
        self.chapters.get(index)
    }

    /// Every chapter but the last, paired with the link to its successor.
    pub fn transitions(&self) -> impl Iterator<Item = (&ChapterRef, NextLink)> {
        self.chapters
            .windows(2)
            .map(|pair| (&pair[0], pair[1].next_link()))
    }
}

/// The `<a>` appended to a page, pointing at the following chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextLink {
    pub href: String,
    pub label: String,
}

impl NextLink {
    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{}\">{}</a>",
            html_escape::encode_double_quoted_attribute(&self.href),
            html_escape::encode_text(&self.label)
        )
    }
}

impl fmt::Display for NextLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}
