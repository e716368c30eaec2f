use crate::config::Config;
use crate::error::TocError;
use crate::parsing::dom;
use crate::types::{ChapterRef, ChapterSequence};
use log::{debug, info, warn};
use markup5ever_rcdom::Handle;
use std::fs;

pub struct TocParser;

impl TocParser {
    /// Reads `toc.html` from the book directory and extracts its chapters.
    pub fn load(config: &Config) -> Result<ChapterSequence, TocError> {
        let path = config.toc_path();
        let html = fs::read_to_string(&path).map_err(|source| TocError::Io {
            path: path.clone(),
            source,
        })?;
        let chapters = Self::parse_toc(&html)?;

        info!(
            "Found {} chapters in {}",
            chapters.len(),
            path.display()
        );
        if chapters.len() < 2 {
            warn!("Table of contents lists fewer than two chapters, nothing to link");
        }
        Ok(chapters)
    }

    /// Extracts the ordered chapter list from `html > body > nav > ol`.
    pub fn parse_toc(html: &str) -> Result<ChapterSequence, TocError> {
        let dom = dom::parse_html(html);
        let list = Self::find_chapter_list(&dom.document)?;

        let mut chapters = ChapterSequence::new();
        for link in dom::find_all_descendants(&list, "a") {
            let label = dom::text_content(&link);
            let href = dom::get_attr_value(&link, "href")
                .ok_or_else(|| TocError::MissingHref {
                    label: label.clone(),
                })?;

            let chapter = ChapterRef::new(href, label);
            if !chapters.push(chapter.clone()) {
                debug!(
                    "Skipping {}: {} is already listed",
                    chapter.href,
                    chapter.file()
                );
            }
        }
        Ok(chapters)
    }

    fn find_chapter_list(document: &Handle) -> Result<Handle, TocError> {
        let html = dom::find_child(document, "html").ok_or(TocError::MissingElement("html"))?;
        let body = dom::find_child(&html, "body").ok_or(TocError::MissingElement("body"))?;
        let nav = dom::find_descendant(&body, "nav").ok_or(TocError::MissingElement("nav"))?;
        dom::find_descendant(&nav, "ol").ok_or(TocError::MissingElement("ol"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toc_html(items: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
  <head><title>Contents</title></head>
  <body>
    <nav id="toc">
      <ol>
{items}
      </ol>
    </nav>
  </body>
</html>
"#
        )
    }

    fn hrefs(chapters: &ChapterSequence) -> Vec<&str> {
        chapters.iter().map(|c| c.href.as_str()).collect()
    }

    #[test]
    fn test_parse_flat_toc() {
        let html = toc_html(
            r#"<li><a href="ch1.html">Chapter 1</a></li>
<li><a href="ch2.html">Chapter 2</a></li>
<li><a href="ch3.html">Chapter 3</a></li>"#,
        );

        let chapters = TocParser::parse_toc(&html).unwrap();

        assert_eq!(hrefs(&chapters), vec!["ch1.html", "ch2.html", "ch3.html"]);
        assert_eq!(chapters.get(1).unwrap().label, "Chapter 2");
    }

    #[test]
    fn test_parse_nested_toc_keeps_document_order() {
        let html = toc_html(
            r#"<li><a href="part1.html">Part 1</a>
  <ol>
    <li><a href="ch1.html">Chapter 1</a></li>
    <li><a href="ch2.html">Chapter 2</a></li>
  </ol>
</li>
<li><a href="epilogue.html">Epilogue</a></li>"#,
        );

        let chapters = TocParser::parse_toc(&html).unwrap();

        assert_eq!(
            hrefs(&chapters),
            vec!["part1.html", "ch1.html", "ch2.html", "epilogue.html"]
        );
    }

    #[test]
    fn test_anchors_into_same_page_are_dropped() {
        let html = toc_html(
            r#"<li><a href="ch1.html">Chapter 1</a></li>
<li><a href="ch1.html#background">Background</a></li>
<li><a href="ch2.html#start">Chapter 2</a></li>
<li><a href="ch2.html#summary">Summary</a></li>
<li><a href="ch3.html">Chapter 3</a></li>"#,
        );

        let chapters = TocParser::parse_toc(&html).unwrap();

        assert_eq!(hrefs(&chapters), vec!["ch1.html", "ch2.html#start", "ch3.html"]);
        assert_eq!(chapters.get(1).unwrap().label, "Chapter 2");
    }

    #[test]
    fn test_links_outside_the_list_are_ignored() {
        let html = r#"<html><body>
<a href="cover.html">Cover</a>
<nav><h1>Contents</h1><ol><li><a href="ch1.html">One</a></li></ol></nav>
<footer><a href="about.html">About</a></footer>
</body></html>"#;

        let chapters = TocParser::parse_toc(html).unwrap();

        assert_eq!(hrefs(&chapters), vec!["ch1.html"]);
    }

    #[test]
    fn test_missing_nav_is_an_error() {
        let err = TocParser::parse_toc("<html><body><ol><li><a href=\"a.html\">A</a></li></ol></body></html>")
            .unwrap_err();
        assert!(matches!(err, TocError::MissingElement("nav")));
    }

    #[test]
    fn test_missing_ordered_list_is_an_error() {
        let err = TocParser::parse_toc("<html><body><nav><ul><li><a href=\"a.html\">A</a></li></ul></nav></body></html>")
            .unwrap_err();
        assert!(matches!(err, TocError::MissingElement("ol")));
    }

    #[test]
    fn test_link_without_href_is_an_error() {
        let html = toc_html(r#"<li><a name="top">Top</a></li>"#);
        let err = TocParser::parse_toc(&html).unwrap_err();
        match err {
            TocError::MissingHref { label } => assert_eq!(label, "Top"),
            other => panic!("Expected MissingHref, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_label_is_kept() {
        let html = toc_html(r#"<li><a href="ch1.html"></a></li>"#);
        let chapters = TocParser::parse_toc(&html).unwrap();
        assert_eq!(chapters.get(0).unwrap().label, "");
    }
}
