/// Fake book writer: a `toc.html` plus one generated page per chapter
use crate::types::split_href_and_anchor;
use std::fs;
use std::path::Path;

/// One entry of the fake table of contents
#[derive(Debug, Clone)]
pub struct FakeChapter {
    pub href: String,
    pub title: String,
    /// Write a page for this entry. Anchors into an earlier page set this to false.
    pub write_page: bool,
}

impl FakeChapter {
    pub fn new(href: &str, title: &str) -> Self {
        Self {
            href: href.to_string(),
            title: title.to_string(),
            write_page: true,
        }
    }

    pub fn anchor_only(href: &str, title: &str) -> Self {
        Self {
            write_page: false,
            ..Self::new(href, title)
        }
    }
}

/// Configuration for a fake book
#[derive(Debug, Clone)]
pub struct FakeBookConfig {
    pub title: String,
    pub chapters: Vec<FakeChapter>,
    pub words_per_chapter: usize,
}

impl FakeBookConfig {
    /// `ch1.html` .. `chN.html` titled "Chapter 1" .. "Chapter N"
    pub fn numbered(title: &str, chapter_count: usize) -> Self {
        Self {
            title: title.to_string(),
            chapters: (1..=chapter_count)
                .map(|i| FakeChapter::new(&format!("ch{i}.html"), &format!("Chapter {i}")))
                .collect(),
            words_per_chapter: 20,
        }
    }
}

pub fn generate_toc_html(config: &FakeBookConfig) -> String {
    let mut content = format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
  </head>
  <body>
    <h1>{title}</h1>
    <nav epub:type="toc" id="toc">
      <ol>
"#,
        title = config.title
    );
    for chapter in &config.chapters {
        content.push_str(&format!(
            "        <li><a href=\"{}\">{}</a></li>\n",
            chapter.href, chapter.title
        ));
    }
    content.push_str("      </ol>\n    </nav>\n  </body>\n</html>\n");
    content
}

/// Chapter page ending in the `  </body>\n</html>\n` tail the generator emits
pub fn generate_chapter_html(title: &str, word_count: usize) -> String {
    let base_words = [
        "Lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    ];

    let mut content = format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
  </head>
  <body>
    <h1 id="start">{title}</h1>
"#
    );

    content.push_str("    <p>");
    for i in 0..word_count {
        content.push_str(base_words[i % base_words.len()]);
        if i + 1 < word_count {
            content.push(' ');
        }
    }
    content.push_str("</p>\n  </body>\n</html>\n");
    content
}

/// Writes the book into `dir` and returns the page files written, in TOC order
pub fn create_fake_book_in_dir<P: AsRef<Path>>(
    dir: P,
    config: &FakeBookConfig,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    fs::write(dir.join("toc.html"), generate_toc_html(config))?;

    let mut pages = Vec::new();
    for chapter in config.chapters.iter().filter(|c| c.write_page) {
        let file = split_href_and_anchor(&chapter.href).0.to_string();
        let path = dir.join(&file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(
            &path,
            generate_chapter_html(&chapter.title, config.words_per_chapter),
        )?;
        pages.push(file);
    }

    Ok(pages)
}
