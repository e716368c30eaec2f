pub mod fake_book;

pub mod test_helpers {
    use super::fake_book::{FakeBookConfig, create_fake_book_in_dir};
    use crate::config::{Config, RewriteStrategy};
    use std::fs;
    use std::path::{Path, PathBuf};

    /// A fake book living in a temporary directory, removed on drop
    pub struct TempBook {
        temp_dir: tempfile::TempDir,
        pages: Vec<String>,
    }

    impl TempBook {
        pub fn new(config: &FakeBookConfig) -> Result<Self, Box<dyn std::error::Error>> {
            let temp_dir = tempfile::TempDir::new()?;
            let pages = create_fake_book_in_dir(temp_dir.path(), config)?;

            Ok(Self { temp_dir, pages })
        }

        pub fn numbered(chapter_count: usize) -> Result<Self, Box<dyn std::error::Error>> {
            Self::new(&FakeBookConfig::numbered("Test Book", chapter_count))
        }

        pub fn dir(&self) -> &Path {
            self.temp_dir.path()
        }

        /// Page files that were written, in TOC order
        pub fn pages(&self) -> &[String] {
            &self.pages
        }

        pub fn page_path(&self, file: &str) -> PathBuf {
            self.dir().join(file)
        }

        pub fn read_page(&self, file: &str) -> String {
            fs::read_to_string(self.page_path(file))
                .unwrap_or_else(|e| panic!("Failed to read {file}: {e}"))
        }

        pub fn write_page(&self, file: &str, content: &str) {
            fs::write(self.page_path(file), content)
                .unwrap_or_else(|e| panic!("Failed to write {file}: {e}"));
        }

        pub fn config(&self, strategy: RewriteStrategy) -> Config {
            Config::new(self.dir()).with_strategy(strategy)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake_book::*;
    use super::test_helpers::TempBook;

    #[test]
    fn test_generated_chapter_has_expected_tail() {
        let html = generate_chapter_html("Chapter 1", 5);
        assert!(html.ends_with("</p>\n  </body>\n</html>\n"));
        assert!(html.contains("<p>Lorem ipsum dolor sit amet</p>"));
    }

    #[test]
    fn test_temp_book_writes_toc_and_pages() {
        let book = TempBook::numbered(3).unwrap();
        assert_eq!(book.pages(), &["ch1.html", "ch2.html", "ch3.html"]);
        assert!(book.dir().join("toc.html").exists());
        assert!(book.read_page("ch2.html").contains("<title>Chapter 2</title>"));
    }

    #[test]
    fn test_anchor_only_entries_write_no_page() {
        let config = FakeBookConfig {
            title: "Anchors".to_string(),
            chapters: vec![
                FakeChapter::new("ch1.html", "Chapter 1"),
                FakeChapter::anchor_only("ch1.html#part-b", "Part B"),
            ],
            words_per_chapter: 3,
        };
        let book = TempBook::new(&config).unwrap();
        assert_eq!(book.pages(), &["ch1.html"]);
    }
}
