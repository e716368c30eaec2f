use std::path::{Path, PathBuf};

pub const TOC_FILE_NAME: &str = "toc.html";

/// How a chapter page gets its next-link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteStrategy {
    /// Insert one line before the literal `  </body>\n</html>\n` tail.
    #[default]
    LineSplice,
    /// Parse the page, append to `<body>` and serialize the whole document.
    Structural,
}

impl RewriteStrategy {
    pub fn from_rewrite_flag(rewrite_with_soup: bool) -> Self {
        if rewrite_with_soup {
            RewriteStrategy::Structural
        } else {
            RewriteStrategy::LineSplice
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub book_dir: PathBuf,
    pub strategy: RewriteStrategy,
}

impl Config {
    pub fn new(book_dir: impl Into<PathBuf>) -> Self {
        Self {
            book_dir: book_dir.into(),
            strategy: RewriteStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: RewriteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn toc_path(&self) -> PathBuf {
        self.book_dir.join(TOC_FILE_NAME)
    }

    pub fn page_path(&self, file: &str) -> PathBuf {
        self.book_dir.join(Path::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strategy_is_line_splice() {
        let config = Config::new("book");
        assert_eq!(config.strategy, RewriteStrategy::LineSplice);
        assert_eq!(config.toc_path(), PathBuf::from("book/toc.html"));
    }

    #[test]
    fn test_rewrite_flag_selects_structural() {
        assert_eq!(
            RewriteStrategy::from_rewrite_flag(true),
            RewriteStrategy::Structural
        );
        assert_eq!(
            RewriteStrategy::from_rewrite_flag(false),
            RewriteStrategy::LineSplice
        );
    }
}
