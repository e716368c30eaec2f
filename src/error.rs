use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading or walking `toc.html`.
#[derive(Error, Debug)]
pub enum TocError {
    #[error("Failed to read table of contents {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Table of contents has no <{0}> element where one is expected")]
    MissingElement(&'static str),

    #[error("Table of contents link {label:?} has no href attribute")]
    MissingHref { label: String },
}

/// Failures while rewriting a single chapter page.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{} does not end with \"  </body>\\n</html>\\n\"; line before the tail: {line_before:?}",
        .path.display()
    )]
    UnexpectedTail { path: PathBuf, line_before: String },

    #[error("Chapter page has no <{0}> element")]
    MissingElement(&'static str),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Toc(#[from] TocError),

    #[error(transparent)]
    Patch(#[from] PatchError),
}

pub type Result<T> = std::result::Result<T, Error>;
