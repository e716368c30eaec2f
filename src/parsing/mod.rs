pub mod dom;
pub mod toc_parser;
