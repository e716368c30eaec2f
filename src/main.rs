use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use bookstitch::panic_handler;
use bookstitch::{Config, RewriteStrategy};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory holding toc.html and the chapter pages
    #[arg(long, alias = "book_dir", value_name = "DIR")]
    book_dir: PathBuf,

    /// Re-parse and serialize each page instead of splicing a line before
    /// its closing tags
    #[arg(long, alias = "rewrite_with_soup")]
    rewrite_with_soup: bool,
}

impl Args {
    fn into_config(self) -> Config {
        Config::new(self.book_dir)
            .with_strategy(RewriteStrategy::from_rewrite_flag(self.rewrite_with_soup))
    }
}

fn log_level() -> LevelFilter {
    match env::var("BOOKSTITCH_LOG").as_deref() {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        Ok("warn") => LevelFilter::Warn,
        Ok("error") => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

fn main() -> Result<()> {
    // Initialize logging with html5ever logs filtered out
    TermLogger::init(
        log_level(),
        simplelog::ConfigBuilder::new()
            .add_filter_ignore_str("html5ever")
            .build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    panic_handler::initialize_panic_handler();

    let config = Args::parse().into_config();
    info!(
        "Linking chapters in {} ({:?})",
        config.book_dir.display(),
        config.strategy
    );

    let summary = bookstitch::run(&config)
        .with_context(|| format!("Failed to link chapters in {}", config.book_dir.display()))?;

    info!(
        "Done: {} pages linked, {} already up to date",
        summary.patched.len(),
        summary.unchanged.len()
    );
    Ok(())
}
