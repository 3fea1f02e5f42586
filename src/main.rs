//! show-next-cache - Inspect and clear the Next.js App Router build cache
//!
//! show-next-cache provides:
//! - A table of cached fetch entries (URL, revalidate, tags, size, age)
//! - A summary of cache usage by type
//! - Interactive revalidation (deletion) by tag or by URL

use clap::Parser;
use colored::Colorize;

mod backends;
mod cache;
mod cli;
mod core;
mod flows;

fn main() {
    let cli = cli::Cli::parse();

    let color = cli.color_enabled();
    colored::control::set_override(color);
    crate::core::logging::init_logging(cli.quiet, cli.verbose, color);

    if let Err(err) = cli::run(cli) {
        eprintln!("{} {:#}", "Error:".red(), err);
        std::process::exit(1);
    }
}
