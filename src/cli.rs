//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::core::error::InspectError;
use crate::core::paths::build_dir;
use crate::core::render::{OutputFormat, RenderConfig};

/// show-next-cache - inspect and clear the Next.js App Router cache.
#[derive(Parser, Debug)]
#[command(name = "show-next-cache")]
#[command(
    author,
    version,
    about,
    long_about = r#"Inspect the Next.js build cache under .next/cache.

Without flags, scans the cache and prints a table of fetch-cache entries
(URL, revalidate interval, tags, size, age) followed by a summary by type.

With --revalidate-tag or --revalidate-url, lets you pick tags or URLs
interactively and deletes the matching cache files after confirmation.

Examples:
    show-next-cache
    show-next-cache --all
    show-next-cache --format json
    show-next-cache --revalidate-tag
    show-next-cache --revalidate-url --root ../my-app
"#
)]
pub struct Cli {
    /// Project directory containing .next.
    #[arg(
        long,
        env = "SHOW_NEXT_CACHE_ROOT",
        default_value = ".",
        value_name = "ROOT",
        long_help = "Project directory that contains the .next build directory\n\
(defaults to the current directory)."
    )]
    pub root: PathBuf,

    /// Revalidate (clear) cache entries by tag.
    #[arg(long, conflicts_with = "revalidate_url")]
    pub revalidate_tag: bool,

    /// Revalidate (clear) cache entries by URL.
    #[arg(long)]
    pub revalidate_url: bool,

    /// Listing output format (table/json).
    #[arg(
        long,
        default_value = "table",
        value_parser = ["table", "json"],
        value_name = "FORMAT",
        long_help = "Select the listing output format.\n\n\
Supported values:\n\
- table (default): fetch-cache table plus summary\n\
- json: every scanned entry and the aggregate stats as one JSON document"
    )]
    pub format: String,

    /// Include image and other entries in the table.
    #[arg(
        long,
        long_help = "List image and other cache entries in the table as well.\n\n\
By default only fetch-cache entries are listed; the summary always covers everything."
    )]
    pub all: bool,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored output. Color is also disabled when stdout is not a\n\
terminal or when NO_COLOR is set."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

/// What the invocation asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    RevalidateTag,
    RevalidateUrl,
}

impl Cli {
    pub fn action(&self) -> Action {
        if self.revalidate_tag {
            Action::RevalidateTag
        } else if self.revalidate_url {
            Action::RevalidateUrl
        } else {
            Action::List
        }
    }

    /// Whether ANSI styling should be emitted
    pub fn color_enabled(&self) -> bool {
        !self.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal()
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse()?;
    let render_config = RenderConfig::new(format, cli.color_enabled());

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or_else(|_| cli.root.clone());

    let build = build_dir(&root);
    if !build.exists() {
        return Err(InspectError::MissingBuildDir(build).into());
    }
    tracing::debug!(path = %build.display(), "using build directory");

    match cli.action() {
        Action::List => crate::flows::list::run_list(&build, cli.all, render_config),
        Action::RevalidateTag => crate::flows::revalidate::run_revalidate_tag(&build),
        Action::RevalidateUrl => crate::flows::revalidate::run_revalidate_url(&build),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_action_is_list() {
        let cli = Cli::try_parse_from(["show-next-cache"]).unwrap();
        assert_eq!(cli.action(), Action::List);
        assert_eq!(cli.format, "table");
        assert!(!cli.all);
    }

    #[test]
    fn test_revalidate_flags() {
        let cli = Cli::try_parse_from(["show-next-cache", "--revalidate-tag"]).unwrap();
        assert_eq!(cli.action(), Action::RevalidateTag);

        let cli = Cli::try_parse_from(["show-next-cache", "--revalidate-url"]).unwrap();
        assert_eq!(cli.action(), Action::RevalidateUrl);
    }

    #[test]
    fn test_revalidate_flags_conflict() {
        let result =
            Cli::try_parse_from(["show-next-cache", "--revalidate-tag", "--revalidate-url"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from(["show-next-cache", "--format", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_color_disables_styling() {
        let cli = Cli::try_parse_from(["show-next-cache", "--no-color"]).unwrap();
        assert!(!cli.color_enabled());
    }
}
