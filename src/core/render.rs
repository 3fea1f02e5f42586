//! Renderer module
//!
//! Renders scan results as a terminal table with a summary, or as JSON.

use anyhow::Result;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ColumnConstraint, ContentArrangement, Table, Width};

use crate::core::error::InspectError;
use crate::core::format::{format_revalidate, format_size, relative_time, truncate_url};
use crate::core::model::{CacheEntry, CacheType, ScanReport, Stats};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = InspectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(InspectError::UnknownFormat(s.to_string())),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }
}

const HEADERS: [&str; 6] = ["Type", "URL", "Revalidate", "Tags", "Size", "Age"];

/// Renderer for scan results
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn format(&self) -> OutputFormat {
        self.config.format
    }

    /// Render the entry table (one row per entry, in the given order)
    pub fn render_table(&self, entries: &[&CacheEntry]) -> String {
        let mut table = Table::new();
        if !self.config.color {
            // plain output is laid out by content only, never by terminal width
            table.force_no_tty();
        }
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                HEADERS
                    .iter()
                    .map(|h| self.cell(h.to_string(), Some(Color::Cyan))),
            );

        for entry in entries {
            table.add_row(self.row(entry));
        }

        table.set_constraints([
            ColumnConstraint::ContentWidth,
            ColumnConstraint::ContentWidth,
            ColumnConstraint::ContentWidth,
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::ContentWidth,
            ColumnConstraint::ContentWidth,
        ]);

        table.to_string()
    }

    fn row(&self, entry: &CacheEntry) -> Vec<Cell> {
        let url = entry
            .url
            .as_deref()
            .map(|u| self.cell(truncate_url(u), Some(Color::White)))
            .unwrap_or_else(|| self.dash());

        let tags = if entry.tag_list().is_empty() {
            self.dash()
        } else {
            self.cell(entry.tag_list().join(", "), Some(Color::Magenta))
        };

        vec![
            self.cell(
                entry.cache_type.to_string(),
                Some(type_color(entry.cache_type)),
            ),
            url,
            self.cell(format_revalidate(entry.revalidate), Some(Color::Yellow)),
            tags,
            self.cell(format_size(entry.size), Some(Color::Green)),
            self.cell(relative_time(entry.modified), Some(Color::DarkGrey)),
        ]
    }

    fn dash(&self) -> Cell {
        self.cell("-".to_string(), Some(Color::DarkGrey))
    }

    fn cell(&self, text: String, color: Option<Color>) -> Cell {
        let cell = Cell::new(text);
        match color {
            Some(color) if self.config.color => cell.fg(color),
            _ => cell,
        }
    }

    /// Render totals and the per-type breakdown
    pub fn render_summary(&self, stats: &Stats) -> String {
        let mut lines = vec![
            "Summary:".bold().to_string(),
            format!(
                "Total entries: {}",
                stats.total_count.to_string().as_str().green()
            ),
            format!("Total size: {}", format_size(stats.total_size).as_str().green()),
        ];

        if !stats.by_type.is_empty() {
            lines.push(String::new());
            lines.push("By type:".bold().to_string());
            for bucket in &stats.by_type {
                let name = format!("{:<10}", bucket.cache_type.as_str());
                lines.push(format!(
                    "  {} - {} entries, {}",
                    colorize_type(&name, bucket.cache_type),
                    bucket.count,
                    format_size(bucket.size).as_str().green()
                ));
            }
        }

        lines.join("\n")
    }

    /// Render the whole report (all entry types) as pretty JSON
    pub fn render_json(&self, report: &ScanReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

fn type_color(cache_type: CacheType) -> Color {
    match cache_type {
        CacheType::Fetch => Color::Blue,
        CacheType::Image => Color::Green,
        CacheType::Other => Color::DarkGrey,
    }
}

fn colorize_type(text: &str, cache_type: CacheType) -> colored::ColoredString {
    match cache_type {
        CacheType::Fetch => text.blue(),
        CacheType::Image => text.green(),
        CacheType::Other => text.dimmed(),
    }
}
