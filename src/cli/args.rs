//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};
use crate::core::{ColumnMap, PeriodToken};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "txsummary")]
#[command(about = "Summarize transaction exports by category and period", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// File to summarize (shorthand for `txsummary summary FILE`)
    pub(crate) file: Option<PathBuf>,

    /// Period to summarize; repeat for several (e.g. "this-month", "last-30-days", "all-time")
    #[arg(short, long = "period", global = true, value_name = "PERIOD", action = clap::ArgAction::Append)]
    pub(crate) periods: Vec<String>,

    /// Reference date for "today" (YYYYMMDD, YYYY-MM-DD or a full timestamp)
    #[arg(short, long, global = true, value_name = "DATE")]
    pub(crate) reference: Option<String>,

    /// Column holding the transaction timestamp
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) date_column: Option<String>,

    /// Column holding the transaction category
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) category_column: Option<String>,

    /// Column holding the transaction amount
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) amount_column: Option<String>,

    /// Currency label shown next to amounts
    #[arg(long, global = true, value_name = "CODE")]
    pub(crate) currency: Option<String>,

    /// Only show the N largest categories (totals still cover everything)
    #[arg(short = 't', long, global = true, value_name = "N")]
    pub(crate) top: Option<usize>,

    /// Output as JSON
    #[arg(short, long, global = true, conflicts_with = "csv")]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true)]
    pub(crate) csv: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug output (show processing details)
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Timezone used to read the clock for "today" (e.g., "Asia/Riyadh", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Locale for number formatting (e.g., "en", "de", "fr")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        // For boolean flags, config only applies if CLI is false (default)
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if !self.debug && config.debug {
            self.debug = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        if self.periods.is_empty()
            && let Some(period) = &config.period
        {
            self.periods.push(period.clone());
        }

        // String options: only apply if CLI didn't set them
        fill(&mut self.date_column, &config.date_column);
        fill(&mut self.category_column, &config.category_column);
        fill(&mut self.amount_column, &config.amount_column);
        fill(&mut self.currency, &config.currency);
        fill(&mut self.timezone, &config.timezone);
        fill(&mut self.locale, &config.locale);
        if self.top.is_none() {
            self.top = config.top;
        }

        self
    }

    /// Color for tables written to stdout
    pub(crate) fn use_color(&self) -> bool {
        resolve_color(
            self.color,
            self.no_color,
            std::io::stdout().is_terminal(),
            no_color_env(),
        )
    }

    /// Color for log lines written to stderr
    pub(crate) fn log_color(&self) -> bool {
        resolve_color(
            self.color,
            self.no_color,
            std::io::stderr().is_terminal(),
            no_color_env(),
        )
    }

    pub(crate) fn columns(&self) -> ColumnMap {
        let defaults = ColumnMap::default();
        ColumnMap {
            category: self.category_column.clone().unwrap_or(defaults.category),
            amount: self.amount_column.clone().unwrap_or(defaults.amount),
            timestamp: self.date_column.clone().unwrap_or(defaults.timestamp),
        }
    }

    /// Requested periods, in order. Defaults to all-time when none given.
    pub(crate) fn period_tokens(&self) -> Vec<PeriodToken> {
        if self.periods.is_empty() {
            return vec![PeriodToken::parse("all-time")];
        }
        self.periods.iter().map(|p| PeriodToken::parse(p)).collect()
    }
}

fn resolve_color(mode: ColorMode, no_color: bool, is_terminal: bool, no_color_env: bool) -> bool {
    if no_color {
        return false;
    }
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_terminal && !no_color_env,
    }
}

/// `NO_COLOR` set to anything non-empty
fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

fn fill(slot: &mut Option<String>, fallback: &Option<String>) {
    if slot.is_none() {
        slot.clone_from(fallback);
    }
}
