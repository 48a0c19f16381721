use chrono::NaiveDateTime;
use std::path::Path;

use crate::cli::{Cli, Command};
use crate::consts::DEFAULT_CURRENCY;
use crate::core::{ColumnMap, ResultBundle, SummaryCache};
use crate::error::AppError;
use crate::output::{
    NumberFormat, SummaryOptions, output_periods_csv, output_periods_json, output_raw_csv,
    output_raw_json, output_summary_csv, output_summary_json, render_periods, render_raw,
    render_summary,
};
use crate::source::{load_file, require_columns};
use crate::utils::{Timezone, parse_reference};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) reference: NaiveDateTime,
    pub(crate) number_format: NumberFormat,
    pub(crate) columns: ColumnMap,
    format: OutputFormat,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(cli: &'a Cli) -> Result<Self, AppError> {
        let timezone = Timezone::parse(cli.timezone.as_deref())?;
        let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
        let reference = match cli.reference.as_deref() {
            Some(raw) => parse_reference(raw)?,
            None => timezone.now(),
        };
        let format = if cli.json {
            OutputFormat::Json
        } else if cli.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Table
        };
        tracing::debug!(%reference, ?timezone, "resolved reference instant");

        Ok(Self {
            cli,
            reference,
            number_format,
            columns: cli.columns(),
            format,
        })
    }
}

fn handle_summary(file: &Path, ctx: &CommandContext<'_>) -> Result<String, AppError> {
    let loaded = load_file(file)?;
    require_columns(&loaded.rows, &ctx.columns)?;

    let mut cache = SummaryCache::new();
    let tokens = ctx.cli.period_tokens();
    for token in &tokens {
        cache.get_or_run(
            &loaded.identity,
            &loaded.rows,
            &ctx.columns,
            token,
            ctx.reference,
        );
    }
    let stats = cache.stats();
    tracing::debug!(
        format = ?loaded.format,
        hits = stats.hits,
        misses = stats.misses,
        entries = cache.len(),
        "summary cache"
    );

    let bundles: Vec<&ResultBundle> = tokens
        .iter()
        .filter_map(|token| cache.get(token, ctx.reference))
        .collect();

    match ctx.format {
        OutputFormat::Json => output_summary_json(&bundles, ctx.cli.top),
        OutputFormat::Csv => output_summary_csv(&bundles, ctx.cli.top),
        OutputFormat::Table => {
            let opts = SummaryOptions {
                use_color: ctx.cli.use_color(),
                number_format: ctx.number_format,
                currency: ctx.cli.currency.as_deref().unwrap_or(DEFAULT_CURRENCY),
                top: ctx.cli.top,
                date_column: &ctx.columns.timestamp,
            };
            Ok(bundles
                .iter()
                .map(|bundle| render_summary(bundle, &opts))
                .collect())
        }
    }
}

fn handle_periods(ctx: &CommandContext<'_>) -> Result<String, AppError> {
    match ctx.format {
        OutputFormat::Json => output_periods_json(ctx.reference),
        OutputFormat::Csv => output_periods_csv(ctx.reference),
        OutputFormat::Table => Ok(render_periods(ctx.reference, ctx.cli.use_color())),
    }
}

fn handle_raw(file: &Path, limit: usize, ctx: &CommandContext<'_>) -> Result<String, AppError> {
    let loaded = load_file(file)?;
    match ctx.format {
        OutputFormat::Json => output_raw_json(&loaded.rows, limit),
        OutputFormat::Csv => output_raw_csv(&loaded.rows, limit),
        OutputFormat::Table => Ok(render_raw(
            &loaded.rows,
            limit,
            ctx.cli.use_color(),
            ctx.number_format,
        )),
    }
}

/// Run one command; the rendered report is returned for the caller to print
pub(crate) fn run(cli: &Cli, command: Command) -> Result<Option<String>, AppError> {
    let ctx = CommandContext::new(cli)?;
    let output = match command {
        Command::Summary(file) => handle_summary(&file, &ctx)?,
        Command::Periods => handle_periods(&ctx)?,
        Command::Raw { file, limit } => handle_raw(&file, limit, &ctx)?,
        Command::Missing => return Ok(None),
    };
    Ok(Some(output))
}
