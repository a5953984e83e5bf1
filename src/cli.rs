//! Command-line surface: thin argument parsing plus the run wiring that
//! feeds catalog items through the matching engine and hands rows to
//! rendering.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::sync::Arc;

use crate::modules::catalog::{
    resolve_level, scan_folder, CheckLevel, LocalItem, RadarrSource, SonarrSource,
};
use crate::modules::report::{
    filter_rows, sort_items, DispatchOptions, Dispatcher, MatchStrategy, ReportFilter, SortPolicy,
};
use crate::modules::tracker::TrackerClient;
use crate::render::{export_csv, render_table};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};

#[derive(Parser, Debug)]
#[command(
    name = "trackscan",
    version,
    about = "Check a local media catalog against a tracker's search index",
    group(ArgGroup::new("source").required(true).args(["radarr", "sonarr", "folder"]))
)]
pub struct Cli {
    /// Read the catalog from Radarr (movies).
    #[arg(long)]
    pub radarr: bool,

    /// Read the catalog from Sonarr (series).
    #[arg(long)]
    pub sonarr: bool,

    /// Scan a local directory instead of an API.
    #[arg(long, value_name = "DIR")]
    pub folder: Option<PathBuf>,

    /// Check granularity: full title, per season, or per episode.
    #[arg(long, value_enum, default_value = "full")]
    pub mode: CheckLevel,

    /// Pre-dispatch ordering (full mode only).
    #[arg(long, value_enum)]
    pub sort: Option<SortPolicy>,

    /// Post-dispatch row filter.
    #[arg(long, value_enum, default_value = "all")]
    pub filter: ReportFilter,

    /// Probe title variants (original-language title) instead of scoring
    /// file metadata.
    #[arg(long)]
    pub variants: bool,

    /// Maximum number of items to dispatch.
    #[arg(short = 'l', long, default_value_t = 10)]
    pub limit: usize,

    /// Append the report to a CSV file.
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Keep only items released in or after this year.
    #[arg(long)]
    pub year_min: Option<i32>,

    /// Keep only items released in or before this year.
    #[arg(long)]
    pub year_max: Option<i32>,

    /// Path to the JSON configuration file.
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config: PathBuf,
}

pub async fn run(args: Cli) -> AppResult<()> {
    let cfg = AppConfig::load(&args.config)?;
    cfg.validate_tracker()?;

    if args.radarr && args.mode != CheckLevel::Full {
        return Err(AppError::Configuration(
            "season and episode modes are not valid for Radarr movies".to_string(),
        ));
    }

    let items = load_items(&args, &cfg).await?;
    let mut items = resolve_level(items, args.mode);
    if items.is_empty() {
        return Err(AppError::NoItems(
            "the selected source produced no items".to_string(),
        ));
    }

    if args.year_min.is_some() || args.year_max.is_some() {
        items.retain(|item| in_year_range(item, args.year_min, args.year_max));
        if items.is_empty() {
            return Err(AppError::NoItems(
                "no items match the year filters".to_string(),
            ));
        }
    }

    if args.mode == CheckLevel::Full {
        sort_items(&mut items, args.sort.unwrap_or(SortPolicy::Original));
    }

    let backend = Arc::new(TrackerClient::from_config(&cfg)?);
    let strategy = if args.variants {
        MatchStrategy::Variants
    } else {
        MatchStrategy::Scored
    };
    let dispatcher = Dispatcher::new(
        backend,
        DispatchOptions::from_tuning(&cfg.tuning, args.limit),
        strategy,
    );
    let rows = dispatcher.run(items).await;

    let rows = filter_rows(rows, args.filter);
    if rows.is_empty() {
        return Err(AppError::NoItems(
            "the filter removed every row from the report".to_string(),
        ));
    }

    println!("\n{}", render_table(&header(&args), &rows, args.mode));
    if let Some(path) = &args.export {
        export_csv(path, &rows, args.mode)?;
        println!("Report appended to {}", path.display());
    }
    Ok(())
}

async fn load_items(args: &Cli, cfg: &AppConfig) -> AppResult<Vec<LocalItem>> {
    if let Some(folder) = &args.folder {
        return scan_folder(folder);
    }
    if args.radarr {
        return RadarrSource::from_config(cfg)?.movies().await;
    }
    let sonarr = SonarrSource::from_config(cfg)?;
    match args.mode {
        CheckLevel::Full => sonarr.series_items().await,
        CheckLevel::Season => sonarr.season_items().await,
        CheckLevel::Episode => sonarr.episode_items().await,
    }
}

fn in_year_range(item: &LocalItem, min: Option<i32>, max: Option<i32>) -> bool {
    let Some(year) = item.year else {
        // a year bound excludes undated items
        return false;
    };
    min.map_or(true, |m| year >= m) && max.map_or(true, |m| year <= m)
}

fn header(args: &Cli) -> String {
    match args.mode {
        CheckLevel::Full => match args.sort {
            Some(SortPolicy::Oldest) => format!("Top {} oldest", args.limit),
            Some(SortPolicy::Newest) => format!("Top {} newest", args.limit),
            Some(SortPolicy::Popular) => format!("Top {} most popular", args.limit),
            Some(SortPolicy::LeastPopular) => format!("Top {} least popular", args.limit),
            Some(SortPolicy::Az) => format!("First {} A-Z", args.limit),
            Some(SortPolicy::Za) => format!("First {} Z-A", args.limit),
            Some(SortPolicy::Original) | None => format!("First {} items", args.limit),
        },
        CheckLevel::Season => format!("Seasons (max {})", args.limit),
        CheckLevel::Episode => format!("Episodes (max {})", args.limit),
    }
}
