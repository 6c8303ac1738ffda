use anyhow::Context;
use chrono::{Local, TimeZone};
use clap::{Args, Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, ServeOverrides};
use core_types::{AssetId, RankedStats, TimeRangeStats};
use service::{StatsService, window};
use std::path::PathBuf;
use std::sync::Arc;

/// The main entry point for the crypto price statistics service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load CRYPTO_STATS__* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config()?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => {
            config.apply_overrides(&overrides);
            configuration::validate(&config)?;
            web_server::run_server(&config).await
        }
        Commands::Info(args) => handle_info(args, &mut config).await,
        Commands::Top(args) => handle_top(args, &mut config).await,
        Commands::DayTop(args) => handle_day_top(args, &mut config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Price statistics and volatility rankings for a fixed set of crypto assets.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API.
    Serve(ServeOverrides),
    /// Oldest/newest/min/max prices of one asset over a month.
    Info(InfoArgs),
    /// All assets ranked by normalized price range over a month.
    Top(TopArgs),
    /// The asset with the highest normalized range on one day.
    DayTop(DayTopArgs),
}

/// Options shared by the query commands.
#[derive(Args)]
struct QueryOptions {
    /// Directory holding the per-asset price files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct InfoArgs {
    /// The asset symbol (e.g., "BTC"). Case-insensitive.
    asset: AssetId,

    /// How many months to shift the one-month window into the past.
    #[arg(long, default_value_t = 0)]
    months_before: u32,

    #[command(flatten)]
    options: QueryOptions,
}

#[derive(Args)]
struct TopArgs {
    /// How many months to shift the one-month window into the past.
    #[arg(long, default_value_t = 0)]
    months_before: u32,

    #[command(flatten)]
    options: QueryOptions,
}

#[derive(Args)]
struct DayTopArgs {
    /// The day, as YYYY-MM-DD or epoch milliseconds. Defaults to today.
    #[arg(long)]
    date: Option<String>,

    #[command(flatten)]
    options: QueryOptions,
}

// ==============================================================================
// Query Commands
// ==============================================================================

async fn handle_info(args: InfoArgs, config: &mut Config) -> anyhow::Result<()> {
    let service = open_service(&args.options, config).await?;
    let stats = service.asset_info(args.asset, args.months_before).await?;

    if args.options.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", stats_table(&[stats]));
    }
    Ok(())
}

async fn handle_top(args: TopArgs, config: &mut Config) -> anyhow::Result<()> {
    let service = open_service(&args.options, config).await?;
    let ranked = service.top_ranked_months_back(args.months_before).await?;

    if args.options.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else if ranked.is_empty() {
        println!("No asset has a price range in this window.");
    } else {
        println!("{}", ranked_table(&ranked));
    }
    Ok(())
}

async fn handle_day_top(args: DayTopArgs, config: &mut Config) -> anyhow::Result<()> {
    let service = open_service(&args.options, config).await?;
    let date = match args.date.as_deref() {
        Some(raw) => window::parse_date(raw, &Local)?,
        None => Local::now().date_naive(),
    };

    match service.daily_leader(date).await? {
        Some(leader) if args.options.json => {
            println!("{}", serde_json::to_string_pretty(&leader)?)
        }
        Some(leader) => println!("{}", ranked_table(&[leader])),
        None => println!(
            "No data found for any asset for given date: {}",
            date.format("%Y-%m-%d")
        ),
    }
    Ok(())
}

/// Builds the query service over the configured (or overridden) data directory.
async fn open_service(options: &QueryOptions, config: &mut Config) -> anyhow::Result<StatsService> {
    if let Some(dir) = &options.data_dir {
        config.datasource.dir = dir.clone();
    }
    let store = record_store::connect(
        &config.datasource.dir,
        config.datasource.file_suffix.as_str(),
    )
    .await
    .with_context(|| format!("Cannot open price data in {}", config.datasource.dir.display()))?;
    Ok(StatsService::new(Arc::new(store)))
}

// ==============================================================================
// Table Rendering
// ==============================================================================

fn stats_table(rows: &[TimeRangeStats]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Asset", "Earliest", "Latest", "Oldest", "Newest", "Min", "Max",
    ]);
    for stats in rows {
        let mut row = vec![
            stats.asset_id.to_string(),
            format_timestamp(stats.earliest_timestamp),
            format_timestamp(stats.latest_timestamp),
        ];
        match &stats.price_stats {
            Some(p) => row.extend([p.oldest, p.newest, p.min, p.max].map(|d| d.to_string())),
            None => row.extend(std::iter::repeat_n("-".to_string(), 4)),
        }
        table.add_row(row);
    }
    table
}

fn ranked_table(rows: &[RankedStats]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#", "Asset", "Normalized range", "Min", "Max", "Earliest", "Latest",
    ]);
    for (rank, entry) in rows.iter().enumerate() {
        let (min, max) = entry
            .stats
            .price_stats
            .as_ref()
            .map(|p| (p.min.to_string(), p.max.to_string()))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
        table.add_row(vec![
            (rank + 1).to_string(),
            entry.stats.asset_id.to_string(),
            entry
                .normalized_range
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            min,
            max,
            format_timestamp(entry.stats.earliest_timestamp),
            format_timestamp(entry.stats.latest_timestamp),
        ]);
    }
    table
}

fn format_timestamp(millis: Option<i64>) -> String {
    millis
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PriceStats;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_parses_query_commands() {
        let cli = Cli::try_parse_from(["crypto-stats", "info", "eth", "--months-before", "3"]).unwrap();
        match cli.command {
            Commands::Info(args) => {
                assert_eq!(args.asset, AssetId::Eth);
                assert_eq!(args.months_before, 3);
                assert!(!args.options.json);
            }
            _ => panic!("expected the info command"),
        }

        let cli = Cli::try_parse_from(["crypto-stats", "day-top", "--date", "2022-01-13", "--json"])
            .unwrap();
        assert!(matches!(cli.command, Commands::DayTop(ref args) if args.options.json));
    }

    #[test]
    fn cli_rejects_unknown_asset_and_negative_months() {
        assert!(Cli::try_parse_from(["crypto-stats", "info", "NEW_UNSUPPORTED"]).is_err());
        assert!(Cli::try_parse_from(["crypto-stats", "top", "--months-before", "-1"]).is_err());
    }

    #[test]
    fn cli_parses_serve_overrides() {
        let cli = Cli::try_parse_from(["crypto-stats", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(overrides) => {
                assert_eq!(overrides.port, Some(9000));
                assert!(overrides.host.is_none());
            }
            _ => panic!("expected the serve command"),
        }
    }

    #[test]
    fn tables_render_empty_and_full_stats() {
        let empty = stats_table(&[TimeRangeStats::empty(AssetId::Btc)]).to_string();
        assert!(empty.contains("BTC"));

        let ranked = ranked_table(&[RankedStats {
            stats: TimeRangeStats {
                asset_id: AssetId::Xrp,
                earliest_timestamp: Some(1_642_039_200_000),
                latest_timestamp: Some(1_642_100_400_000),
                price_stats: Some(PriceStats {
                    oldest: dec!(0.7921),
                    newest: dec!(0.7686),
                    min: dec!(0.7686),
                    max: dec!(0.793),
                }),
            },
            normalized_range: Some(dec!(0.0317)),
        }])
        .to_string();
        assert!(ranked.contains("XRP"));
        assert!(ranked.contains("0.0317"));
        assert!(ranked.contains("0.793"));
    }
}
