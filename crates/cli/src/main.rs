use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use config::EngineConfig;
use serde::Serialize;
use std::path::PathBuf;

mod command;
mod config;

#[derive(Parser)]
#[command(name = "margin")]
#[command(about = "Per-paragraph reader feedback: segment, aggregate, heatmap", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Split article content into paragraph segments
    Segment(SegmentArgs),

    /// Apply a JSONL feedback log to an article and print the heatmap
    Replay(ReplayCliArgs),

    /// Project a stored feedback snapshot into a heatmap
    Heatmap(HeatmapArgs),

    /// Print the effective engine configuration as TOML
    #[command(name = "show-config")]
    ShowConfig,
}

#[derive(Args)]
struct SegmentArgs {
    /// Article content (markdown or HTML)
    path: PathBuf,
}

#[derive(Args)]
struct ReplayCliArgs {
    /// Article content (markdown or HTML)
    #[arg(long)]
    content: PathBuf,

    /// Feedback events, one JSON object per line
    #[arg(long)]
    events: PathBuf,

    /// Article ID (default: content file stem)
    #[arg(long)]
    article_id: Option<String>,

    /// Snapshot directory to resume from and save to
    #[arg(long)]
    store: Option<PathBuf>,

    /// Number of hot paragraphs to report
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Args)]
struct HeatmapArgs {
    /// Snapshot JSON file
    snapshot: PathBuf,

    /// Number of hot paragraphs to report
    #[arg(long)]
    top: Option<usize>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = EngineConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Segment(args) => print_json(&command::segment(&config, &args.path)?)?,
        Commands::Replay(args) => {
            let output = command::replay(
                &config,
                command::ReplayArgs {
                    content: &args.content,
                    events: &args.events,
                    article_id: args.article_id.as_deref(),
                    store: args.store.as_deref(),
                    top: args.top,
                },
            )?;
            print_json(&output)?;
        }
        Commands::Heatmap(args) => {
            print_json(&command::heatmap(&config, &args.snapshot, args.top)?)?
        }
        Commands::ShowConfig => {
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render configuration")?;
            print!("{rendered}");
        }
    }

    Ok(())
}
