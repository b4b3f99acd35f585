use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use cricket_dash::api::{build_router, state::AppState};
use cricket_dash::calculate::{self, Section};
use cricket_dash::config::AppConfig;
use cricket_dash::ingest::load_dataset_from_paths;
use cricket_dash::storage::export_dataset;
use cricket_dash::Dataset;

#[derive(Parser)]
#[command(name = "cricket-dash")]
#[command(about = "Cricket match and delivery statistics dashboard")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The two input files.
#[derive(Args)]
struct InputFiles {
    /// Matches CSV (one row per match)
    #[arg(long)]
    matches: PathBuf,

    /// Deliveries CSV (one row per ball)
    #[arg(long)]
    deliveries: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print one view as JSON
    Report {
        #[command(flatten)]
        input: InputFiles,

        #[command(subcommand)]
        section: ReportSection,
    },

    /// Load and clean the files, then print dataset info
    Validate {
        #[command(flatten)]
        input: InputFiles,
    },

    /// Write the cleaned tables as CSV
    Export {
        #[command(flatten)]
        input: InputFiles,

        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum ReportSection {
    /// Top scorers, top teams, toss charts and key insights
    Overview,
    /// Batting summary for one player
    Player { name: String },
    /// Win record and head-to-head for one team
    Team { name: String },
    /// Matches, top team and top scorer for one season
    Season { season: String },
    /// Bowling figures for one bowler
    Bowler { name: String },
    /// Matches won by runs, by wickets, tied and abandoned
    Outcomes,
    /// Runs per match for a batting team
    Runs {
        team: String,
        #[arg(long)]
        season: Option<String>,
    },
    /// List batsmen, bowlers, teams and seasons
    Options,
}

#[derive(Serialize)]
struct OptionLists {
    batsmen: Vec<String>,
    bowlers: Section<Vec<String>>,
    teams: Section<Vec<String>>,
    seasons: Section<Vec<String>>,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Logs go to stderr so report output on stdout stays clean JSON
    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn load(input: &InputFiles) -> Result<Dataset> {
    load_dataset_from_paths(&input.matches, &input.deliveries).with_context(|| {
        format!(
            "Failed to load {:?} and {:?}",
            input.matches, input.deliveries
        )
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(dataset: &Dataset, section: ReportSection, top_n: usize) -> Result<()> {
    match section {
        ReportSection::Overview => print_json(&calculate::dashboard_overview(dataset, top_n)),
        ReportSection::Player { name } => print_json(&calculate::player_summary(dataset, &name)),
        ReportSection::Team { name } => {
            print_json(&Section::from(calculate::team_summary(dataset, &name)))
        }
        ReportSection::Season { season } => {
            print_json(&Section::from(calculate::season_summary(dataset, &season)))
        }
        ReportSection::Bowler { name } => {
            print_json(&Section::from(calculate::bowler_summary(dataset, &name)))
        }
        ReportSection::Outcomes => print_json(&calculate::outcome_tally(dataset)),
        ReportSection::Runs { team, season } => print_json(&Section::from(
            calculate::run_distribution(dataset, &team, season.as_deref()),
        )),
        ReportSection::Options => print_json(&OptionLists {
            batsmen: calculate::batsmen(dataset),
            bowlers: calculate::bowlers(dataset).into(),
            teams: calculate::teams(dataset).into(),
            seasons: calculate::seasons(dataset).into(),
        }),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    init_tracing(&config.log_level, cli.json_logs);

    tracing::info!("Starting cricket-dash v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let app = build_router(AppState::new(config));
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Report { input, section } => {
            let dataset = load(&input)?;
            report(&dataset, section, config.stats.top_n)?;
        }
        Commands::Validate { input } => {
            let dataset = load(&input)?;
            print_json(&dataset.info(config.stats.preview_rows))?;
        }
        Commands::Export { input, out_dir } => {
            let dataset = load(&input)?;
            let (matches_path, deliveries_path) = export_dataset(&dataset, &out_dir)?;
            println!("{}", matches_path.display());
            println!("{}", deliveries_path.display());
        }
    }

    Ok(())
}
