// GrowMore engine command line
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use engine::config::EngineSettings;
use engine::services::AnalysisService;
use engine::EngineError;
use serde::Serialize;
use shared::utils::pkr_format;
use tracing::info;

#[derive(Parser)]
#[command(name = "growmore")]
#[command(about = "Goal projections, screener payloads and PKR formatting.")]
struct CommandLine {
    /// Settings file (defaults to $GROWMORE_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a savings goal
    #[command(alias = "g")]
    Goal {
        /// Goal request JSON
        #[arg(long)]
        input: PathBuf,
        /// Extra contribution history (CSV: amount,contribution_date)
        #[arg(long)]
        contributions: Option<PathBuf>,
        /// Evaluation date, YYYY-MM-DD (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Normalize screener form input into a /screener/run payload
    #[command(alias = "s")]
    Screener {
        /// Raw screener filters JSON (market cap in millions)
        #[arg(long)]
        input: PathBuf,
        /// Input is an already-normalized payload in base units
        #[arg(long)]
        normalized: bool,
    },
    /// Format a single value for display
    #[command(alias = "f")]
    Format {
        kind: FormatKind,
        value: String,
        #[arg(long, default_value_t = 1)]
        decimals: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatKind {
    Currency,
    MarketCap,
    Volume,
    Percent,
    SignedPercent,
}

fn init_logging(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), EngineError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_value(kind: FormatKind, raw: &str, decimals: usize) -> String {
    // Unparsable input renders as the missing-value sentinel.
    let value = pkr_format::parse_decimal(raw);
    match kind {
        FormatKind::Currency => pkr_format::format_currency(value),
        FormatKind::MarketCap => pkr_format::format_market_cap(value),
        FormatKind::Volume => pkr_format::format_volume(value),
        FormatKind::Percent => pkr_format::format_percentage(value, decimals),
        FormatKind::SignedPercent => pkr_format::format_signed_percentage(value, decimals),
    }
}

fn run(command: Commands, service: &AnalysisService) -> Result<(), EngineError> {
    match command {
        Commands::Goal { input, contributions, today } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            info!(input = %input.display(), "Running goal analysis");
            let analysis = service.analyze_goal_files(&input, contributions.as_deref(), today)?;
            print_json(&analysis)
        }
        Commands::Screener { input, normalized } => {
            info!(input = %input.display(), normalized, "Normalizing screener filters");
            let payload = if normalized {
                service.renormalize_payload_file(&input)?
            } else {
                service.screener_payload_file(&input)?
            };
            print_json(&payload)
        }
        Commands::Format { kind, value, decimals } => {
            println!("{}", format_value(kind, &value, decimals));
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let commands = CommandLine::parse();

    let settings = EngineSettings::load(commands.config.as_deref());
    let level = settings
        .as_ref()
        .map(EngineSettings::log_level)
        .unwrap_or(tracing::Level::INFO);
    init_logging(level);

    let result = settings.and_then(|settings| {
        let service = AnalysisService::new(settings);
        run(commands.command, &service)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("Error: {}", err);
            ExitCode::from(code)
        }
    }
}
