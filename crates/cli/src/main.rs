//! Wildlife Trait Predictor CLI
//!
//! A command-line tool for predicting species lifespan and conservation
//! status from a species profile.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::{features, predict, status};
use predictor_lib::{PredictionKind, PredictorMetrics, RawProfile};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wildlife Trait Predictor CLI
#[derive(Parser)]
#[command(name = "wildpredict")]
#[command(author, version, about = "CLI for the Wildlife Trait Predictor", long_about = None)]
pub struct Cli {
    /// Inference service base URL
    #[arg(long, global = true, env = "WILDLIFE_BACKEND_URL")]
    pub api_url: Option<String>,

    /// Inference service API key
    #[arg(long, global = true, env = "WILDLIFE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Config file (defaults to ~/.config/wildpredict/config.toml or config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print Prometheus metrics to stderr when the command finishes
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict the average lifespan of a species
    Lifespan(ProfileArgs),

    /// Predict the conservation status of a species
    Conservation(ProfileArgs),

    /// Show the feature record a prediction would send, without sending it
    Features {
        /// Which model's record to build
        #[arg(value_enum)]
        model: ModelArg,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Show how a raw conservation status code is displayed
    Status {
        /// Status code returned by the conservation model
        #[arg(allow_negative_numbers = true)]
        code: i64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModelArg {
    Lifespan,
    Conservation,
}

impl From<ModelArg> for PredictionKind {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Lifespan => PredictionKind::Lifespan,
            ModelArg::Conservation => PredictionKind::Conservation,
        }
    }
}

/// Species profile fields; flags override values from `--profile`
#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    /// JSON file with profile fields (camelCase names)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Species name
    #[arg(long)]
    pub species: Option<String>,

    /// Height in cm
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Weight in kg
    #[arg(long, allow_hyphen_values = true)]
    pub weight: Option<String>,

    /// Gestation period in days
    #[arg(long, allow_hyphen_values = true)]
    pub gestation_period: Option<String>,

    /// Top speed in km/h
    #[arg(long, allow_hyphen_values = true)]
    pub top_speed: Option<String>,

    /// Offspring per birth
    #[arg(long, allow_hyphen_values = true)]
    pub offspring_per_birth: Option<String>,

    /// Diet (Carnivore, Other)
    #[arg(long)]
    pub diet: Option<String>,

    /// Habitat (Oceans, Not Oceans)
    #[arg(long)]
    pub habitat: Option<String>,

    /// Social structure (Solitary, Group-based)
    #[arg(long)]
    pub social_structure: Option<String>,
}

impl ProfileArgs {
    /// Merge flags over the optional profile file
    pub fn raw_profile(&self) -> Result<RawProfile> {
        let flags = RawProfile {
            species: self.species.clone(),
            height: self.height.clone(),
            weight: self.weight.clone(),
            gestation_period: self.gestation_period.clone(),
            top_speed: self.top_speed.clone(),
            offspring_per_birth: self.offspring_per_birth.clone(),
            diet: self.diet.clone(),
            habitat: self.habitat.clone(),
            social_structure: self.social_structure.clone(),
        };

        let Some(path) = &self.profile else {
            return Ok(flags);
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path.display()))?;
        let file: RawProfile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse profile {}", path.display()))?;

        Ok(flags.or(file))
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_prediction(cli: &Cli, kind: PredictionKind, args: &ProfileArgs) -> Result<()> {
    let raw = args.raw_profile()?;
    predict::run_prediction(
        kind,
        &raw,
        || config::load(cli.config.as_deref(), cli.api_url.clone(), cli.api_key.clone()),
        cli.format,
    )
    .await
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Lifespan(args) => {
            run_prediction(cli, PredictionKind::Lifespan, args).await?;
        }
        Commands::Conservation(args) => {
            run_prediction(cli, PredictionKind::Conservation, args).await?;
        }
        Commands::Features { model, profile } => {
            let raw = profile.raw_profile()?;
            features::show_features((*model).into(), &raw, cli.format)?;
        }
        Commands::Status { code } => {
            status::show_status(*code, cli.format)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let result = run(&cli).await;

    if cli.metrics {
        eprint!("{}", PredictorMetrics::new().render());
    }

    result
}
