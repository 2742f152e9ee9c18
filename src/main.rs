use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rampforge::models::{ExtractionConfig, PaletteState};
use rampforge::services::{load_png, ramp_hex, RampPipeline, TracingProgress};

#[derive(Parser)]
#[command(name = "rampforge")]
#[command(about = "Find color ramps in pixel-art palettes")]
struct Cli {
    /// YAML config file (defaults to $RAMPFORGE_CONFIG, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract ramps from a PNG image
    Extract {
        /// Input PNG file
        input: PathBuf,

        /// Write palette and ramps as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Step metric: BasicHSV, VectorHSV or CIEDE2000
        #[arg(short, long)]
        method: Option<String>,

        /// Longest ramp to search for (3-20)
        #[arg(long)]
        max_ramp_length: Option<usize>,

        /// Collapse near-duplicate ramps
        #[arg(long)]
        cluster: bool,

        /// Print the saved-state JSON instead of a ramp list
        #[arg(long)]
        json: bool,
    },
    /// Score the ramps of a saved state file
    Score {
        /// State JSON written by `extract --output`
        state: PathBuf,
    },
    /// Validate the configuration and print it with defaults filled in
    CheckConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rampforge=info,color_ramps=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).without_time())
        .init();

    let mut config = ExtractionConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract {
            input,
            output,
            method,
            max_ramp_length,
            cluster,
            json,
        } => {
            if let Some(method) = method {
                config.ramps.method = method;
            }
            if let Some(length) = max_ramp_length {
                config.ramps.max_ramp_length = length;
            }
            if cluster {
                config.cluster.cluster_and_reduce = true;
            }
            run_extract_command(config, &input, output.as_deref(), json)
        }
        Commands::Score { state } => run_score_command(config, &state),
        Commands::CheckConfig => run_check_config_command(config),
    }
}

/// Extract ramps from a PNG and print or save them
fn run_extract_command(
    config: ExtractionConfig,
    input: &Path,
    output: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let pipeline = RampPipeline::new(config)?;
    let image = load_png(input)?;
    let result = pipeline.run(&image.buffer()?, &TracingProgress::new())?;

    if let Some(path) = output {
        result.state.write(path)?;
    }

    if json {
        println!("{}", result.state.to_json_string()?);
        return Ok(());
    }

    println!(
        "{} colors, {} edges, {} candidates, {} ramps",
        result.state.colors.len(),
        result.edge_count,
        result.extraction.candidates,
        result.state.ramps.len()
    );
    for (i, ramp) in result.state.ramps.iter().enumerate() {
        println!(
            "{:>3}: {}",
            i + 1,
            ramp_hex(ramp, &result.state.colors).join(" → ")
        );
    }
    Ok(())
}

/// Print the score breakdown of every saved ramp
fn run_score_command(config: ExtractionConfig, path: &Path) -> anyhow::Result<()> {
    let pipeline = RampPipeline::new(config)?;
    let state = PaletteState::read(path)?;
    let scores = pipeline.score(&state)?;

    println!(
        "{:>3}  {:>8}  {:>8}  {:>8}  {:>8}  {:>6}  ramp",
        "#", "final", "size", "consist", "monotony", "length"
    );
    for (i, (ramp, score)) in state.ramps.iter().zip(&scores).enumerate() {
        println!(
            "{:>3}  {:>8.4}  {:>8.4}  {:>8.4}  {:>8.4}  {:>6}  {}",
            i + 1,
            score.final_score,
            score.step_size_penalty,
            score.step_consistency_penalty,
            score.monotony_score,
            score.length_bonus,
            ramp
        );
    }
    Ok(())
}

/// Validate config and print the resolved YAML
fn run_check_config_command(config: ExtractionConfig) -> anyhow::Result<()> {
    config.validate()?;
    print!("{}", config.to_yaml_string()?);
    Ok(())
}
