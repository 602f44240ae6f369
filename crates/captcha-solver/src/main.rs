//! captcha-grid CLI: offline grid geometry and resolver inspection.

use std::io::Read;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use captcha_grid::{map_objects_to_cells, DetectedObject, GridPartition, RowGrid};
use captcha_solver::config::{resolve_config_path, SolverConfig};
use captcha_solver::resolvers::ResolverRegistry;
use captcha_solver::types::{CaptchaAnswer, CaptchaResponse};

#[derive(Parser)]
#[command(
    name = "captcha-grid",
    about = "Grid geometry and resolver tooling for image and audio captchas",
    version
)]
struct Cli {
    /// Path to a JSON config file.
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Grid dimensions; anything omitted comes from the config.
#[derive(clap::Args)]
struct GridArgs {
    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Number of rows and columns.
    #[arg(short, long)]
    grid_size: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cells of a grid partition as JSON.
    Partition {
        #[command(flatten)]
        grid: GridArgs,
    },

    /// Map detector boxes (JSON array of {x_min, x_max, y_min, y_max}) to grid cells.
    Map {
        /// File holding the boxes, or `-` for stdin.
        #[arg(default_value = "-")]
        objects: String,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Match a row-grid labeling reply ({row1, row2, row3}) against a query.
    Match {
        /// Object name to look for.
        query: String,

        /// File holding the reply, or `-` for stdin.
        #[arg(default_value = "-")]
        grid: String,
    },

    /// List registered resolvers.
    Resolvers,

    /// Print the effective configuration as JSON.
    Config,

    /// Generate shell completion scripts.
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

fn read_input(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {source}"))
    }
}

fn build_partition(args: &GridArgs, config: &SolverConfig) -> anyhow::Result<GridPartition> {
    let provider = &config.provider;
    let partition = GridPartition::new(
        args.width.unwrap_or(provider.image_size.width),
        args.height.unwrap_or(provider.image_size.height),
        args.grid_size.unwrap_or(provider.grid_size),
    )?;
    Ok(partition)
}

fn print_response(answer: CaptchaAnswer) -> anyhow::Result<()> {
    let response = CaptchaResponse::from(answer);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = SolverConfig::from_env_or_default(config_path.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Partition { grid } => {
            let partition = build_partition(&grid, &config)?;
            println!("{}", serde_json::to_string_pretty(&partition)?);
        }

        Commands::Map { objects, grid } => {
            let text = read_input(&objects)?;
            let objects: Vec<DetectedObject> =
                serde_json::from_str(&text).context("Expected a JSON array of boxes")?;
            let partition = build_partition(&grid, &config)?;
            tracing::info!(
                "Mapping {} objects onto a {}x{} grid",
                objects.len(),
                partition.grid_size(),
                partition.grid_size()
            );
            print_response(CaptchaAnswer::Grid(map_objects_to_cells(&objects, &partition)))?;
        }

        Commands::Match { query, grid } => {
            let text = read_input(&grid)?;
            let grid = RowGrid::from_json(&text)?;
            print_response(CaptchaAnswer::Grid(grid.flattened_matches(&query)))?;
        }

        Commands::Resolvers => {
            let registry = ResolverRegistry::with_defaults();
            let provider = &config.provider;
            for kind in registry.kinds() {
                let marker = if kind == provider.default_image_resolver
                    || kind == provider.default_audio_resolver
                {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {:<22} {}", kind.as_str(), kind.description());
            }
        }

        Commands::Config => {
            if let Some(path) = &config_path {
                tracing::info!("Config file: {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "captcha-grid", &mut std::io::stdout());
        }
    }

    Ok(())
}
