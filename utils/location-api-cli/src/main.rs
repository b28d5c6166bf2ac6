use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use location_api_aas::{
    commands::on_debug_pos,
    config::LocationApiConfiguration,
    error::ConfigurationError,
    init_tracing,
    resolver::{replay::ReplayQueryService, PositionResolver},
};
use location_api_lib::{
    model::location::Location,
    reply::{extract_dimension, extract_point},
};
use regex::Regex;
use tracing::debug;

#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_CRATE_NAME"), version)]
struct Args {
    /// Configuration file, layered under `LOC_API_` environment variables.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a point from a position reply.
    Point {
        text: String,
        #[arg(short, long)]
        player: Option<String>,
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Extract a dimension from a dimension reply.
    Dimension {
        text: String,
        #[arg(short, long)]
        player: Option<String>,
        #[arg(long)]
        pattern: Option<String>,
    },
    /// Resolve a player's position against the recorded replies of the configuration.
    DebugPos { player: String },
    /// Read a stored location from a JSON file.
    Location { file: PathBuf },
}

fn compile(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| Regex::new(p).context(anyhow!("Invalid pattern {p:?}")))
        .transpose()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = LocationApiConfiguration::load(args.config.as_deref())
        .context(anyhow!("Failed to load configuration"))?;
    init_tracing(&config.tracing())?;

    match args.command {
        Command::Point {
            text,
            player,
            pattern,
        } => {
            let pattern = compile(pattern.as_deref())?;

            match extract_point(&text, player.as_deref(), pattern.as_ref()) {
                Ok(Some(point)) => println!("{point}"),
                Ok(None) => println!("no data"),
                Err(e) => println!("{e}"),
            }
        }
        Command::Dimension {
            text,
            player,
            pattern,
        } => {
            let pattern = compile(pattern.as_deref())?;

            match extract_dimension(&text, player.as_deref(), pattern.as_ref()) {
                Some(dimension) => println!("{dimension}"),
                None => println!("no data"),
            }
        }
        Command::DebugPos { player } => {
            let replay = config
                .replay
                .as_ref()
                .ok_or(ConfigurationError::MissingReplayConfiguration)?;
            debug!("Replaying {} recorded replies", replay.replies.len());

            let resolver = PositionResolver::new(
                Arc::new(ReplayQueryService::from_config(replay)),
                config.queries(),
                config.parsing().build_parser()?,
            );

            println!("{}", on_debug_pos(&resolver, &player).await);
        }
        Command::Location { file } => {
            let contents = fs::read_to_string(&file)
                .context(anyhow!("Failed to read {}", file.display()))?;
            let value: serde_json::Value =
                serde_json::from_str(&contents).context(anyhow!("Invalid JSON"))?;

            match Location::from_value(&value) {
                Ok(location) => println!("{location}"),
                Err(e) => println!("Invalid location: {e}"),
            }
        }
    }

    Ok(())
}
