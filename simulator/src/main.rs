use anyhow::{Context, Result};
use clap::Parser;
use pokerslots_simulator::{run, Config, ValidatedConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate poker slot sessions and report return to player")]
struct Args {
    /// YAML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of sessions.
    #[arg(long)]
    sessions: Option<usize>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

fn build_config(args: &Args) -> Result<ValidatedConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path.display()))?;
            serde_yaml::from_str::<Config>(&contents).context("Could not parse config file")?
        }
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(sessions) = args.sessions {
        config.sessions = sessions;
    }
    config.validate().context("Invalid config")
}

fn init_tracing(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;
    init_tracing(config.log_level);

    info!(
        seed = config.seed,
        sessions = config.sessions,
        spins_per_session = config.spins_per_session,
        bet = config.bet,
        bet_lines = config.bet_lines,
        paylines = ?config.paylines,
        deck_policy = ?config.deck_policy,
        "simulation started"
    );
    let summary = run(&config).context("simulation failed")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Could not serialize summary")?
        );
    } else {
        println!("{summary}");
    }
    Ok(())
}
