use clap::{Parser, Subcommand};
use std::io::Write;

use cannon_damage::app_state::{AppConfig, AppState};
use cannon_damage::commands;
use cannon_damage::repl::readline;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = AppConfig::load();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let state = Arc::new(RwLock::new(AppState::with_config(config)));

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, Arc::clone(&state)).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    commands::shut_down(state).await;
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "cannon damage tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event log, then keep tailing it
    Replay {
        #[arg(short, long)]
        path: String,
    },
    Spawn {
        #[arg(short, long)]
        id: i32,
    },
    Despawn {
        #[arg(short, long)]
        id: i32,
    },
    Projectile {
        #[arg(short, long)]
        id: i32,
        #[arg(short = 'n', long)]
        identity: u64,
    },
    Tick,
    /// Set the host's current ranged experience
    Xp {
        #[arg(short, long, allow_negative_numbers = true)]
        value: f64,
    },
    Overlay,
    Stats,
    Reset,
    Config,
    Exit,
}

async fn respond(line: &str, state: Arc<RwLock<AppState>>) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "cannon-damage".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Replay { path }) => commands::replay_file(path, state)
            .await
            .map_err(|e| format!("error: {e}\n"))?,
        Some(Commands::Spawn { id }) => commands::spawn(*id, state).await,
        Some(Commands::Despawn { id }) => commands::despawn(*id, state).await,
        Some(Commands::Projectile { id, identity }) => {
            commands::projectile(*id, *identity, state).await
        }
        Some(Commands::Tick) => commands::tick(state).await,
        Some(Commands::Xp { value }) => commands::set_experience(*value, state).await,
        Some(Commands::Overlay) => commands::show_overlay(state).await,
        Some(Commands::Stats) => commands::show_stats(state).await,
        Some(Commands::Reset) => commands::reset(state).await,
        Some(Commands::Config) => commands::show_settings(state).await,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
