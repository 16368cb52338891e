use std::io::Write;

use clap::{Parser, Subcommand};
use fartbox_cli::readline;
use fartbox_cli::{CliContext, commands, config, logging, ticker};

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let ctx = CliContext::new(config::load()).map_err(|e| e.to_string())?;

    let handle = ticker::spawn_tick_loop(
        ctx.service.clone(),
        ctx.world.clone(),
        ctx.config.tick_rate_hz,
    );
    ctx.tasks.lock().await.ticker = Some(handle);

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
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

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "fartbox console server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Spawn a player
    Join { player: String },
    /// Despawn a player
    Leave { player: String },
    /// Say something as a player (slash commands included)
    Chat {
        player: String,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Hold the sprint key
    Hold { player: String },
    /// Release the sprint key
    Release { player: String },
    /// Press jump for one tick
    Jump { player: String },
    Status,
    Config,
    SaveConfig,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "fartbox".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Join { player }) => commands::join(player, ctx),
        Some(Commands::Leave { player }) => commands::leave(player, ctx),
        Some(Commands::Chat { player, text }) => commands::chat(player, text, ctx),
        Some(Commands::Hold { player }) => commands::set_sprint(player, true, ctx),
        Some(Commands::Release { player }) => commands::set_sprint(player, false, ctx),
        Some(Commands::Jump { player }) => commands::jump(player, ctx),
        Some(Commands::Status) => commands::show_status(ctx),
        Some(Commands::Config) => commands::show_config(ctx),
        Some(Commands::SaveConfig) => commands::save_config(ctx),
        Some(Commands::Exit) => {
            commands::exit(ctx).await;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
