use std::io::Write;

use fartbox_core::{CommandError, Dispatched, PlayerId};

use crate::CliContext;
use crate::config;

pub fn join(name: &str, ctx: &CliContext) {
    let player = PlayerId::new(name);
    match ctx.world.spawn(&player) {
        Some(entity) => {
            ctx.service.join(&player);
            println!("{player} joined as {entity}");
            println!("Type `chat {player} /farthelp` for commands");
        }
        None => println!("{player} is already in the world"),
    }
}

pub fn leave(name: &str, ctx: &CliContext) {
    let player = PlayerId::new(name);
    if ctx.world.despawn(&player) {
        ctx.service.leave(&player);
        println!("{player} left");
    } else {
        println!("{player} is not in the world");
    }
}

/// Send a chat line as `name`. Slash commands go to the soundboard,
/// anything else is echoed as plain chat.
pub fn chat(name: &str, text: &[String], ctx: &CliContext) {
    let player = PlayerId::new(name);
    let line = text.join(" ");
    match ctx.service.handle_chat(&player, &line) {
        Ok(Dispatched::Ignored) => println!("{player} has no entity in the world"),
        Ok(_) => {}
        Err(CommandError::NotSlashCommand(_)) => println!("<{player}> {line}"),
        // Already reported to the player
        Err(CommandError::UnknownCommand(_)) => {}
    }
}

pub fn set_sprint(name: &str, held: bool, ctx: &CliContext) {
    let player = PlayerId::new(name);
    if !ctx.world.set_sprint(&player, held) {
        println!("{player} is not in the world");
    }
}

pub fn jump(name: &str, ctx: &CliContext) {
    let player = PlayerId::new(name);
    if !ctx.world.press_jump(&player) {
        println!("{player} is not in the world");
    }
}

pub fn show_status(ctx: &CliContext) {
    let players = ctx.world.players();
    if players.is_empty() {
        println!("No players in the world");
        return;
    }

    let states = ctx.service.status();
    println!("{:<20} {:<12} {:<12} Sequences", "Player", "Entity", "Loop");
    println!("{}", "-".repeat(56));
    for (player, entity) in players {
        let state = states
            .iter()
            .find(|(p, _)| *p == player)
            .map_or("-", |(_, s)| s.label());
        println!(
            "{:<20} {:<12} {:<12} {}",
            player.as_str(),
            entity.to_string(),
            state,
            ctx.service.active_sequences(&player)
        );
    }
}

pub fn show_config(ctx: &CliContext) {
    match config::config_path() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(e) => println!("Config file unavailable: {e}"),
    }
    println!("{:#?}", ctx.config);
}

pub fn save_config(ctx: &CliContext) {
    match config::save(&ctx.config) {
        Ok(()) => println!("Configuration saved"),
        Err(e) => println!("{e}"),
    }
}

pub async fn exit(ctx: &CliContext) {
    ctx.tasks.lock().await.abort_all().await;
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "quitting...");
    let _ = stdout.flush();
}
