//! Chat command surface
//!
//! Parses `/fart*` chat lines into `ChatCommand`s. Routing lives in
//! `SoundboardService::handle_chat`.

mod error;

pub use error::CommandError;

use fartbox_types::VolumePresets;

/// Which speak entry point was used. Only the volume differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Voice {
    Normal,
    Loud,
    Whisper,
}

impl Voice {
    pub fn command_name(&self) -> &'static str {
        match self {
            Voice::Normal => "fartspeak",
            Voice::Loud => "fartloud",
            Voice::Whisper => "fartwhisper",
        }
    }

    pub fn volume(&self, presets: &VolumePresets) -> f32 {
        match self {
            Voice::Normal => presets.speak,
            Voice::Loud => presets.loud,
            Voice::Whisper => presets.whisper,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Speak { voice: Voice, args: Vec<String> },
    Step,
    Help,
}

impl ChatCommand {
    /// Parse a chat line such as `/fartloud hello world`.
    ///
    /// The command name is case-insensitive; arguments are split on
    /// whitespace and passed through untouched.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let trimmed = line.trim();
        let Some(body) = trimmed.strip_prefix('/') else {
            return Err(CommandError::NotSlashCommand(trimmed.to_string()));
        };

        let mut tokens = body.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let voice = match name.as_str() {
            "fartspeak" => Voice::Normal,
            "fartloud" => Voice::Loud,
            "fartwhisper" => Voice::Whisper,
            "fartstep" => return Ok(ChatCommand::Step),
            "farthelp" => return Ok(ChatCommand::Help),
            _ => return Err(CommandError::UnknownCommand(name)),
        };
        Ok(ChatCommand::Speak { voice, args })
    }

    /// One line per command, shown by `/farthelp`
    pub fn help_lines() -> &'static [&'static str] {
        &[
            "/fartspeak <letters> - fart each letter in turn",
            "/fartloud <letters> - same, twice as loud",
            "/fartwhisper <letters> - same, quietly",
            "/fartstep - toggle looping fart steps (sprint to speed up, jump to interrupt)",
        ]
    }
}
