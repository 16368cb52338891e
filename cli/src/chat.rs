//! Chat delivery to the console

use fartbox_core::{ChatSink, PlayerId};
use fartbox_types::Color;

/// Prints chat lines addressed to players on stdout
#[derive(Debug, Default)]
pub struct StdoutChat {
    /// Emit 24-bit ANSI colors for colored lines
    pub ansi: bool,
}

impl StdoutChat {
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }
}

/// Render one chat line, optionally colored
pub fn format_line(player: &PlayerId, text: &str, color: Option<Color>, ansi: bool) -> String {
    match color {
        Some([r, g, b, _]) if ansi => {
            format!("[to {player}] \x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
        }
        _ => format!("[to {player}] {text}"),
    }
}

impl ChatSink for StdoutChat {
    fn send_message(&self, player: &PlayerId, text: &str, color: Option<Color>) {
        println!("{}", format_line(player, text, color, self.ansi));
    }
}
