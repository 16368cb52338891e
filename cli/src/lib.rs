pub mod audio;
pub mod chat;
pub mod commands;
pub mod config;
pub mod context;
pub mod logging;
pub mod repl;
pub mod ticker;
pub mod world;

pub use context::CliContext;
pub use repl::readline;
