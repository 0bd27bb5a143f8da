// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to run one of three small programs.
//
// Module responsibilities:
// - `api`: fetches country metadata over HTTP and formats it.
// - `routing`: city tables, the exact best-route search and the HTML map.
// - `hanoi`: Tower of Hanoi state and move rules.
// - `ui`: terminal prompts and printing; delegates to the modules above.
// - `config` / `error`: environment configuration and the crate error type.
//
// The programs share nothing; keeping them behind one library makes each
// testable without a terminal.
pub mod api;
pub mod config;
pub mod error;
pub mod hanoi;
pub mod routing;
pub mod ui;

pub use config::AppConfig;
pub use error::{AppError, Result};
