//! Billboard Hot 100 Time Travel CLI Library
//!
//! This library turns the Billboard Hot 100 chart of a past week into a private
//! Spotify playlist. It scrapes the chart page for the requested date, resolves
//! every charted title through the Spotify search API and fills a playlist that
//! is created once per chart week and remembered in a local JSON file.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `chart` - Chart page fetching and title extraction
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed error kinds for every stage of a run
//! - `management` - Local persistence, track resolution and run orchestration
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Date validation and naming helpers
//!
//! # Example
//!
//! ```
//! use hot100cli::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> hot100cli::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     cli::travel(&config).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outermost layer of the binary where any error is reported and
/// ends the process. Library operations return their own typed errors from
/// [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching chart for {}", date);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist loading completed.");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary and CLI layer use this macro; library code returns typed
/// errors instead so the caller decides whether a failure ends the run.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for degraded but recoverable situations such as a chart title that
/// has no match on Spotify or a cache file that could not be written.
///
/// # Example
///
/// ```
/// warning!("Track {}, not found on spotify. Action:Skipped.", title);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
