//! # CLI Module
//!
//! User-facing commands of the Hot 100 time travel CLI.
//!
//! - [`travel`] - The default command. Prompts for a chart date, scrapes the
//!   Billboard Hot 100 of that week and fills a private Spotify playlist with
//!   every title that can be found.
//! - [`auth`] - Runs the Spotify authorization flow and caches the token so a
//!   later `travel` does not need a browser.
//!
//! Failures are reported here: a chart that cannot be fetched or has no
//! entries ends the run with a message, Spotify failures end the process with
//! a non-zero status.

mod auth;
mod travel;

pub use auth::auth;
pub use travel::DATE_PROMPT;
pub use travel::prompt_for_date;
pub use travel::travel;
