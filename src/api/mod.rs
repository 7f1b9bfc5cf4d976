//! # API Module
//!
//! HTTP handlers mounted on the temporary local server that receives the
//! Spotify OAuth redirect.
//!
//! - [`callback`] - Validates the `state` parameter, exchanges the
//!   authorization code for a token and hands it back to the waiting
//!   authorization flow through the shared [`crate::types::AuthState`].

mod callback;

pub use callback::callback;
