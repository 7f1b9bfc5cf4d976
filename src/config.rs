//! Configuration management for the Hot 100 time travel CLI.
//!
//! This module loads configuration values from environment variables and an
//! optional `.env` file and gathers them into a single [`Config`] value that is
//! built once at startup and handed to every component that needs it.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Only the Spotify username, client id and client secret are required. Every
//! other value has a default that points at the public Billboard and Spotify
//! endpoints.

use std::{env, io::ErrorKind, path::PathBuf};

use crate::error::ConfigError;

pub const ENV_SPOTIFY_USERNAME: &str = "SPOTIFY_USERNAME";
pub const ENV_SPOTIFY_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const ENV_SPOTIFY_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";

const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_SCOPE: &str = "playlist-modify-private";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_CHART_BASE_URL: &str = "https://www.billboard.com/charts";

const APP_DIR: &str = "hot100cli";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up at:
/// - Linux: `~/.local/share/hot100cli/.env`
/// - macOS: `~/Library/Application Support/hot100cli/.env`
/// - Windows: `%LOCALAPPDATA%/hot100cli/.env`
///
/// A missing file is not an error, the variables may come from the shell
/// environment instead. Variables already set in the environment win over the
/// ones in the file.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or the
/// `.env` file exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = default_data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Runtime configuration shared by the chart scraper, the local stores and
/// the Spotify client.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify_username: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_redirect_uri: String,
    pub spotify_scope: String,
    pub spotify_api_url: String,
    pub spotify_auth_url: String,
    pub spotify_token_url: String,
    pub server_addr: String,
    pub chart_base_url: String,
    pub data_dir: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVariables`] listing every required
    /// variable that is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut required = |key: &'static str| match get(key) {
            Some(value) => value,
            None => {
                missing.push(key);
                String::new()
            }
        };

        let spotify_username = required(ENV_SPOTIFY_USERNAME);
        let spotify_client_id = required(ENV_SPOTIFY_CLIENT_ID);
        let spotify_client_secret = required(ENV_SPOTIFY_CLIENT_SECRET);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVariables(missing));
        }

        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            spotify_username,
            spotify_client_id,
            spotify_client_secret,
            spotify_redirect_uri: or_default("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            spotify_scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            spotify_api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
            spotify_auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            spotify_token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            server_addr: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            chart_base_url: or_default("CHART_BASE_URL", DEFAULT_CHART_BASE_URL),
            data_dir: get("HOT100_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
        })
    }

    /// File mapping playlist names to Spotify playlist URIs.
    pub fn playlist_file(&self) -> PathBuf {
        self.data_dir.join("data/spotify_playlist.json")
    }

    /// File holding the resolved tracks of the most recent run.
    pub fn tracks_file(&self) -> PathBuf {
        self.data_dir.join("data/top100_tracks.json")
    }

    /// Cached OAuth token of the configured Spotify user.
    pub fn token_file(&self) -> PathBuf {
        self.data_dir
            .join(format!("cache/token-{}.json", self.spotify_username))
    }
}
