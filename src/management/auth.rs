use std::path::{Path, PathBuf};

use chrono::Utc;
use reqwest::Client;

use crate::{
    config::Config,
    error::{SpotifyError, StoreError},
    types::{Token, TokenResponse},
    warning,
};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let content = async_fs::read_to_string(path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self {
            token,
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns an access token, refreshing and re-persisting it first if it
    /// is about to expire. A failed refresh falls back to the cached token.
    pub async fn get_valid_token(&mut self, config: &Config) -> String {
        if self.is_expired() {
            if let Ok(new_token) = refresh_token(config, &self.token).await {
                self.token = new_token;
                if let Err(e) = self.persist().await {
                    warning!("Failed to write {}: {}", self.path.display(), e);
                }
            }
        }

        self.token.access_token.clone()
    }

    /// Whether the token expires within the next four minutes.
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN >= self.token.obtained_at + self.token.expires_in
    }
}

/// Exchanges the refresh token of `token` for a fresh access token.
///
/// The accounts service may omit `refresh_token` in the answer, in which case
/// the previous one stays valid and is kept.
pub async fn refresh_token(config: &Config, token: &Token) -> Result<Token, SpotifyError> {
    let res = Client::new()
        .post(&config.spotify_token_url)
        .basic_auth(&config.spotify_client_id, Some(&config.spotify_client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", token.refresh_token.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let body: TokenResponse = res.json().await?;
    Ok(into_token(body, Some(&token.refresh_token)))
}

pub fn into_token(body: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        refresh_token: body
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        access_token: body.access_token,
        scope: body.scope,
        expires_in: body.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
