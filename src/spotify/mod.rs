//! # Spotify Integration Module
//!
//! This module is the only place that talks to the Spotify Web API. The rest of
//! the crate depends on the [`MusicService`] trait, which names exactly the
//! capabilities a run consumes:
//!
//! - `GET /me` - identify the user who will own the playlist
//! - `GET /search?type=track` - look up one chart title
//! - `POST /users/{user_id}/playlists` - create the private chart playlist
//! - `POST /playlists/{playlist_id}/tracks` - append the resolved tracks
//!
//! [`SpotifyClient`] implements the trait over HTTP. It is created by
//! [`SpotifyClient::connect`], which reuses the cached OAuth token when one
//! exists and otherwise runs the authorization flow from [`auth`].
//!
//! ## Authentication
//!
//! Authorization uses the authorization-code flow with the client secret and
//! the `playlist-modify-private` scope. A temporary local server receives the
//! redirect, the code is exchanged for a token, and the token is cached on
//! disk and refreshed shortly before it expires.
//!
//! ## Error Types
//!
//! All calls return [`SpotifyError`]. Whether a failure ends the run is decided
//! by the caller: a failed search only skips one title, every other failure is
//! fatal.

pub mod auth;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::SpotifyError,
    info,
    management::TokenManager,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, SearchResponse,
    },
    utils,
};

/// Maximum number of URIs accepted by one add-tracks request.
const ADD_TRACKS_CHUNK: usize = 100;

/// Music service capabilities used by a playlist run.
#[async_trait]
pub trait MusicService {
    async fn current_user(&self) -> Result<CurrentUser, SpotifyError>;

    /// Runs a track search for `query`.
    async fn search_track(&self, query: &str) -> Result<SearchResponse, SpotifyError>;

    async fn create_playlist(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, SpotifyError>;

    /// Appends `uris` to the playlist identified by `playlist` (id or URI).
    async fn add_tracks(
        &self,
        playlist: &str,
        uris: &[String],
    ) -> Result<Vec<AddTrackToPlaylistResponse>, SpotifyError>;
}

pub struct SpotifyClient {
    http: Client,
    config: Config,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(config: Config, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            config,
            tokens: Mutex::new(tokens),
        }
    }

    /// Builds an authenticated client for the configured user.
    ///
    /// Uses the token cached at [`Config::token_file`] when it can be read,
    /// otherwise runs the interactive authorization flow and caches its token.
    pub async fn connect(config: &Config) -> Result<Self, SpotifyError> {
        let path = config.token_file();
        let tokens = match TokenManager::load(&path).await {
            Ok(tokens) => tokens,
            Err(_) => {
                info!(
                    "No cached Spotify token for {}, starting authorization.",
                    config.spotify_username
                );
                let token = auth::authorize(config).await?;
                let tokens = TokenManager::new(token, path);
                tokens.persist().await?;
                tokens
            }
        };

        Ok(Self::new(config.clone(), tokens))
    }

    async fn bearer(&self) -> String {
        let mut tokens = self.tokens.lock().await;
        tokens.get_valid_token(&self.config).await
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.spotify_api_url.trim_end_matches('/'),
            path
        )
    }
}

#[async_trait]
impl MusicService for SpotifyClient {
    async fn current_user(&self) -> Result<CurrentUser, SpotifyError> {
        let token = self.bearer().await;
        let user = self
            .http
            .get(self.url("me"))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json::<CurrentUser>()
            .await?;
        Ok(user)
    }

    async fn search_track(&self, query: &str) -> Result<SearchResponse, SpotifyError> {
        let token = self.bearer().await;
        let res = self
            .http
            .get(self.url("search"))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track")])
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await?;
        Ok(res)
    }

    async fn create_playlist(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, SpotifyError> {
        let token = self.bearer().await;
        let res = self
            .http
            .post(self.url(&format!("users/{owner}/playlists")))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<CreatePlaylistResponse>()
            .await?;
        Ok(res)
    }

    async fn add_tracks(
        &self,
        playlist: &str,
        uris: &[String],
    ) -> Result<Vec<AddTrackToPlaylistResponse>, SpotifyError> {
        let url = self.url(&format!("playlists/{}/tracks", utils::playlist_id(playlist)));

        let mut snapshots = Vec::new();
        for chunk in uris.chunks(ADD_TRACKS_CHUNK) {
            let token = self.bearer().await;
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            let res = self
                .http
                .post(&url)
                .bearer_auth(token)
                .json(&body)
                .send()
                .await?
                .error_for_status()?
                .json::<AddTrackToPlaylistResponse>()
                .await?;
            snapshots.push(res);
        }

        Ok(snapshots)
    }
}
