use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Raw body of the accounts service token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// State shared between the authorization flow and the callback handler.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub state: String,
    pub token: Option<Token>,
    pub error: Option<String>,
}

/// One chart entry paired with the Spotify track it resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTrack {
    #[serde(rename = "track")]
    pub title: String,
    #[serde(rename = "date")]
    pub requested_date: String,
    #[serde(rename = "Spotify_uri")]
    pub remote_track_id: Option<String>,
}

#[derive(Tabled)]
pub struct ResolvedTrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub track: String,
    pub uri: String,
}

/// Persisted mapping of playlist name to Spotify playlist URI.
///
/// Top-level keys other than `playlist` are carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    #[serde(default)]
    pub playlist: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Tracks>,
}

impl SearchResponse {
    pub fn first_uri(&self) -> Option<&str> {
        self.tracks
            .as_ref()
            .and_then(|t| t.items.first())
            .map(|track| track.uri.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
