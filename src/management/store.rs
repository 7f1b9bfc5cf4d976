use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    config::Config,
    error::StoreError,
    types::{PlaylistRecord, ResolvedTrack},
};

/// Reads and parses a JSON document.
///
/// A missing or unparsable file yields `None`; callers treat that as having
/// no prior state.
pub async fn load_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let json = async_fs::read_to_string(path).await.ok()?;
    serde_json::from_str(&json).ok()
}

async fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(value)?;
    async_fs::write(path, json).await?;
    Ok(())
}

/// Looks up `document["playlist"][name]`.
pub fn lookup_playlist_id(name: &str, document: Option<&PlaylistRecord>) -> Option<String> {
    document
        .and_then(|doc| doc.playlist.get(name))
        .filter(|id| !id.is_empty())
        .cloned()
}

/// Merges `name -> id` into `document`.
///
/// Returns the document to persist, or `None` when `name` is already
/// recorded and nothing must be written.
pub fn merge_playlist_id(
    name: &str,
    id: &str,
    document: Option<PlaylistRecord>,
) -> Option<PlaylistRecord> {
    let mut document = document.unwrap_or_default();
    if document.playlist.contains_key(name) {
        return None;
    }

    document.playlist.insert(name.to_string(), id.to_string());
    Some(document)
}

/// The two JSON files kept between runs: the playlist record and the
/// resolved tracks of the latest run.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    playlist_path: PathBuf,
    tracks_path: PathBuf,
}

impl PlaylistStore {
    pub fn new(playlist_path: PathBuf, tracks_path: PathBuf) -> Self {
        Self {
            playlist_path,
            tracks_path,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.playlist_file(), config.tracks_file())
    }

    pub fn playlist_path(&self) -> &Path {
        &self.playlist_path
    }

    pub fn tracks_path(&self) -> &Path {
        &self.tracks_path
    }

    pub async fn load_playlists(&self) -> Option<PlaylistRecord> {
        load_document(&self.playlist_path).await
    }

    /// Records `name -> id` unless `name` is already present.
    ///
    /// Returns whether the file was written.
    pub async fn save_playlist_id(
        &self,
        name: &str,
        id: &str,
        document: Option<PlaylistRecord>,
    ) -> Result<bool, StoreError> {
        match merge_playlist_id(name, id, document) {
            Some(merged) => {
                write_document(&self.playlist_path, &merged).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Overwrites the results file with `tracks`. An empty list writes nothing.
    pub async fn save_resolved_tracks(&self, tracks: &[ResolvedTrack]) -> Result<bool, StoreError> {
        if tracks.is_empty() {
            return Ok(false);
        }

        write_document(&self.tracks_path, tracks).await?;
        Ok(true)
    }

    pub async fn load_resolved_tracks(&self) -> Option<Vec<ResolvedTrack>> {
        load_document(&self.tracks_path).await
    }
}
