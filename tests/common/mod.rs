#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::Router;
use hot100cli::{
    error::SpotifyError,
    management::PlaylistStore,
    spotify::MusicService,
    types::{
        AddTrackToPlaylistResponse, CreatePlaylistRequest, CreatePlaylistResponse, CurrentUser,
        SearchResponse, Track, Tracks,
    },
    utils,
};

pub const THREE_TITLE_CHART: &str = r#"
<html><body>
<div class="chart-results-list">
  <ul>
    <li class="o-chart-results-list-row">
      <ul>
        <li><h3 id="title-of-a-story">
              Circles
            </h3><span>Post Malone</span></li>
      </ul>
    </li>
    <li class="o-chart-results-list-row">
      <ul>
        <li><h3>	Memories  </h3><span>Maroon 5</span></li>
      </ul>
    </li>
    <li class="o-chart-results-list-row">
      <ul>
        <li><h3>
          A Song Nobody Streams
        </h3></li>
      </ul>
    </li>
  </ul>
</div>
</body></html>
"#;

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Fresh directory under the system temp dir.
pub fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hot100cli-test-{}", utils::generate_state()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn temp_store() -> (PathBuf, PlaylistStore) {
    let dir = temp_dir();
    let store = PlaylistStore::new(
        dir.join("data/spotify_playlist.json"),
        dir.join("data/top100_tracks.json"),
    );
    (dir, store)
}

/// Calls seen by [`FakeSpotify`].
#[derive(Debug, Default)]
pub struct FakeLog {
    pub searches: Vec<String>,
    pub created: Vec<(String, CreatePlaylistRequest)>,
    pub added: Vec<(String, Vec<String>)>,
}

/// In-memory music service answering searches from a title -> URI table.
#[derive(Clone, Default)]
pub struct FakeSpotify {
    pub matches: HashMap<String, String>,
    /// Titles whose search fails with an error instead of an empty result.
    pub failing: Vec<String>,
    pub log: Arc<Mutex<FakeLog>>,
}

impl FakeSpotify {
    pub fn with_matches(matches: &[(&str, &str)]) -> Self {
        Self {
            matches: matches
                .iter()
                .map(|(t, u)| (t.to_string(), u.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    fn title_of(query: &str) -> &str {
        query
            .strip_prefix("track:")
            .and_then(|rest| rest.rsplit_once(" year:"))
            .map(|(title, _)| title)
            .unwrap_or(query)
    }
}

#[async_trait]
impl MusicService for FakeSpotify {
    async fn current_user(&self) -> Result<CurrentUser, SpotifyError> {
        Ok(CurrentUser {
            id: "tester".to_string(),
            display_name: None,
        })
    }

    async fn search_track(&self, query: &str) -> Result<SearchResponse, SpotifyError> {
        self.log.lock().unwrap().searches.push(query.to_string());

        let title = Self::title_of(query);
        if self.failing.iter().any(|t| t == title) {
            return Err(SpotifyError::Auth("search rejected".to_string()));
        }

        let items = self
            .matches
            .get(title)
            .map(|uri| {
                vec![Track {
                    id: uri.rsplit(':').next().unwrap_or_default().to_string(),
                    name: title.to_string(),
                    uri: uri.clone(),
                }]
            })
            .unwrap_or_default();

        Ok(SearchResponse {
            tracks: Some(Tracks { items }),
        })
    }

    async fn create_playlist(
        &self,
        owner: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse, SpotifyError> {
        let mut log = self.log.lock().unwrap();
        log.created.push((owner.to_string(), request.clone()));
        let id = format!("pl{}", log.created.len());
        Ok(CreatePlaylistResponse {
            uri: format!("spotify:playlist:{id}"),
            id,
            name: request.name.clone(),
        })
    }

    async fn add_tracks(
        &self,
        playlist: &str,
        uris: &[String],
    ) -> Result<Vec<AddTrackToPlaylistResponse>, SpotifyError> {
        self.log
            .lock()
            .unwrap()
            .added
            .push((playlist.to_string(), uris.to_vec()));
        Ok(vec![AddTrackToPlaylistResponse {
            snapshot_id: "snap".to_string(),
        }])
    }
}
