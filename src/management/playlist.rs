use std::{fmt, future::Future};

use chrono::NaiveDate;

use crate::{
    chart::ChartScraper,
    config::Config,
    error::{ChartError, RunError, SpotifyError},
    info,
    management::{PlaylistStore, TrackResolver, lookup_playlist_id},
    spotify::MusicService,
    success,
    types::{CreatePlaylistRequest, ResolvedTrack},
    utils, warning,
};

/// States a playlist run can stop in, in the order they are entered.
///
/// Date input happens before a run starts and is handled by the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scraping,
    AuthResolving,
    PlaylistEnsuring,
    TrackResolving,
    TrackAppending,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Scraping => "chart scraping",
            Stage::AuthResolving => "spotify authorization",
            Stage::PlaylistEnsuring => "playlist lookup",
            Stage::TrackResolving => "track resolution",
            Stage::TrackAppending => "adding tracks",
        };
        f.write_str(name)
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct TravelReport {
    pub playlist_name: String,
    pub playlist_uri: String,
    /// Whether the playlist was created during this run.
    pub created: bool,
    pub tracks: Vec<ResolvedTrack>,
    pub added: usize,
}

/// Drives one run from a validated date to a filled playlist.
pub struct PlaylistManager {
    chart: ChartScraper,
    store: PlaylistStore,
}

impl PlaylistManager {
    pub fn new(chart: ChartScraper, store: PlaylistStore) -> Self {
        Self { chart, store }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ChartScraper::from_config(config), PlaylistStore::from_config(config))
    }

    /// Runs every stage after date input.
    ///
    /// `connect` is only invoked once the chart has produced at least one
    /// title, so a failed or empty scrape never touches Spotify.
    pub async fn run<S, F, Fut>(
        &self,
        date: NaiveDate,
        connect: F,
    ) -> Result<TravelReport, RunError>
    where
        S: MusicService,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<S, SpotifyError>>,
    {
        info!("{}", self.chart.chart_url(date));
        let titles = self.chart.fetch_titles(date).await?;
        info!("{} tracks found", titles.len());
        if titles.is_empty() {
            return Err(ChartError::NoEntries.into());
        }

        let service = connect().await.map_err(RunError::spotify(Stage::AuthResolving))?;
        let user = service
            .current_user()
            .await
            .map_err(RunError::spotify(Stage::AuthResolving))?;

        let playlist_name = utils::playlist_name(date);
        let (playlist_uri, created) = self
            .ensure_playlist(&service, &user.id, date, &playlist_name)
            .await
            .map_err(RunError::spotify(Stage::PlaylistEnsuring))?;

        let resolution = TrackResolver::new(&service, &self.store)
            .resolve(date, &titles)
            .await;

        let added = if resolution.uris.is_empty() {
            0
        } else {
            service
                .add_tracks(&playlist_uri, &resolution.uris)
                .await
                .map_err(RunError::spotify(Stage::TrackAppending))?;
            resolution.uris.len()
        };

        success!("Playlist loading completed.");
        Ok(TravelReport {
            playlist_name,
            playlist_uri,
            created,
            tracks: resolution.tracks,
            added,
        })
    }

    /// Returns the playlist URI for `name`, creating and recording the
    /// playlist if none is recorded yet.
    async fn ensure_playlist<S: MusicService>(
        &self,
        service: &S,
        owner: &str,
        date: NaiveDate,
        name: &str,
    ) -> Result<(String, bool), SpotifyError> {
        let document = self.store.load_playlists().await;
        if let Some(uri) = lookup_playlist_id(name, document.as_ref()) {
            info!("Found existing playlist uri {} for {}", uri, name);
            return Ok((uri, false));
        }

        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: utils::playlist_description(date),
            public: false,
            collaborative: false,
        };
        let playlist = service.create_playlist(owner, &request).await?;
        success!("Playlist {} created.", name);

        match self
            .store
            .save_playlist_id(name, &playlist.uri, document)
            .await
        {
            Ok(true) => {}
            Ok(false) => info!("Playlist is already in the file"),
            Err(e) => warning!(
                "Failed to record playlist in {}: {}",
                self.store.playlist_path().display(),
                e
            ),
        }

        Ok((playlist.uri, true))
    }
}
