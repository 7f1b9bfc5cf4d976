use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    management::PlaylistStore,
    spotify::MusicService,
    types::ResolvedTrack,
    utils, warning,
};

/// Outcome of resolving one chart.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// One entry per chart title, in chart order, matched or not.
    pub tracks: Vec<ResolvedTrack>,
    /// URIs of the matched titles only, in chart order.
    pub uris: Vec<String>,
}

impl Resolution {
    pub fn missed(&self) -> usize {
        self.tracks.len() - self.uris.len()
    }
}

/// Maps chart titles to Spotify tracks, one search per title.
///
/// The first search hit is taken as the match. An empty or failed search
/// only marks that title as unmatched.
pub struct TrackResolver<'a, S> {
    service: &'a S,
    store: &'a PlaylistStore,
}

impl<'a, S: MusicService> TrackResolver<'a, S> {
    pub fn new(service: &'a S, store: &'a PlaylistStore) -> Self {
        Self { service, store }
    }

    /// Resolves every title and persists the full result list.
    pub async fn resolve(&self, date: NaiveDate, titles: &[String]) -> Resolution {
        let requested_date = utils::format_date(date);
        let mut resolution = Resolution::default();

        let pb = ProgressBar::new(titles.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{bar:40.blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for title in titles {
            pb.set_message(title.clone());
            let query = utils::search_query(title, date);

            let uri = match self.service.search_track(&query).await {
                Ok(res) => res.first_uri().map(str::to_string),
                Err(e) => {
                    pb.suspend(|| warning!("Search for {} failed: {}", title, e));
                    None
                }
            };

            match &uri {
                Some(uri) => resolution.uris.push(uri.clone()),
                None => pb.suspend(|| {
                    warning!("Track {}, not found on spotify. Action:Skipped.", title)
                }),
            }

            resolution.tracks.push(ResolvedTrack {
                title: title.clone(),
                requested_date: requested_date.clone(),
                remote_track_id: uri,
            });
            pb.inc(1);
        }
        pb.finish_and_clear();

        if let Err(e) = self.store.save_resolved_tracks(&resolution.tracks).await {
            warning!(
                "Failed to write {}: {}",
                self.store.tracks_path().display(),
                e
            );
        }

        resolution
    }
}
