mod auth;
mod playlist;
mod resolver;
mod store;

pub use auth::TokenManager;
pub use auth::into_token;
pub use auth::refresh_token;
pub use playlist::PlaylistManager;
pub use playlist::Stage;
pub use playlist::TravelReport;
pub use resolver::Resolution;
pub use resolver::TrackResolver;
pub use store::PlaylistStore;
pub use store::load_document;
pub use store::lookup_playlist_id;
pub use store::merge_playlist_id;
