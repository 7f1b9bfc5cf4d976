use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use reqwest::Url;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, config::Config, types::AuthState, warning};

const DEFAULT_CALLBACK_PATH: &str = "/callback";

pub async fn start_api_server(
    listener: TcpListener,
    config: Arc<Config>,
    state: Arc<Mutex<AuthState>>,
) {
    let path = callback_path(&config.spotify_redirect_uri);
    let app = Router::new()
        .route(&path, get(api::callback))
        .layer(Extension(state))
        .layer(Extension(config));

    if let Err(e) = axum::serve(listener, app).await {
        warning!("Callback server stopped: {}", e);
    }
}

/// Path component of the redirect URI the accounts service calls back on.
pub fn callback_path(redirect_uri: &str) -> String {
    Url::parse(redirect_uri)
        .ok()
        .map(|url| url.path().to_string())
        .filter(|path| path != "/")
        .unwrap_or_else(|| DEFAULT_CALLBACK_PATH.to_string())
}
