use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    config::Config,
    error::SpotifyError,
    management::into_token,
    server::start_api_server,
    types::{AuthState, Token, TokenResponse},
    utils, warning,
};

const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the authorization-code flow and returns the obtained token.
///
/// The flow:
/// 1. Binds the local callback server on [`Config::server_addr`]
/// 2. Opens the authorization page in the default browser
/// 3. Waits for the redirect to deliver a code matching the generated `state`
/// 4. Exchanges the code for a token using the client secret
///
/// The caller is responsible for caching the returned token.
///
/// # Errors
///
/// Returns [`SpotifyError::Auth`] if the callback server cannot be bound, the
/// user denies access, the `state` does not match, or no callback arrives
/// within two minutes.
pub async fn authorize(config: &Config) -> Result<Token, SpotifyError> {
    let state = utils::generate_state();
    let shared_state = Arc::new(Mutex::new(AuthState {
        state: state.clone(),
        token: None,
        error: None,
    }));

    let listener = TcpListener::bind(&config.server_addr)
        .await
        .map_err(|e| SpotifyError::Auth(format!("cannot bind {}: {}", config.server_addr, e)))?;
    let server = tokio::spawn(start_api_server(
        listener,
        Arc::new(config.clone()),
        Arc::clone(&shared_state),
    ));

    let auth_url = authorize_url(config, &state)?;
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let result = wait_for_token(shared_state).await;
    server.abort();
    result
}

pub fn authorize_url(config: &Config, state: &str) -> Result<Url, SpotifyError> {
    Url::parse_with_params(
        &config.spotify_auth_url,
        &[
            ("client_id", config.spotify_client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.spotify_redirect_uri.as_str()),
            ("scope", config.spotify_scope.as_str()),
            ("state", state),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| SpotifyError::Auth(format!("invalid authorization url: {e}")))
}

async fn wait_for_token(shared_state: Arc<Mutex<AuthState>>) -> Result<Token, SpotifyError> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = &lock.token {
            return Ok(token.clone());
        }
        if let Some(error) = &lock.error {
            return Err(SpotifyError::Auth(error.clone()));
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    Err(SpotifyError::Auth(
        "authorization timed out waiting for the callback".to_string(),
    ))
}

/// Exchanges an authorization code for an access token.
pub async fn exchange_code(config: &Config, code: &str) -> Result<Token, SpotifyError> {
    let res = Client::new()
        .post(&config.spotify_token_url)
        .basic_auth(&config.spotify_client_id, Some(&config.spotify_client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.spotify_redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let body: TokenResponse = res.json().await?;
    Ok(into_token(body, None))
}
