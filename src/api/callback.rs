use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{config::Config, spotify, types::AuthState, warning};

/// Handles the OAuth redirect. The shared state is not held locked while the
/// code is exchanged for a token.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(shared_state): Extension<Arc<Mutex<AuthState>>>,
) -> Html<&'static str> {
    let code = {
        let mut state = shared_state.lock().await;

        if let Some(error) = params.get("error") {
            state.error = Some(format!("authorization denied: {error}"));
            return Html("<h4>Login failed.</h4>");
        }

        if params.get("state") != Some(&state.state) {
            state.error = Some("state mismatch in authorization callback".to_string());
            return Html("<h4>Invalid authorization state.</h4>");
        }

        match params.get("code") {
            Some(code) => code.clone(),
            None => {
                state.error = Some("missing authorization code".to_string());
                return Html("<h4>Missing authorization code.</h4>");
            }
        }
    };

    let exchanged = spotify::auth::exchange_code(&config, &code).await;

    let mut state = shared_state.lock().await;
    match exchanged {
        Ok(token) => {
            state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            state.error = Some(e.to_string());
            Html("<h4>Login failed.</h4>")
        }
    }
}
