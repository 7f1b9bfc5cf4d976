use crate::{config::Config, error, management::TokenManager, spotify, success};

pub async fn auth(config: &Config) {
    let token = match spotify::auth::authorize(config).await {
        Ok(token) => token,
        Err(e) => error!("Authentication failed: {}", e),
    };

    let token_manager = TokenManager::new(token, config.token_file());
    if let Err(e) = token_manager.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}
