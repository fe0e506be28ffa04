use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read token file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse token: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("No refresh token available")]
    NoRefreshToken,
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Session refresh rejected: {0}")]
    RefreshRejected(String),
}

/// Tokens issued by the OdontoSys backend at login time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            refresh_token: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: String) -> Self {
        self.refresh_token = Some(refresh_token);
        self
    }
}

/// Persists session tokens as JSON at a configured path. The store is owned
/// by the API client; nothing reads tokens through global state.
pub struct SessionStore {
    path: PathBuf,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    #[serde(rename = "refreshToken")]
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    #[serde(rename = "accessToken")]
    access_token: String,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn save(&self, tokens: &SessionTokens) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(tokens)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn load(&self) -> Result<SessionTokens, AuthError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|_| AuthError::NotLoggedIn)?;
        let tokens: SessionTokens = serde_json::from_str(&content)?;
        Ok(tokens)
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Exchanges the stored refresh token for a fresh access token and
    /// persists the result. Called by the client after a 401.
    pub async fn refresh(
        &self,
        http: &reqwest::Client,
        base_url: &str,
    ) -> Result<SessionTokens, AuthError> {
        let current = self.load()?;
        let refresh_token = current
            .refresh_token
            .as_deref()
            .ok_or(AuthError::NoRefreshToken)?;

        tracing::info!("Refreshing session token");
        let response = http
            .post(format!("{}/auth/refresh", base_url))
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await?;
            tracing::error!("Session refresh failed: {}", body);
            return Err(AuthError::RefreshRejected(body));
        }

        let refreshed: RefreshResponse = response.json().await?;
        let new_tokens = SessionTokens::new(refreshed.access_token)
            .with_refresh_token(refresh_token.to_string());
        self.save(&new_tokens)?;

        Ok(new_tokens)
    }
}
