//! The authenticated HTTP client.

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use notesgpt_cache::StoreManager;
use notesgpt_cache::keys;
use notesgpt_core::config::ApiConfig;
use notesgpt_core::error::AppError;
use notesgpt_core::events::{SESSION_EVENT_CAPACITY, SessionEvent};
use notesgpt_core::result::AppResult;
use notesgpt_core::traits::KeyValueStore;

use crate::body::RequestBody;
use crate::response;

/// REST client for the NotesGPT backend.
///
/// Cloning is cheap; clones share the connection pool, the token store and
/// the session event channel.
#[derive(Clone)]
pub struct ApiClient {
    /// Pooled HTTP client.
    http: reqwest::Client,
    /// Backend base URL, without trailing slash.
    base_url: String,
    /// Device-local store holding the bearer token.
    store: StoreManager,
    /// Session event broadcaster.
    events: broadcast::Sender<SessionEvent>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ApiClient {
    /// Build a client from configuration over the given token store.
    pub fn new(config: &ApiConfig, store: StoreManager) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| AppError::configuration(format!("Invalid API base URL '{base_url}': {e}")))?;

        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);

        info!(base_url = %base_url, "API client initialized");

        Ok(Self {
            http,
            base_url,
            store,
            events,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Subscribe to session events (token stored, 401 received, logout).
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Read the stored bearer token.
    pub async fn stored_token(&self) -> AppResult<Option<String>> {
        self.store.get(&keys::auth_token()).await
    }

    /// Persist a freshly issued bearer token.
    pub(crate) async fn store_token(&self, token: &str) -> AppResult<()> {
        self.store.set(&keys::auth_token(), token).await?;
        self.publish(SessionEvent::Established);
        Ok(())
    }

    /// Remove the stored bearer token.
    pub async fn clear_token(&self) -> AppResult<()> {
        self.store.delete(&keys::auth_token()).await?;
        debug!("Auth token removed");
        Ok(())
    }

    /// Log out locally: clear the token and announce it.
    ///
    /// The session event is published even when clearing the store fails.
    pub async fn logout(&self) -> AppResult<()> {
        let cleared = self.clear_token().await;
        self.publish(SessionEvent::LoggedOut);
        cleared
    }

    fn publish(&self, event: SessionEvent) {
        // No receivers is fine: nobody is watching the session yet.
        let _ = self.events.send(event);
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| AppError::internal(format!("Invalid endpoint '{path}': {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Issue a request and return the parsed JSON body.
    ///
    /// A 401 clears the stored token and yields the authentication error
    /// before any other classification. Other non-success statuses yield a
    /// request error carrying the server message or the status text.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> AppResult<Value> {
        let url = self.endpoint(path, query)?;

        let token = match self.stored_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read auth token; sending request anonymously");
                None
            }
        };

        let mut builder = self.http.request(method.clone(), url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = body.apply(builder);

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            error!(%method, path, error = %e, "API request failed before a response");
            response::transport_error(e)
        })?;
        let status = response.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if status == StatusCode::UNAUTHORIZED {
            warn!(%method, path, elapsed_ms, "Authentication required; clearing session");
            if let Err(e) = self.clear_token().await {
                error!(error = %e, "Failed to clear auth token after 401");
            }
            self.publish(SessionEvent::AuthenticationRequired {
                path: path.to_string(),
            });
            return Err(AppError::authentication_required());
        }

        let is_json = response::is_json_content_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        );
        let text = response.text().await.map_err(response::transport_error)?;

        if !status.is_success() {
            let data = response::parse_body(is_json, &text).unwrap_or(Value::Null);
            let message = response::error_message(&data, status);
            error!(%method, path, status = status.as_u16(), elapsed_ms, message = %message, "API request failed");
            return Err(AppError::request_failed(status.as_u16(), message));
        }

        debug!(%method, path, status = status.as_u16(), elapsed_ms, "API request completed");
        response::parse_body(is_json, &text)
    }

    /// Issue a request and decode the body into `T`.
    pub(crate) async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> AppResult<T> {
        let value = self.request(method, path, query, body).await?;
        response::decode(value)
    }
}
