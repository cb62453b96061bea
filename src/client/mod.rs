//! REST client for the external prompt-storage backend.
//!
//! The backend owns persistence and LLM calling; this client owns the
//! contract: typed payloads, boundary validation, a TTL cache for version
//! reads, and the local save/publish gates that refuse to touch the network
//! while any variable is undefined.
//!
//! # Example
//!
//! ```rust,no_run
//! use promptdeck::client::PromptApiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PromptApiClient::new("https://api.example.com")
//!     .with_api_key("secret");
//!
//! let mut session = client.get_version("p1", "v3").await?.into_session()?;
//! session.set_user_prompt("Summarize {{document}} in {{language}}.");
//! session.define("document")?;
//! session.define("language")?;
//! client.save_version("p1", "v3", &session).await?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
mod types;

pub use error::ApiError;
pub use types::{
    PublishResponse, SaveVersionRequest, TestRunResponse, VariableRecord, VersionRecord,
};

use crate::session::EditorSession;
use cache::TtlCache;
use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use types::ErrorBody;

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// Client for the prompt-management backend.
pub struct PromptApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    version_cache: TtlCache<VersionRecord>,
}

impl PromptApiClient {
    /// Creates a client against the given base URL. A trailing slash is
    /// tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            api_key: None,
            version_cache: TtlCache::new(DEFAULT_CACHE_TTL),
        }
    }

    /// Sets a bearer token sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides how long version reads are served from cache. Zero
    /// disables caching.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.version_cache.set_ttl(ttl);
        self
    }

    /// Fetches a prompt version, serving repeat reads from the TTL cache.
    ///
    /// The record's variable names are validated before it is returned or
    /// cached.
    pub async fn get_version(
        &self,
        prompt_id: &str,
        version_id: &str,
    ) -> Result<VersionRecord, ApiError> {
        let url = self.version_url(prompt_id, version_id);
        if let Some(hit) = self.version_cache.get(&url) {
            debug!("version cache hit for {url}");
            return Ok(hit);
        }

        let response = self.send(self.http.get(&url)).await?;
        let record: VersionRecord = response
            .json()
            .await
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))?;
        record.validate()?;

        self.version_cache.insert(url, record.clone());
        Ok(record)
    }

    /// Persists a version's bodies and defined variables.
    ///
    /// Refused locally, with no request issued, while the session has
    /// undefined variables.
    pub async fn save_version(
        &self,
        prompt_id: &str,
        version_id: &str,
        session: &EditorSession,
    ) -> Result<(), ApiError> {
        let body = SaveVersionRequest::from_session(session)?;
        let url = self.version_url(prompt_id, version_id);

        self.send(self.http.put(&url).json(&body)).await?;
        self.version_cache.invalidate(&url);
        debug!("saved version {version_id} of prompt {prompt_id}");
        Ok(())
    }

    /// Promotes a version to production. Gated locally like
    /// [`save_version`](Self::save_version).
    pub async fn publish_version(
        &self,
        prompt_id: &str,
        version_id: &str,
        session: &EditorSession,
    ) -> Result<PublishResponse, ApiError> {
        session.ensure_publishable()?;
        let url = format!("{}/publish", self.version_url(prompt_id, version_id));

        let response = self.send(self.http.post(&url)).await?;
        self.version_cache
            .invalidate(&self.version_url(prompt_id, version_id));
        response
            .json()
            .await
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    /// Runs the version against its LLM provider with the session's flat
    /// `{name: value}` test inputs. Pass-through: undefined variables do
    /// not gate a test run.
    pub async fn run_test(
        &self,
        prompt_id: &str,
        version_id: &str,
        session: &EditorSession,
    ) -> Result<TestRunResponse, ApiError> {
        let url = format!("{}/test", self.version_url(prompt_id, version_id));
        let inputs = session.test_inputs();

        let response = self.send(self.http.post(&url).json(&inputs)).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    fn version_url(&self, prompt_id: &str, version_id: &str) -> String {
        format!(
            "{}/prompts/{}/versions/{}",
            self.base_url, prompt_id, version_id
        )
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Request(err.to_string()))?;
        check_status(response).await
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|err| err.detail)
        .unwrap_or(body);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
