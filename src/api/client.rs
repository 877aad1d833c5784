//! Client for the blog backend.
//!
//! Four calls make up the contract: list posts, register, log in, and create
//! a post. Each returns a value the caller can act on directly; transport and
//! decoding failures only surface as errors where the caller needs to tell
//! them apart from a backend refusal.

use std::sync::Arc;

use crate::adapters::ReqwestHttpClient;
use crate::api::types::{
    CreatePostOutcome, LoginOutcome, LoginRequest, Post, PostDraft, Registration, TokenPair,
};
use crate::traits::{Headers, HttpClient, HttpError, Response};

/// Default backend URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const POSTS_PATH: &str = "/posts/";
pub const REGISTER_PATH: &str = "/api/register/";
pub const TOKEN_PATH: &str = "/api/token/";
pub const HEALTH_PATH: &str = "/health/";

/// Shown when login fails without a `detail` from the backend.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Returned by [`BlogApiClient::create_post`] when no token is held.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "User not authenticated. No access token found.";

/// Returned by [`BlogApiClient::create_post`] when the backend gives no reason.
pub const CREATE_POST_FAILED_MESSAGE: &str = "Failed to create post.";

/// Error type for blog API calls.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response
    Http(HttpError),
    /// The response body was not the JSON we expected
    Decode { status: u16, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "{}", e),
            ApiError::Decode { status, message } => {
                write!(f, "Invalid response ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            ApiError::Decode { .. } => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Http(e)
    }
}

/// Client for the blog backend.
#[derive(Clone)]
pub struct BlogApiClient {
    /// Base URL, without a trailing slash
    base_url: String,
    http: Arc<dyn HttpClient>,
    /// Bearer token for authenticated calls
    auth_token: Option<String>,
}

impl std::fmt::Debug for BlogApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.auth_token.is_some())
            .finish()
    }
}

impl BlogApiClient {
    /// Create a client for `base_url` over the given transport.
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            auth_token: None,
        }
    }

    /// Create a client for `base_url` using reqwest.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(base_url, Arc::new(ReqwestHttpClient::new()))
    }

    /// Set the bearer token.
    pub fn with_auth(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    /// Set or remove the bearer token on an existing client.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch every post.
    ///
    /// GET /posts/
    ///
    /// Never fails: an error status, a body that isn't a list, or a transport
    /// failure all produce an empty list.
    pub async fn list_posts(&self) -> Vec<Post> {
        let url = self.url(POSTS_PATH);
        let response = match self.http.get(&url, &Headers::new()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch posts: {}", e);
                return Vec::new();
            }
        };

        if !response.is_success() {
            tracing::warn!("Post list returned status {}", response.status);
            return Vec::new();
        }

        match response.json::<serde_json::Value>() {
            Ok(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<Post>(item) {
                    Ok(post) => Some(post),
                    Err(e) => {
                        tracing::debug!("Skipping malformed post: {}", e);
                        None
                    }
                })
                .collect(),
            Ok(_) => {
                tracing::warn!("Post list was not an array");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Post list was not JSON: {}", e);
                Vec::new()
            }
        }
    }

    /// Create an account.
    ///
    /// POST /api/register/ (multipart)
    ///
    /// Returns the backend's JSON body as-is, whatever the status.
    pub async fn register(&self, registration: &Registration) -> Result<serde_json::Value, ApiError> {
        let url = self.url(REGISTER_PATH);
        tracing::debug!("Registering {}", registration.username);
        let response = self
            .http
            .post_multipart(&url, registration.to_form(), &Headers::new())
            .await?;
        decode_body(&response)
    }

    /// Exchange credentials for a token pair.
    ///
    /// POST /api/token/ (JSON)
    ///
    /// The call succeeds only when the backend answers 2xx with both an
    /// `access` and a `refresh` string. Anything else is a rejection carrying
    /// the backend's `detail`, or a generic message.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, ApiError> {
        let url = self.url(TOKEN_PATH);
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode {
            status: 0,
            message: e.to_string(),
        })?;

        let response = self.http.post_json(&url, &body, &Headers::new()).await?;
        let body = decode_body(&response)?;

        if response.is_success() {
            if let Some(tokens) = token_pair(&body) {
                tracing::info!("Login succeeded for {}", request.username);
                return Ok(LoginOutcome::Authenticated(tokens));
            }
        }

        let message = body
            .get("detail")
            .and_then(|d| d.as_str())
            .unwrap_or(INVALID_CREDENTIALS_MESSAGE)
            .to_string();
        tracing::info!("Login rejected ({}): {}", response.status, message);
        Ok(LoginOutcome::Rejected { message, body })
    }

    /// Publish a post.
    ///
    /// POST /posts/ (multipart, bearer auth)
    ///
    /// Without a token no request is made. A response whose body carries an
    /// `id` is a success, whatever else it holds; everything else is a failure
    /// with the backend's reason or a generic message.
    pub async fn create_post(&self, draft: &PostDraft) -> CreatePostOutcome {
        let Some(token) = self.auth_token.as_deref() else {
            return CreatePostOutcome::failed(NOT_AUTHENTICATED_MESSAGE);
        };

        let url = self.url(POSTS_PATH);
        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));

        let response = match self.http.post_multipart(&url, draft.to_form(), &headers).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Create post failed: {}", e);
                return CreatePostOutcome::failed(CREATE_POST_FAILED_MESSAGE);
            }
        };

        let body = match response.json::<serde_json::Value>() {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Create post returned non-JSON ({}): {}", response.status, e);
                return CreatePostOutcome::failed(CREATE_POST_FAILED_MESSAGE);
            }
        };

        if let Some(id) = body.get("id") {
            let post = serde_json::from_value::<Post>(body.clone()).unwrap_or_else(|e| {
                tracing::warn!("Created post did not decode, keeping the draft: {}", e);
                draft.to_post(id.as_i64().unwrap_or_default())
            });
            tracing::info!("Created post {}", post.id);
            return CreatePostOutcome::Created(post);
        }

        let message =
            describe_error(&body).unwrap_or_else(|| CREATE_POST_FAILED_MESSAGE.to_string());
        tracing::info!("Create post refused ({}): {}", response.status, message);
        CreatePostOutcome::Failed { message }
    }

    /// Check that the backend is up.
    ///
    /// GET /health/
    pub async fn health(&self) -> Result<bool, ApiError> {
        let url = self.url(HEALTH_PATH);
        let response = self.http.get(&url, &Headers::new()).await?;
        if !response.is_success() {
            return Ok(false);
        }
        let body = decode_body(&response)?;
        Ok(body.get("status").and_then(|s| s.as_str()) == Some("ok"))
    }
}

fn decode_body(response: &Response) -> Result<serde_json::Value, ApiError> {
    response.json().map_err(|e| ApiError::Decode {
        status: response.status,
        message: e.to_string(),
    })
}

fn token_pair(body: &serde_json::Value) -> Option<TokenPair> {
    let access = body.get("access")?.as_str()?;
    let refresh = body.get("refresh")?.as_str()?;
    if access.is_empty() {
        return None;
    }
    Some(TokenPair {
        access: access.to_string(),
        refresh: refresh.to_string(),
    })
}

/// Pull a human-readable reason out of an error body.
///
/// Looks at `error`, then `detail`, then the first field error of a
/// validation response such as `{"title": ["This field is required."]}`.
pub fn describe_error(body: &serde_json::Value) -> Option<String> {
    for key in ["error", "detail"] {
        if let Some(message) = body.get(key).and_then(|v| v.as_str()) {
            return Some(message.to_string());
        }
    }

    let fields = body.as_object()?;
    fields.iter().find_map(|(field, value)| {
        let first = match value {
            serde_json::Value::Array(items) => items.first()?.as_str()?,
            serde_json::Value::String(s) => s.as_str(),
            _ => return None,
        };
        Some(format!("{}: {}", field, first))
    })
}
