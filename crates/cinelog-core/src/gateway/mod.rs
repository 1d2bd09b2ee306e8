//! Catalog service gateway
//!
//! Async REST client for the movie catalog backend. Operations take
//! already-validated domain values and a session token where the backend
//! requires authentication. A connectivity failure is logged and translated
//! into the operation's negative result (`None`, `false`, empty listing);
//! transport error types never reach callers.

pub mod types;

use std::fmt;
use std::time::Duration;

use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::domain::{
    Category, Description, Director, Email, Id, ImageUrl, LikeRecord, MovieRecord, Password,
    Title, Username, Year,
};
use crate::error::{Error, Result};

use types::{
    AddLikeRequest, CreateMovieRequest, LoginRequest, LoginResponse, SignUpRequest,
    UserTypeResponse,
};

/// Default catalog API root
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Opaque session key returned by login
///
/// `Debug` keeps only the last four characters; the full key leaves the
/// process solely inside the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn header_value(&self) -> String {
        format!("Token {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= 4 {
            write!(f, "SessionToken(***)")
        } else {
            write!(f, "SessionToken(***{})", &self.0[self.0.len() - 4..])
        }
    }
}

/// Result of a registration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// Account created
    Created,
    /// The two passwords differ; nothing was sent to the server
    PasswordMismatch,
    /// The server declined the registration
    Rejected,
    /// The server could not be reached
    Unreachable,
}

/// Movie catalog REST client
#[derive(Clone)]
pub struct CatalogClient {
    http: HttpClient,
    base_url: String,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for creating a CatalogClient
pub struct CatalogClientBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Default for CatalogClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout_secs: None,
        }
    }

    /// Set the API root (defaults to the local development server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Build the CatalogClient
    pub fn build(self) -> Result<CatalogClient> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(
                self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ))
            .build()
            .map_err(Error::Network)?;

        Ok(CatalogClient {
            http,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }
}

impl CatalogClient {
    /// Create a client against the default API root
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new builder for CatalogClient
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Create a client from API configuration, honoring the env override
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::builder()
            .base_url(config.resolved_base_url())
            .timeout_secs(config.timeout_secs)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a new account
    ///
    /// Returns without touching the network when the two passwords differ.
    pub async fn sign_up(
        &self,
        username: &Username,
        email: &Email,
        password: &Password,
        confirm: &Password,
    ) -> SignUpOutcome {
        if password != confirm {
            return SignUpOutcome::PasswordMismatch;
        }

        let body = SignUpRequest {
            username: username.as_str().to_string(),
            email: email.as_str().to_string(),
            password1: password.as_str().to_string(),
            password2: confirm.as_str().to_string(),
        };

        debug!(username = %username, "Registering user");
        match self
            .http
            .post(self.url("/auth/registration"))
            .form(&body)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => SignUpOutcome::Created,
            Ok(response) => {
                warn!(status = %response.status(), "Registration rejected");
                SignUpOutcome::Rejected
            }
            Err(error) => {
                warn!(error = %error, "Could not reach the catalog server");
                SignUpOutcome::Unreachable
            }
        }
    }

    /// Authenticate and obtain a session token
    pub async fn login(&self, username: &Username, password: &Password) -> Option<SessionToken> {
        let body = LoginRequest {
            username: username.as_str().to_string(),
            password: password.as_str().to_string(),
        };

        debug!(username = %username, "Logging in");
        let response = match self
            .http
            .post(self.url("/auth/login/"))
            .form(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(error = %error, "Could not reach the catalog server");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            return None;
        }

        match response.json::<LoginResponse>().await {
            Ok(body) => Some(SessionToken::new(body.key)),
            Err(error) => {
                warn!(error = %error, "Malformed login response");
                None
            }
        }
    }

    /// Invalidate the session server-side
    pub async fn logout(&self, token: &SessionToken) -> bool {
        debug!("Logging out");
        match self
            .http
            .post(self.url("/auth/logout/"))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(error) => {
                warn!(error = %error, "Could not reach the catalog server");
                false
            }
        }
    }

    /// Whether the authenticated account is an administrator
    pub async fn is_admin_user(&self, token: &SessionToken) -> bool {
        let response = match self
            .http
            .get(self.url("/movies/user-type/"))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(error = %error, "Could not reach the catalog server");
                return false;
            }
        };

        match response.json::<UserTypeResponse>().await {
            Ok(body) => body.user_type == "admin",
            Err(error) => {
                warn!(error = %error, "Malformed user-type response");
                false
            }
        }
    }

    /// Like a movie for the authenticated user
    pub async fn add_like(&self, token: &SessionToken, movie_id: Id) -> bool {
        let body = AddLikeRequest {
            movie: movie_id.value(),
        };

        debug!(movie_id = %movie_id, "Adding like");
        match self
            .http
            .post(self.url("/likes/"))
            .header(AUTHORIZATION, token.header_value())
            .form(&body)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::CREATED,
            Err(error) => {
                warn!(error = %error, "Could not reach the catalog server");
                false
            }
        }
    }

    /// Remove the authenticated user's like from a movie
    pub async fn remove_like(&self, token: &SessionToken, movie_id: Id) -> bool {
        debug!(movie_id = %movie_id, "Removing like");
        self.delete_expecting_no_content(token, &format!("/likes/by_movie/{}/", movie_id.value()))
            .await
    }

    /// Create a movie record (administrators only)
    #[allow(clippy::too_many_arguments)]
    pub async fn add_movie(
        &self,
        token: &SessionToken,
        title: &Title,
        description: &Description,
        year: &Year,
        category: &Category,
        director: &Director,
        image_url: &ImageUrl,
    ) -> bool {
        let body = CreateMovieRequest {
            title: title.as_str().to_string(),
            description: description.as_str().to_string(),
            year: year.value(),
            category: category.as_str().to_string(),
            director: director.as_str().to_string(),
            image_url: image_url.as_str().to_string(),
        };

        debug!(title = %title, "Adding movie");
        match self
            .http
            .post(self.url("/movies/"))
            .header(AUTHORIZATION, token.header_value())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::CREATED,
            Err(error) => {
                warn!(error = %error, "Could not reach the catalog server");
                false
            }
        }
    }

    /// Resubmit a reconciled movie record (administrators only)
    pub async fn update_movie(&self, token: &SessionToken, record: &MovieRecord) -> bool {
        debug!(movie_id = record.id, "Updating movie");
        match self
            .http
            .put(self.url(&format!("/movies/{}/", record.id)))
            .header(AUTHORIZATION, token.header_value())
            .json(record)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(error) => {
                warn!(error = %error, "Could not reach the catalog server");
                false
            }
        }
    }

    /// Delete a movie record (administrators only)
    pub async fn remove_movie(&self, token: &SessionToken, movie_id: Id) -> bool {
        debug!(movie_id = %movie_id, "Removing movie");
        self.delete_expecting_no_content(token, &format!("/movies/{}/", movie_id.value()))
            .await
    }

    /// All catalog movies
    pub async fn get_movies(&self) -> Vec<MovieRecord> {
        self.fetch_records("/movies/").await
    }

    /// Catalog movies sorted by title server-side
    pub async fn sort_movies_by_title(&self) -> Vec<MovieRecord> {
        self.fetch_records("/movies/sort-by-title/").await
    }

    /// A single movie by id
    pub async fn get_movie(&self, movie_id: Id) -> Option<MovieRecord> {
        let path = format!("/movies/{}/", movie_id.value());
        let response = match self.http.get(self.url(&path)).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(error = %error, path = %path, "Could not reach the catalog server");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            return None;
        }

        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(error) => {
                warn!(error = %error, path = %path, "Malformed movie response");
                return None;
            }
        };

        match MovieRecord::from_json(&payload) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(error = %error, path = %path, "Malformed movie record");
                None
            }
        }
    }

    /// Movies the authenticated user has liked
    pub async fn get_liked_movies(&self, token: &SessionToken) -> Vec<LikeRecord> {
        let response = match self
            .http
            .get(self.url("/likes/"))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await
        {
            Ok(response) => response,
            Err(error) => {
                warn!(error = %error, "Could not reach the catalog server");
                return Vec::new();
            }
        };

        if response.status() != StatusCode::OK {
            return Vec::new();
        }

        match response.json::<Vec<Value>>().await {
            Ok(payload) => parse_like_records(&payload),
            Err(error) => {
                warn!(error = %error, "Malformed like listing");
                Vec::new()
            }
        }
    }

    async fn delete_expecting_no_content(&self, token: &SessionToken, path: &str) -> bool {
        match self
            .http
            .delete(self.url(path))
            .header(AUTHORIZATION, token.header_value())
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::NO_CONTENT,
            Err(error) => {
                warn!(error = %error, path = %path, "Could not reach the catalog server");
                false
            }
        }
    }

    async fn fetch_records(&self, path: &str) -> Vec<MovieRecord> {
        let response = match self.http.get(self.url(path)).send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(error = %error, path = %path, "Could not reach the catalog server");
                return Vec::new();
            }
        };

        if response.status() != StatusCode::OK {
            return Vec::new();
        }

        match response.json::<Vec<Value>>().await {
            Ok(payload) => parse_movie_records(&payload),
            Err(error) => {
                warn!(error = %error, path = %path, "Malformed movie listing");
                Vec::new()
            }
        }
    }
}

/// Extract well-formed movie records, dropping malformed entries
fn parse_movie_records(payload: &[Value]) -> Vec<MovieRecord> {
    payload
        .iter()
        .filter_map(|entry| match MovieRecord::from_json(entry) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(error = %error, "Skipping malformed movie record");
                None
            }
        })
        .collect()
}

/// Extract well-formed like entries, dropping malformed ones
fn parse_like_records(payload: &[Value]) -> Vec<LikeRecord> {
    payload
        .iter()
        .filter_map(|entry| match LikeRecord::from_json(entry) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(error = %error, "Skipping malformed like entry");
                None
            }
        })
        .collect()
}
