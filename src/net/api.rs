//! REST API client for the back-office API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, carrying the session
//! token as a bearer header.
//! Server-side (SSR): every call fails with [`ApiError::Network`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>` instead of panics. A 401 maps to
//! [`ApiError::Auth`] so the auth facade can tear down an expired session.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::resources::Resource;
use super::types::{Credentials, LoginResponse};

pub const LOGIN_ENDPOINT: &str = "/auth/login";

/// HTTP verbs used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Anything that can exchange credentials for a token.
pub trait AuthTransport {
    /// Submit `credentials` and return the issued token.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<LoginResponse, ApiError>>;
}

/// Bearer-authenticated client bound to one API base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, token: None }
    }

    /// Attach (or drop) the bearer token. Blank tokens are dropped.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API-relative `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `Authorization` header value, when a token is attached.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.token.as_deref().map(|token| format!("Bearer {token}"))
    }

    /// `GET path` and decode a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status, or
    /// an undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self
                .request(Method::Get, path)
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            check_status(resp.status())?;
            resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(unavailable())
        }
    }

    /// Send a JSON `body` with `method` and decode a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on serialization or transport failure,
    /// non-success status, or an undecodable body.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        #[cfg(feature = "hydrate")]
        {
            let resp = self
                .request(method, path)
                .json(body)
                .map_err(|e| ApiError::Decode(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            check_status(resp.status())?;
            resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, path, body);
            Err(unavailable())
        }
    }

    /// `DELETE path`, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-success status.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self
                .request(Method::Delete, path)
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            check_status(resp.status())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(unavailable())
        }
    }

    /// `GET path` and return the raw body (PDF, ZIP).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-success status.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = self
                .request(Method::Get, path)
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            check_status(resp.status())?;
            resp.binary().await.map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = path;
            Err(unavailable())
        }
    }

    /// List every record of `resource`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, ApiError> {
        self.get_json(resource.collection_path()).await
    }

    /// Fetch one record of `resource`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_json`].
    pub async fn fetch<T: DeserializeOwned>(&self, resource: Resource, id: &str) -> Result<T, ApiError> {
        self.get_json(&resource.item_path(id)).await
    }

    /// Create a record of `resource`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn create<B, T>(&self, resource: Resource, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send_json(Method::Post, resource.collection_path(), body).await
    }

    /// Replace a record of `resource`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn update<B, T>(&self, resource: Resource, id: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.send_json(Method::Put, &resource.item_path(id), body).await
    }

    /// Delete a record of `resource`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::delete`].
    pub async fn remove(&self, resource: Resource, id: &str) -> Result<(), ApiError> {
        self.delete(&resource.item_path(id)).await
    }

    /// Download the binary rendition of a record (invoice PDF, billet ZIP).
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_bytes`].
    pub async fn download(&self, resource: Resource, id: &str) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(&resource.download_path(id)).await
    }

    #[cfg(feature = "hydrate")]
    fn request(&self, method: Method, path: &str) -> gloo_net::http::RequestBuilder {
        use gloo_net::http::Request;

        let url = self.url(path);
        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };
        match self.authorization() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }
}

impl AuthTransport for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        match self.send_json(Method::Post, LOGIN_ENDPOINT, credentials).await {
            Err(ApiError::Auth(_)) => Err(ApiError::Auth("invalid credentials".to_owned())),
            other => other,
        }
    }
}

/// Map an HTTP status onto the error taxonomy.
pub(crate) fn check_status(status: u16) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::Auth(format!("rejected with status {status}"))),
        _ => Err(ApiError::Status { status }),
    }
}

#[cfg(not(feature = "hydrate"))]
fn unavailable() -> ApiError {
    ApiError::Network("not available on server".to_owned())
}
