//! Read-only helpers for the mock REST API (users, posts, photos).
//!
//! Each helper is a single `GET` with a status check: anything other than
//! `200` fails with the same generic error. No retry, paging or caching.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::HttpClient;
use super::types::RequestError;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network response was not ok")]
    NotOk { status: u16 },
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub album_id: u64,
    pub id: u64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
}

/// Fetch helpers bound to one API root.
#[derive(Clone)]
pub struct ResourceApi {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl ResourceApi {
    #[must_use]
    pub fn new(http: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// `GET /users`.
    ///
    /// # Errors
    ///
    /// See [`FetchError`].
    pub async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        self.fetch("users").await
    }

    /// `GET /users/{id}`.
    ///
    /// # Errors
    ///
    /// See [`FetchError`].
    pub async fn fetch_user(&self, id: u64) -> Result<User, FetchError> {
        self.fetch(&format!("users/{id}")).await
    }

    /// `GET /posts`.
    ///
    /// # Errors
    ///
    /// See [`FetchError`].
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, FetchError> {
        self.fetch("posts").await
    }

    /// `GET /photos`.
    ///
    /// # Errors
    ///
    /// See [`FetchError`].
    pub async fn fetch_photos(&self) -> Result<Vec<Photo>, FetchError> {
        self.fetch("photos").await
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<T, FetchError> {
        let url = resource_url(&self.base_url, resource);
        let response = match self.http.get(&url).await {
            Ok(response) => response,
            Err(RequestError::Status { status, .. }) => return Err(FetchError::NotOk { status }),
            Err(e) => return Err(e.into()),
        };
        if response.status != 200 {
            return Err(FetchError::NotOk { status: response.status });
        }
        Ok(serde_json::from_value(response.data)?)
    }
}

fn resource_url(base_url: &str, resource: &str) -> String {
    format!("{base_url}/{resource}")
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
