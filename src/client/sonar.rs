//! SonarQube API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode};

use super::{Credentials, SonarApi};
use crate::error::{ApiError, Result};
use crate::permissions::Permission;

/// Server version probe
const VERSION_PATH: &str = "/api/server/version";

/// Authenticated health probe
const PING_PATH: &str = "/api/system/ping";

const USERS_CREATE_PATH: &str = "/api/users/create";

const PERMISSIONS_ADD_USER_PATH: &str = "/api/permissions/add_user";

/// Expected body of a successful ping
const PONG: &[u8] = b"pong";

/// Maximum number of body bytes echoed back in an unexpected-body error
const BODY_PREVIEW_LEN: usize = 32;

/// SonarQube API client
pub struct SonarClient {
    http: HttpClient,
}

impl SonarClient {
    /// Create a new client with the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http })
    }

    fn url(host: &str, path: &str) -> String {
        format!("{}{}", host.trim_end_matches('/'), path)
    }

    /// Token as basic-auth username, empty password
    fn authed(builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.basic_auth(token, Option::<&str>::None)
    }

    fn expect_status(endpoint: &'static str, expected: StatusCode, actual: StatusCode) -> Result<()> {
        if actual == expected {
            Ok(())
        } else {
            Err(ApiError::BadStatus {
                endpoint,
                expected: expected.as_u16(),
                actual: actual.as_u16(),
            }
            .into())
        }
    }
}

/// Lossy preview of at most [`BODY_PREVIEW_LEN`] bytes of a response body
fn body_preview(body: &[u8]) -> String {
    let end = body.len().min(BODY_PREVIEW_LEN);
    String::from_utf8_lossy(&body[..end]).into_owned()
}

#[async_trait]
impl SonarApi for SonarClient {
    async fn validate_endpoint(&self, host: &str) -> Result<()> {
        let url = Self::url(host, VERSION_PATH);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(ApiError::from)?;
        Self::expect_status(VERSION_PATH, StatusCode::OK, response.status())
    }

    async fn validate_credential(&self, host: &str, token: &str) -> Result<()> {
        let url = Self::url(host, PING_PATH);
        debug!("GET {}", url);

        let response = Self::authed(self.http.get(&url), token)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::from)?;

        Self::expect_status(PING_PATH, StatusCode::OK, status)?;
        if &body[..] != PONG {
            return Err(ApiError::UnexpectedBody(body_preview(&body)).into());
        }
        Ok(())
    }

    async fn create_user(&self, creds: &Credentials, login: &str, password: &str) -> Result<()> {
        let url = Self::url(&creds.host, USERS_CREATE_PATH);
        debug!("POST {} (login={})", url, login);

        let form = [("login", login), ("name", login), ("password", password)];
        let response = Self::authed(self.http.post(&url), &creds.token)
            .form(&form)
            .send()
            .await
            .map_err(ApiError::from)?;

        Self::expect_status(USERS_CREATE_PATH, StatusCode::OK, response.status())
    }

    async fn add_user_permission(
        &self,
        creds: &Credentials,
        login: &str,
        permission: Permission,
        project_key: &str,
    ) -> Result<()> {
        let url = Self::url(&creds.host, PERMISSIONS_ADD_USER_PATH);
        debug!("POST {} (login={}, permission={})", url, login, permission);

        let form = [
            ("login", login),
            ("permission", permission.as_str()),
            ("projectKey", project_key),
        ];
        let response = Self::authed(self.http.post(&url), &creds.token)
            .form(&form)
            .send()
            .await
            .map_err(ApiError::from)?;

        Self::expect_status(
            PERMISSIONS_ADD_USER_PATH,
            StatusCode::NO_CONTENT,
            response.status(),
        )
    }
}
