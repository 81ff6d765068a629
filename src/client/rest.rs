//! REST API client implementation

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{PortalApi, TeamApi};
use super::models::{
    CreateTeamRequest, Document, JSON_API_MEDIA_TYPE, NewResource, Portal, PortalAttributes,
    Resource, TEAM_TYPE, Team, TeamAttributes, UpdateTeamRequest,
};
use crate::error::{ApiError, ConfigError, Result};

/// Path prefix of the versioned API below the configured host
const API_BASE_PATH: &str = "api/v1";

/// Settings API client speaking JSON:API over HTTP
pub struct RestClient {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
    timeout: Duration,
}

impl RestClient {
    /// Create a new client for `api_host` (e.g. `https://api.example.com`).
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(api_host: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "Request timeout must be greater than zero".to_string(),
            )
            .into());
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base = format!("{}/{}/", api_host.trim_end_matches('/'), API_BASE_PATH);
        let base_url = Url::parse(&base)
            .map_err(|e| ConfigError::Invalid(format!("Invalid API host '{}': {}", api_host, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!("Invalid API host '{}'", api_host)).into());
        }

        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.is_empty()),
            timeout,
        })
    }

    /// Build a URL from path segments, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base() was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn team_url(&self, org_id: &str, team_id: &str) -> Url {
        self.url(&["organization", org_id, "team", team_id])
    }

    /// Send a request and decode the JSON:API body.
    ///
    /// Returns `Ok(None)` for `204 No Content` and for empty bodies.
    async fn request<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, url);

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, JSON_API_MEDIA_TYPE);

        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            let payload = serde_json::to_vec(body)?;
            builder = builder.header(CONTENT_TYPE, JSON_API_MEDIA_TYPE).body(payload);
        }

        let response = builder.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        debug!("{} {} -> {}", method, url, status);

        match status {
            StatusCode::NO_CONTENT => Ok(None),
            status if status.is_success() => {
                let text = response.text().await.map_err(|e| self.map_transport(e))?;
                if text.trim().is_empty() {
                    return Ok(None);
                }
                let data = serde_json::from_str::<T>(&text).map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(Some(data))
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .ok()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| url.path().to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::CONFLICT => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Conflict".to_string());
                Err(ApiError::Conflict(error_msg).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .ok()
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }

    /// Transport failures, with the configured limit attached to timeouts
    fn map_transport(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::from(err)
        }
    }
}

#[async_trait]
impl PortalApi for RestClient {
    async fn list_portals(&self, org_id: &str) -> Result<Vec<Portal>> {
        let url = self.url(&["organization", org_id, "portal"]);
        let doc: Option<Document<Vec<Resource<PortalAttributes>>>> =
            self.request::<(), _>(Method::GET, url, None).await?;

        Ok(doc
            .map(|d| d.data.into_iter().map(Portal::from).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl TeamApi for RestClient {
    async fn get_team(&self, org_id: &str, team_id: &str) -> Result<Team> {
        let url = self.team_url(org_id, team_id);
        let doc: Option<Document<Option<Resource<TeamAttributes>>>> =
            self.request::<(), _>(Method::GET, url, None).await?;

        doc.and_then(|d| d.data)
            .map(|resource| Team::from_resource(resource, team_id))
            .ok_or_else(|| ApiError::NotFound(format!("team {}", team_id)).into())
    }

    async fn create_team(&self, org_id: &str, request: CreateTeamRequest) -> Result<Team> {
        let url = self.url(&["organization", org_id, "team"]);
        let name = request.name.clone();
        let body = Document::new(NewResource {
            kind: TEAM_TYPE,
            attributes: request,
        });

        let doc: Option<Document<Option<Resource<TeamAttributes>>>> =
            self.request(Method::POST, url, Some(&body)).await?;

        let resource = doc.and_then(|d| d.data).ok_or_else(|| {
            ApiError::InvalidResponse("Create response did not contain the new team".to_string())
        })?;

        let mut team = Team::from_resource(resource, "");
        if team.id.is_empty() {
            return Err(
                ApiError::InvalidResponse("Create response is missing the team id".to_string())
                    .into(),
            );
        }
        if team.name.is_empty() {
            team.name = name;
        }
        Ok(team)
    }

    async fn update_team(
        &self,
        org_id: &str,
        team_id: &str,
        request: UpdateTeamRequest,
    ) -> Result<Team> {
        let url = self.team_url(org_id, team_id);
        let body = Document::new(Resource {
            kind: TEAM_TYPE.to_string(),
            id: team_id.to_string(),
            attributes: request,
        });

        let doc: Option<Document<Option<Resource<TeamAttributes>>>> =
            self.request(Method::PATCH, url, Some(&body)).await?;

        match doc.and_then(|d| d.data) {
            Some(resource) => Ok(Team::from_resource(resource, team_id)),
            None => {
                debug!("Update of team {} returned no body, re-reading", team_id);
                self.get_team(org_id, team_id).await
            }
        }
    }

    async fn delete_team(&self, org_id: &str, team_id: &str) -> Result<()> {
        let url = self.team_url(org_id, team_id);
        let _: Option<serde_json::Value> = self.request::<(), _>(Method::DELETE, url, None).await?;
        Ok(())
    }
}
