//! Rewards platform REST client.

use crate::config::PharosConfig;
use crate::error::BotError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use ethers::types::Address;
use ethers::utils::to_checksum;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{error, warn};

/// Longest response body echoed into logs and errors
const MAX_LOGGED_BODY: usize = 500;

/// Plain HTTP client honouring the configured timeout and proxy.
pub fn http_client(config: &PharosConfig) -> Result<Client> {
    client_builder(config)?
        .build()
        .context("Failed to build HTTP client")
}

fn client_builder(config: &PharosConfig) -> Result<reqwest::ClientBuilder> {
    let mut builder = Client::builder().timeout(config.request_timeout());
    if let Some(proxy_conf) = &config.proxy {
        let mut proxy = reqwest::Proxy::all(&proxy_conf.url)
            .with_context(|| format!("Invalid proxy url {}", proxy_conf.url))?;
        if let (Some(u), Some(p)) = (&proxy_conf.username, &proxy_conf.password) {
            proxy = proxy.basic_auth(u, p);
        }
        builder = builder.proxy(proxy);
    }
    Ok(builder)
}

fn header_map(headers: &std::collections::BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .with_context(|| format!("Invalid header name '{}'", name))?;
        let value = HeaderValue::from_str(value)
            .with_context(|| format!("Invalid value for header '{}'", name))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Bearer token obtained at login
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Session(***)")
    }
}

/// Points snapshot from `/user/profile`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Profile {
    #[serde(rename = "TaskPoints", default)]
    pub task_points: u64,
    #[serde(rename = "TotalPoints", default)]
    pub total_points: u64,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "InviteCode", default)]
    pub invite_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInStatus {
    Claimed,
    /// The platform answered with a non-zero code, normally "already checked in today"
    AlreadyDone(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaucetStatus {
    Claimed,
    /// HTTP 200 carrying an application-level error
    Rejected(String),
    Failed(String),
}

impl FaucetStatus {
    pub fn is_claimed(&self) -> bool {
        matches!(self, FaucetStatus::Claimed)
    }
}

#[async_trait]
pub trait RewardsApi: Send + Sync {
    /// Logs in with a signed message and keeps the session for later calls
    async fn login(&mut self, address: Address, signature: &str) -> Result<Session, BotError>;

    fn session(&self) -> Option<&Session>;

    /// `None` without a session or on any failure
    async fn profile(&self, address: Address) -> Option<Profile>;

    async fn check_in(&self, address: Address) -> CheckInStatus;

    async fn claim_faucet(&self, address: Address) -> FaucetStatus;
}

pub fn extract_jwt(body: &Value) -> Option<String> {
    body.pointer("/data/jwt")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub fn extract_profile(body: &Value) -> Option<Profile> {
    let info = body.pointer("/data/user_info")?;
    if info.is_null() {
        return None;
    }
    serde_json::from_value(info.clone()).ok()
}

/// Application code; a body without one counts as success
pub fn app_code(body: &Value) -> i64 {
    body.get("code").and_then(Value::as_i64).unwrap_or(0)
}

pub fn app_message(body: &Value) -> String {
    body.get("msg")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

pub fn check_in_status(body: &Value) -> CheckInStatus {
    match app_code(body) {
        0 => CheckInStatus::Claimed,
        code => CheckInStatus::AlreadyDone(format!("code {}: {}", code, app_message(body))),
    }
}

pub fn faucet_status(status: StatusCode, body: &Value) -> FaucetStatus {
    if status != StatusCode::OK {
        return FaucetStatus::Failed(format!("HTTP {}", status.as_u16()));
    }
    match app_code(body) {
        0 => FaucetStatus::Claimed,
        code => FaucetStatus::Rejected(format!("code {}: {}", code, app_message(body))),
    }
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_LOGGED_BODY {
        body.to_string()
    } else {
        let mut end = MAX_LOGGED_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}

/// Reqwest-backed `RewardsApi`
pub struct RewardsClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl RewardsClient {
    pub fn new(config: &PharosConfig) -> Result<Self> {
        let http = client_builder(config)?
            .default_headers(header_map(&config.headers)?)
            .build()
            .context("Failed to build rewards API client")?;

        Ok(Self {
            http,
            base_url: config.network.api_base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(s) => req.bearer_auth(s.token()),
            None => req,
        }
    }

    /// Sends and returns the status with the body parsed as JSON
    /// (`Value::Null` for empty or non-JSON bodies) and as raw text.
    async fn send(&self, req: RequestBuilder) -> Result<(StatusCode, Value, String), reqwest::Error> {
        let response = self.authed(req).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok((status, body, text))
    }
}

#[async_trait]
impl RewardsApi for RewardsClient {
    async fn login(&mut self, address: Address, signature: &str) -> Result<Session, BotError> {
        let addr = to_checksum(&address, None);
        let req = self
            .http
            .post(self.url("/user/login"))
            .query(&[("address", addr.as_str()), ("signature", signature)]);

        let (status, body, text) = self
            .send(req)
            .await
            .map_err(|e| BotError::connection(&self.base_url, e))?;

        if !status.is_success() {
            error!("Response status: {}", status.as_u16());
            error!("Response data: {}", truncate(&text));
            return Err(BotError::Auth {
                reason: format!("login returned HTTP {}", status.as_u16()),
                status: Some(status.as_u16()),
                body: Some(truncate(&text)),
            });
        }

        let token = extract_jwt(&body).ok_or_else(|| BotError::Auth {
            reason: "no JWT token found in response".to_string(),
            status: Some(status.as_u16()),
            body: Some(truncate(&text)),
        })?;

        let session = Session::new(token);
        self.session = Some(session.clone());
        Ok(session)
    }

    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    async fn profile(&self, address: Address) -> Option<Profile> {
        if self.session().is_none() {
            warn!("Profile requested before login");
            return None;
        }

        let addr = to_checksum(&address, None);
        let req = self
            .http
            .get(self.url("/user/profile"))
            .query(&[("address", addr.as_str())]);

        match self.send(req).await {
            Ok((status, body, _)) if status.is_success() => {
                let profile = extract_profile(&body);
                if profile.is_none() {
                    warn!("Profile response had no user_info");
                }
                profile
            }
            Ok((status, _, text)) => {
                warn!(
                    "Failed to get profile: HTTP {} {}",
                    status.as_u16(),
                    truncate(&text)
                );
                None
            }
            Err(e) => {
                warn!("Failed to get profile: {}", e);
                None
            }
        }
    }

    async fn check_in(&self, address: Address) -> CheckInStatus {
        if self.session().is_none() {
            return CheckInStatus::Failed("not authenticated".to_string());
        }

        let addr = to_checksum(&address, None);
        let req = self
            .http
            .post(self.url("/sign/in"))
            .query(&[("address", addr.as_str())]);

        match self.send(req).await {
            Ok((status, body, _)) if status.is_success() => check_in_status(&body),
            Ok((status, _, text)) => {
                error!("Response status: {}", status.as_u16());
                error!("Response data: {}", truncate(&text));
                CheckInStatus::Failed(format!("HTTP {}", status.as_u16()))
            }
            Err(e) => {
                error!("Check-in failed: {}", e);
                if e.is_timeout() || e.is_connect() {
                    error!("No response received from server");
                }
                CheckInStatus::Failed(e.to_string())
            }
        }
    }

    async fn claim_faucet(&self, address: Address) -> FaucetStatus {
        if self.session().is_none() {
            return FaucetStatus::Failed("not authenticated".to_string());
        }

        let addr = to_checksum(&address, None);
        let req = self
            .http
            .post(self.url("/faucet/daily"))
            .query(&[("address", addr.as_str())]);

        match self.send(req).await {
            Ok((status, body, text)) => {
                let result = faucet_status(status, &body);
                if !result.is_claimed() {
                    error!("Response status: {}", status.as_u16());
                    error!("Response data: {}", truncate(&text));
                }
                result
            }
            Err(e) => {
                error!("Faucet failed: {}", e);
                FaucetStatus::Failed(e.to_string())
            }
        }
    }
}
