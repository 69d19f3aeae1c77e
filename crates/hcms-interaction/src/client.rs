//! reqwest-backed client shared by every port implementation.

use std::time::Duration;

use hcms_core::api::ActionOutcome;
use hcms_core::config::{PortalConfig, TokenPlacement};
use hcms_core::error::{HcmsError, Result};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;

use crate::endpoints::Endpoints;
use crate::response::{self, ActionMessages};

/// Connection settings for [`HttpHospitalClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token_placement: TokenPlacement,
    /// `None` disables the per-request timeout.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token_placement: TokenPlacement::default(),
            timeout: PortalConfig::default().request_timeout(),
        }
    }

    pub fn with_token_placement(mut self, placement: TokenPlacement) -> Self {
        self.token_placement = placement;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&PortalConfig> for ClientConfig {
    fn from(config: &PortalConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            token_placement: config.token_placement,
            timeout: config.request_timeout(),
        }
    }
}

/// How a request carries the session token.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Auth<'a> {
    Anonymous,
    Token(&'a str),
    /// The URL already embeds the token as a path segment.
    InPath(&'a str),
}

/// HTTP client for the hospital backend.
#[derive(Clone)]
pub struct HttpHospitalClient {
    client: Client,
    endpoints: Endpoints,
    placement: TokenPlacement,
    timeout: Option<Duration>,
}

impl HttpHospitalClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoints = Endpoints::new(&config.base_url)?;
        tracing::info!(
            base_url = %endpoints.base(),
            token_placement = %config.token_placement,
            "HTTP client configured"
        );
        Ok(Self {
            client: Client::new(),
            endpoints,
            placement: config.token_placement,
            timeout: config.timeout,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) fn request(&self, method: Method, mut url: Url, auth: Auth<'_>) -> RequestBuilder {
        let mut bearer = None;
        match (auth, self.placement) {
            (Auth::Token(token), TokenPlacement::Query) => {
                url.query_pairs_mut().append_pair("token", token);
            }
            (Auth::Token(token) | Auth::InPath(token), TokenPlacement::Header) => {
                bearer = Some(token);
            }
            _ => {}
        }

        tracing::debug!(%method, url = %redact(&url), "Sending request");

        let mut builder = self.client.request(method, url);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Sends a read request and returns the parsed success body.
    pub(crate) async fn fetch(&self, request: RequestBuilder) -> Result<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| response::transport_error(&e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| response::transport_error(&e))?;

        if !status.is_success() {
            let body = response::parse_body(&text).ok();
            let err = response::status_error(status.as_u16(), body.as_ref());
            tracing::warn!(status = status.as_u16(), error = %err, "Fetch failed");
            return Err(err);
        }
        response::parse_body(&text)
    }

    /// Sends a write request; every failure is folded into the outcome.
    pub(crate) async fn act(
        &self,
        request: RequestBuilder,
        messages: &ActionMessages,
    ) -> ActionOutcome {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Write request failed to send");
                return response::network_outcome(messages);
            }
        };
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => response::parse_body(&text).ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read write response");
                None
            }
        };
        let outcome = response::action_outcome(status, body, messages);
        if !outcome.success {
            tracing::warn!(status, message = %outcome.message, "Write request rejected");
        }
        outcome
    }

    /// Sends a login request and returns the issued token.
    pub(crate) async fn login(&self, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| response::transport_error(&e))?;
        let status = response.status();
        if !status.is_success() {
            tracing::info!(status = status.as_u16(), "Login rejected");
            return Err(HcmsError::InvalidCredentials);
        }
        let text = response
            .text()
            .await
            .map_err(|e| response::transport_error(&e))?;
        response::token(&response::parse_body(&text)?)
    }
}

/// Renders a URL for logs with the `token` query pair and the trailing
/// `token/{token}` path segment masked.
pub(crate) fn redact(url: &Url) -> String {
    const MASK: &str = "***";
    let mut shown = url.clone();

    if url.query_pairs().any(|(key, _)| key == "token") {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                let value = if key == "token" { MASK.to_string() } else { value.into_owned() };
                (key.into_owned(), value)
            })
            .collect();
        shown.query_pairs_mut().clear().extend_pairs(pairs);
    }

    if let Some(segments) = url.path_segments() {
        let mut segments: Vec<&str> = segments.collect();
        if let [.., marker, last] = segments.as_mut_slice() {
            if *marker == "token" {
                *last = MASK;
                shown.set_path(&segments.join("/"));
            }
        }
    }
    shown.to_string()
}
