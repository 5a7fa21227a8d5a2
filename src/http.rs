//! Shared HTTP plumbing for the external collaborators
//!
//! Every outbound call goes through [`send`] and [`parse_json`], which turn
//! transport errors, non-2xx statuses and undecodable bodies into
//! [`TourGuideError::UpstreamUnavailable`] with a distinct diagnostic each.
//! No retries are performed; a timeout counts as a transport error.

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{TourGuideError, Upstream};
use crate::Result;

/// Number of body characters kept in diagnostics for failed responses
const BODY_PREVIEW_CHARS: usize = 200;

/// Build a client with a fixed timeout and identifying user agent
pub fn build_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| TourGuideError::config(format!("Failed to create HTTP client: {e}")))
}

/// Send a request and require a 2xx status
pub async fn send(service: Upstream, request: RequestBuilder) -> Result<Response> {
    let start = Instant::now();

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            warn!("Request to {} timed out after {:.3}s", service, start.elapsed().as_secs_f64());
            TourGuideError::upstream(service, format!("request timed out: {e}"))
        } else {
            warn!("Error contacting {}: {}", service, e);
            TourGuideError::upstream(service, format!("transport error: {e}"))
        }
    })?;

    let status = response.status();
    debug!(
        "{} responded {} in {:.3}s",
        service,
        status,
        start.elapsed().as_secs_f64()
    );

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let preview = preview(&body);
    warn!("{} returned status {}: {}", service, status, preview);
    Err(TourGuideError::upstream(
        service,
        format!("HTTP {}: {}", status.as_u16(), preview),
    ))
}

/// Decode a JSON body, reporting undecodable bodies with a preview
pub async fn parse_json<T: DeserializeOwned>(service: Upstream, response: Response) -> Result<T> {
    let body = response.text().await.map_err(|e| {
        warn!("Could not read body from {}: {}", service, e);
        TourGuideError::upstream(service, format!("unreadable body: {e}"))
    })?;

    serde_json::from_str(&body).map_err(|e| {
        warn!("Could not decode JSON from {}: {} ({})", service, e, preview(&body));
        TourGuideError::upstream(service, format!("malformed body: {e}"))
    })
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
