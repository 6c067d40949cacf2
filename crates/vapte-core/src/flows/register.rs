//! Registration flow.

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{FlowError, FlowResult};
use crate::ui::{StatusTone, UiEvent, UiSink};

/// Registration endpoint.
pub const REGISTER_PATH: &str = "/api/register/";

const REJECTION_FALLBACK: &str = "Registration failed.";

/// New-account credentials, sent once and not retained.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// How a registration attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The server accepted the account.
    Registered,
    /// The server rejected it; the reason went to the sink.
    Rejected,
}

/// Submits a registration and reports the outcome through the sink.
///
/// The client must already hold an anti-forgery token scraped from the
/// registration page; without one the flow fails before emitting any UI
/// event. Unlike upload, this flow has no catch-all: transport failures
/// propagate to the caller.
///
/// # Errors
/// Returns an error when no anti-forgery token is loaded or the request
/// cannot complete.
pub async fn run(
    client: &ApiClient,
    ui: &dyn UiSink,
    registration: &Registration,
) -> FlowResult<RegisterOutcome> {
    if client.csrf_token().is_none() {
        return Err(FlowError::validation(
            "no anti-forgery token loaded; fetch the registration page first",
        ));
    }

    let response = client.post_json_csrf(REGISTER_PATH, registration).await?;
    if response.status().is_success() {
        ui.emit(UiEvent::status(
            StatusTone::Success,
            "Registered successfully!",
        ));
        return Ok(RegisterOutcome::Registered);
    }

    let body = response
        .text()
        .await
        .map_err(|err| FlowError::parse(format!("read response body: {err}")))?;
    ui.emit(UiEvent::status(StatusTone::Failure, rejection_message(&body)));
    Ok(RegisterOutcome::Rejected)
}

/// The server's `detail` field when the body carries a non-empty one,
/// otherwise the fixed fallback.
fn rejection_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body)
        && let Some(detail) = json.get("detail").and_then(|v| v.as_str())
        && !detail.is_empty()
    {
        return detail.to_string();
    }
    REJECTION_FALLBACK.to_string()
}
