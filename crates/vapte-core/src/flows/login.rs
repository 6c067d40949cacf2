//! Authentication flow.

use anyhow::Result;
use serde::Serialize;

use crate::client::ApiClient;
use crate::tokens::{TokenPair, TokenStore};
use crate::ui::{StatusTone, UiEvent, UiSink};

/// Token-issuing endpoint. Carries no anti-forgery header; the endpoint
/// exempts itself and the other flows do not. Kept that way on purpose.
pub const TOKEN_PATH: &str = "/api/token/";

/// Where a successful login navigates.
pub const DASHBOARD_PATH: &str = "/dashboard/";

/// How a login attempt ended. Every failure is reported through the
/// sink, so the signature is infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Tokens saved, navigation signalled.
    LoggedIn,
    /// A field was empty; nothing was sent.
    MissingCredentials,
    /// The server rejected the credentials.
    Denied,
    /// Transport, decode, or store failure.
    Errored,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Submits credentials, persists the issued token pair, and signals
/// navigation to the dashboard.
///
/// Tokens are saved before the success status and navigation are
/// emitted, so an observer that acts on `Navigate` always finds them in
/// the store.
pub async fn run(
    client: &ApiClient,
    store: &TokenStore,
    ui: &dyn UiSink,
    username: &str,
    password: &str,
) -> LoginOutcome {
    if username.is_empty() || password.is_empty() {
        ui.emit(UiEvent::status(
            StatusTone::Failure,
            "Please fill in all login fields.",
        ));
        return LoginOutcome::MissingCredentials;
    }

    match submit(client, store, username, password).await {
        Ok(true) => {
            ui.emit(UiEvent::status(StatusTone::Success, "Login successful!"));
            ui.emit(UiEvent::navigate(DASHBOARD_PATH));
            LoginOutcome::LoggedIn
        }
        Ok(false) => {
            ui.emit(UiEvent::status(
                StatusTone::Failure,
                "Login failed. Check credentials.",
            ));
            LoginOutcome::Denied
        }
        Err(_) => {
            ui.emit(UiEvent::status(
                StatusTone::Failure,
                "An error occurred during login.",
            ));
            LoginOutcome::Errored
        }
    }
}

/// `Ok(true)` = logged in, `Ok(false)` = denied, `Err` = anything else.
async fn submit(
    client: &ApiClient,
    store: &TokenStore,
    username: &str,
    password: &str,
) -> Result<bool> {
    let response = client
        .post_json(TOKEN_PATH, &TokenRequest { username, password })
        .await?;

    // A denial is recognized by status alone; the body is only decoded
    // on success.
    if !response.status().is_success() {
        return Ok(false);
    }

    let pair: TokenPair = response.json().await?;
    store.save(&pair)?;
    Ok(true)
}
