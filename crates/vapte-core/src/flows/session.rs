//! Saved-session operations: token refresh and the authenticated probe.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::FlowError;
use crate::tokens::TokenStore;

/// Token refresh endpoint.
pub const TOKEN_REFRESH_PATH: &str = "/api/token/refresh/";

/// Authenticated probe endpoint.
pub const PROTECTED_PATH: &str = "/api/protected/";

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

#[derive(Deserialize)]
struct ProtectedResponse {
    message: String,
}

/// Exchanges the saved refresh token for a new access token and
/// persists it. The refresh token itself is left untouched.
///
/// # Errors
/// Returns an error when no tokens are saved, the server rejects the
/// refresh token, or the store cannot be updated.
pub async fn refresh(client: &ApiClient, store: &TokenStore) -> Result<String> {
    let Some(pair) = store.load()? else {
        bail!("not logged in");
    };

    let response = client
        .post_json(
            TOKEN_REFRESH_PATH,
            &RefreshRequest {
                refresh: &pair.refresh,
            },
        )
        .await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FlowError::http_status(status.as_u16(), &body).into());
    }

    let payload: RefreshResponse = response.json().await.context("decode refresh response")?;
    store.update_access(&payload.access)?;
    Ok(payload.access)
}

/// Calls the authenticated probe endpoint with the saved access token
/// and returns the server's greeting line.
///
/// # Errors
/// Returns an error when no tokens are saved or the server rejects the
/// access token.
pub async fn whoami(client: &ApiClient, store: &TokenStore) -> Result<String> {
    let Some(pair) = store.load()? else {
        bail!("not logged in");
    };

    let response = client.get_with_bearer(PROTECTED_PATH, &pair.access).await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FlowError::http_status(status.as_u16(), &body).into());
    }

    let payload: ProtectedResponse = response.json().await.context("decode probe response")?;
    Ok(payload.message)
}
