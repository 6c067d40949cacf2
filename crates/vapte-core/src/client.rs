//! HTTP client for the transformation service.
//!
//! One reqwest client with a cookie jar (the anti-forgery cookie issued
//! alongside a scraped page must accompany later POSTs), the configured
//! timeout, and the cached anti-forgery token. The three flows differ in
//! how they attach that token; both call shapes live here so the asymmetry
//! stays visible at the call sites.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::error::{FlowError, FlowResult};
use crate::page;

/// Standard User-Agent header for vapte requests.
pub const USER_AGENT: &str = concat!("vapte/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "VAPTE_BASE_URL";

/// Header carrying the anti-forgery token on state-changing requests.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Resolves the service base URL with precedence: env > config > default.
///
/// # Errors
/// Returns an error if a candidate URL is not well-formed.
pub fn resolve_base_url(config: &Config) -> Result<String> {
    resolve_from(std::env::var(BASE_URL_ENV).ok().as_deref(), config)
}

/// Precedence with the env value passed in, so the choice is testable
/// without touching the process environment.
fn resolve_from(env_value: Option<&str>, config: &Config) -> Result<String> {
    // Try env var first
    if let Some(env_url) = env_value {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    // Try config value
    if let Some(config_url) = config.base_url.as_deref() {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    // Default
    Ok(Config::DEFAULT_BASE_URL.to_string())
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    Url::parse(url).with_context(|| format!("Invalid base URL: {url}"))?;
    Ok(())
}

/// Site-relative path of the download page for `filename`.
///
/// The filename is percent-encoded as a single path segment so names with
/// spaces or reserved characters survive the round trip
/// (`a b.csv` -> `/download/a%20b.csv/`).
pub fn download_page_path(filename: &str) -> String {
    encoded_site_path("download", filename)
}

/// Site-relative path of the raw file endpoint for `filename`.
pub fn download_file_path(filename: &str) -> String {
    encoded_site_path("download_file", filename)
}

fn encoded_site_path(prefix: &str, filename: &str) -> String {
    let mut url = Url::parse("http://site.invalid/").expect("fixed base URL parses");
    url.path_segments_mut()
        .expect("HTTP URLs have path segments")
        .clear()
        // the empty trailing segment keeps the server's closing slash
        .extend([prefix, filename, ""]);
    url.path().to_string()
}

/// Client for the transformation service endpoints and pages.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Creates a client for a base URL with an optional request timeout.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("build HTTP client")?;

        Ok(Self {
            http,
            base_url,
            csrf_token: None,
        })
    }

    /// Creates a client from the loaded configuration.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = resolve_base_url(config)?;
        Self::new(&base_url, config.request_timeout())
    }

    /// The anti-forgery token cached from the last scraped page, if any.
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Caches an anti-forgery token directly, bypassing the page scrape.
    pub fn set_csrf_token(&mut self, token: impl Into<String>) {
        self.csrf_token = Some(token.into());
    }

    /// Fetches a server-rendered page and caches the anti-forgery token
    /// embedded in it.
    ///
    /// A page without the hidden input is not an error: the cache is left
    /// empty and the caller decides what that means for its flow.
    ///
    /// # Errors
    /// Returns an error if the page cannot be fetched.
    pub async fn load_csrf_token(&mut self, csrf_page: &str) -> FlowResult<Option<String>> {
        let html = self.get_text(csrf_page).await?;
        self.csrf_token = page::extract_csrf_token(&html);
        Ok(self.csrf_token.clone())
    }

    fn endpoint(&self, path: &str) -> FlowResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| FlowError::validation(format!("invalid request path {path}: {err}")))
    }

    /// JSON POST without an anti-forgery header (the token endpoint omits
    /// it; the asymmetry with the other flows is deliberate).
    ///
    /// # Errors
    /// Returns an error if the request cannot complete.
    pub async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> FlowResult<reqwest::Response> {
        let url = self.endpoint(path)?;
        let response = self.http.post(url).json(body).send().await?;
        Ok(response)
    }

    /// JSON POST carrying the `X-CSRFToken` header, empty when no token
    /// was found on the scraped page.
    ///
    /// # Errors
    /// Returns an error if the request cannot complete.
    pub async fn post_json_csrf<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> FlowResult<reqwest::Response> {
        let url = self.endpoint(path)?;
        let token = self.csrf_token.as_deref().unwrap_or("");
        let response = self
            .http
            .post(url)
            .header(CSRF_HEADER, token)
            .json(body)
            .send()
            .await?;
        Ok(response)
    }

    /// Plain GET of a site-relative path.
    ///
    /// # Errors
    /// Returns an error if the request cannot complete.
    pub async fn get(&self, path: &str) -> FlowResult<reqwest::Response> {
        let url = self.endpoint(path)?;
        let response = self.http.get(url).send().await?;
        Ok(response)
    }

    /// GET with a bearer access token (the authenticated endpoints).
    ///
    /// # Errors
    /// Returns an error if the request cannot complete.
    pub async fn get_with_bearer(
        &self,
        path: &str,
        access_token: &str,
    ) -> FlowResult<reqwest::Response> {
        let url = self.endpoint(path)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;
        Ok(response)
    }

    /// GET of a page, returning its body text.
    /// Non-2xx statuses are errors.
    ///
    /// # Errors
    /// Returns an error if the request fails or the status is non-2xx.
    pub async fn get_text(&self, path: &str) -> FlowResult<String> {
        let response = self.get(path).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| FlowError::parse(format!("read response body: {err}")))?;
        if !status.is_success() {
            return Err(FlowError::http_status(status.as_u16(), &body));
        }
        Ok(body)
    }

    /// GET of a file endpoint, returning the raw bytes.
    /// Non-2xx statuses are errors.
    ///
    /// # Errors
    /// Returns an error if the request fails or the status is non-2xx.
    pub async fn download(&self, path: &str) -> FlowResult<Vec<u8>> {
        let response = self.get(path).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlowError::http_status(status.as_u16(), &body));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| FlowError::parse(format!("read file bytes: {err}")))?;
        Ok(bytes.to_vec())
    }
}
