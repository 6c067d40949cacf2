//! Upload/transform flow.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::{self, ApiClient};
use crate::error::{FlowError, FlowResult};
use crate::ui::{StatusTone, UiEvent, UiSink};

/// Upload endpoint.
pub const UPLOAD_PATH: &str = "/upload/";

/// Trigger-control label while idle.
pub const IDLE_LABEL: &str = "Upload Template";

/// Trigger-control label while a submission is in flight.
pub const BUSY_LABEL: &str = "Processing";

/// Pause between the success message and the navigation signal, long
/// enough for the message to be seen.
const REDIRECT_DELAY: Duration = Duration::from_secs(1);

/// How an upload ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Navigation to the download page was signalled.
    Redirecting { location: String },
    /// Something failed; the trigger control was restored.
    Failed,
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    template: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    filename: Option<String>,
}

/// Submits a template identifier and, on success, signals navigation to
/// the generated download page after a fixed delay.
///
/// Every failure funnels through one handler: the diagnostic detail is
/// logged, the user sees a single generic message, and the trigger
/// control returns to its idle label. No failure path navigates.
pub async fn run(client: &ApiClient, ui: &dyn UiSink, template: &str) -> UploadOutcome {
    ui.emit(UiEvent::status(
        StatusTone::Progress,
        "Data transformation in process...",
    ));
    ui.emit(UiEvent::busy(BUSY_LABEL));

    match submit(client, ui, template).await {
        Ok(location) => UploadOutcome::Redirecting { location },
        Err(err) => {
            tracing::error!(error = %err, "upload failed");
            ui.emit(UiEvent::status(
                StatusTone::Failure,
                "Something went wrong. Please try again.",
            ));
            ui.emit(UiEvent::ready(IDLE_LABEL));
            UploadOutcome::Failed
        }
    }
}

async fn submit(client: &ApiClient, ui: &dyn UiSink, template: &str) -> FlowResult<String> {
    let response = client
        .post_json_csrf(UPLOAD_PATH, &UploadRequest { template })
        .await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FlowError::http_status(status.as_u16(), &body));
    }

    let payload: UploadResponse = response
        .json()
        .await
        .map_err(|err| FlowError::parse(format!("decode upload response: {err}")))?;
    let filename = payload
        .filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FlowError::parse("Invalid response from server."))?;

    ui.emit(UiEvent::status(
        StatusTone::Success,
        "Upload successful. Redirecting...",
    ));
    tokio::time::sleep(REDIRECT_DELAY).await;

    let location = client::download_page_path(&filename);
    ui.emit(UiEvent::navigate(location.clone()));
    Ok(location)
}
