//! Upload command handler.

use anyhow::{bail, Result};
use vapte_core::client::ApiClient;
use vapte_core::config::Config;
use vapte_core::flows::{self, UploadOutcome};

use crate::cli::ui::TerminalUi;

pub async fn run(config: &Config, template: &str) -> Result<()> {
    let mut client = ApiClient::from_config(config)?;

    // Unlike registration, upload tolerates a missing token: the flow
    // falls back to an empty header and lets the server decide.
    if let Err(err) = client.load_csrf_token(&config.csrf_page).await {
        tracing::warn!(error = %err, "could not fetch the anti-forgery token");
    }

    match flows::upload::run(&client, &TerminalUi, template).await {
        UploadOutcome::Redirecting { .. } => Ok(()),
        UploadOutcome::Failed => bail!("upload failed"),
    }
}
