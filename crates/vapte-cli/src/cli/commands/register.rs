//! Register command handler.

use anyhow::{bail, Context, Result};
use vapte_core::client::ApiClient;
use vapte_core::config::Config;
use vapte_core::flows::{self, RegisterOutcome, Registration};

use crate::cli::ui::TerminalUi;

pub async fn run(config: &Config, username: &str, email: &str, password: &str) -> Result<()> {
    let mut client = ApiClient::from_config(config)?;

    // Registration needs the anti-forgery token; a page that cannot be
    // fetched stops the command here.
    client
        .load_csrf_token(&config.csrf_page)
        .await
        .with_context(|| format!("fetch anti-forgery token from {}", config.csrf_page))?;

    let registration = Registration {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };

    match flows::register::run(&client, &TerminalUi, &registration).await? {
        RegisterOutcome::Registered => Ok(()),
        RegisterOutcome::Rejected => bail!("registration rejected"),
    }
}
