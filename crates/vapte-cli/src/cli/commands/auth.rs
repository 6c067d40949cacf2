//! Session command handlers: login, logout, refresh, whoami.

use anyhow::{bail, Context, Result};
use vapte_core::client::ApiClient;
use vapte_core::config::Config;
use vapte_core::flows::{self, LoginOutcome};
use vapte_core::tokens::{mask_token, TokenStore};

use crate::cli::ui::TerminalUi;

pub async fn login(config: &Config, username: &str, password: &str) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let store = TokenStore::open_default();

    match flows::login::run(&client, &store, &TerminalUi, username, password).await {
        LoginOutcome::LoggedIn => Ok(()),
        LoginOutcome::MissingCredentials => bail!("missing credentials"),
        LoginOutcome::Denied => bail!("login denied"),
        LoginOutcome::Errored => bail!("login error"),
    }
}

pub fn logout() -> Result<()> {
    let store = TokenStore::open_default();
    if store.clear().context("clear saved tokens")? {
        println!("✓ Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

pub async fn refresh(config: &Config) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let store = TokenStore::open_default();

    let access = flows::session::refresh(&client, &store).await?;
    println!("✓ Access token refreshed: {}", mask_token(&access));
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let client = ApiClient::from_config(config)?;
    let store = TokenStore::open_default();

    let message = flows::session::whoami(&client, &store).await?;
    println!("{message}");
    Ok(())
}
