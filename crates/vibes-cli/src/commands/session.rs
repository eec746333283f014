//! Session token management.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use vibes_core::{CredentialKey, CredentialStore};

use crate::output;
use crate::session::FileCredentialStore;

#[derive(Args, Debug)]
pub struct SessionCommand {
    #[command(subcommand)]
    pub command: SessionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionSubcommand {
    /// Store tokens issued by the sign-in flow
    Set(SetArgs),

    /// Show which tokens are stored
    Show,

    /// Forget the stored tokens
    Clear,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Access token sent as the bearer credential
    #[arg(long)]
    pub access_token: Option<String>,

    /// Refresh token used to renew an expired access token
    #[arg(long)]
    pub refresh_token: Option<String>,
}

pub async fn handle(cmd: SessionCommand) -> Result<()> {
    let store = FileCredentialStore::default_location()?;
    match cmd.command {
        SessionSubcommand::Set(args) => set(&store, args).await,
        SessionSubcommand::Show => show(&store).await,
        SessionSubcommand::Clear => clear(&store).await,
    }
}

async fn set(store: &FileCredentialStore, args: SetArgs) -> Result<()> {
    if args.access_token.is_none() && args.refresh_token.is_none() {
        bail!("Nothing to store. Pass --access-token and/or --refresh-token.");
    }

    if let Some(token) = args.access_token.as_deref() {
        store
            .set(CredentialKey::AccessToken, token)
            .await
            .context("Failed to save access token")?;
    }
    if let Some(token) = args.refresh_token.as_deref() {
        store
            .set(CredentialKey::RefreshToken, token)
            .await
            .context("Failed to save refresh token")?;
    }

    output::success("Session saved");
    Ok(())
}

async fn show(store: &FileCredentialStore) -> Result<()> {
    output::field("Store", &store.path().display().to_string());
    for key in CredentialKey::ALL {
        let value = store
            .get(key)
            .await
            .context("Failed to load session")?;
        let state = if value.is_some() { "set" } else { "not set" };
        output::field(key.as_str(), state);
    }
    Ok(())
}

async fn clear(store: &FileCredentialStore) -> Result<()> {
    store.clear().await.context("Failed to clear session")?;
    output::success("Session cleared");
    Ok(())
}
