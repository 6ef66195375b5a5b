use super::context::CliContext;
use anyhow::{Result, bail};
use pairwise_core::credential::CredentialProvider;

pub async fn login(context: &CliContext, token: String) -> Result<()> {
    let token = token.trim().to_string();
    if token.is_empty() {
        bail!("The access token must not be empty");
    }
    context.credentials.set(token).await?;
    println!("Logged in. Token stored in {}", context.credentials.path().display());
    Ok(())
}

pub async fn logout(context: &CliContext) -> Result<()> {
    context.credentials.clear().await?;
    println!("Logged out.");
    Ok(())
}
