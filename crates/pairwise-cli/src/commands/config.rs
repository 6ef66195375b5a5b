use super::context::CliContext;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Base URL of the scoring service
    #[arg(long)]
    pub api_url: Option<String>,
    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Visibility of ratings created when a video is first selected
    #[arg(long)]
    pub default_rating_public: Option<bool>,
}

pub fn show(context: &CliContext) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&context.config)?);
    Ok(())
}

/// Saves the effective configuration with the given fields changed.
pub fn set(context: &CliContext, args: ConfigSetArgs) -> Result<()> {
    let mut config = context.config.clone();
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
    if let Some(public) = args.default_rating_public {
        config.default_rating_public = public;
    }

    context.config_service.save_config(&config)?;
    println!("Configuration saved.");
    Ok(())
}
