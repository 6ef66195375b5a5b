use super::context::CliContext;
use anyhow::{Result, bail};
use pairwise_core::video::parse_video_input;
use pairwise_interaction::RateLaterHelper;

fn helper(context: &CliContext) -> Result<RateLaterHelper> {
    Ok(RateLaterHelper::new(context.client()?))
}

pub async fn add(context: &CliContext, video: &str) -> Result<()> {
    let video_id = parse_video_input(video)?;
    let outcome = helper(context)?.add_rate_later(&video_id).await;
    if !outcome.success {
        bail!("{}", outcome.message);
    }
    println!("{}", outcome.message);
    Ok(())
}

pub async fn list(context: &CliContext) -> Result<()> {
    let page = helper(context)?.list_rate_later().await?;
    if page.results.is_empty() {
        println!("Your rate-later list is empty.");
        return Ok(());
    }

    for entry in &page.results {
        let name = if entry.video.name.is_empty() {
            "(untitled)"
        } else {
            entry.video.name.as_str()
        };
        println!("{}  {}", entry.video.video_id, name);
    }
    if page.count > page.results.len() as u64 {
        println!("... {} videos in total", page.count);
    }
    Ok(())
}

pub async fn remove(context: &CliContext, video: &str) -> Result<()> {
    let video_id = parse_video_input(video)?;
    helper(context)?.remove_rate_later(&video_id).await?;
    println!("Removed {} from your rate-later list.", video_id);
    Ok(())
}
