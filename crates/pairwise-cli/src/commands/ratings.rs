use super::context::CliContext;
use anyhow::Result;
use pairwise_core::api::ScoringApi;
use pairwise_core::video::parse_video_input;

fn label(is_public: bool) -> &'static str {
    if is_public { "public" } else { "private" }
}

pub async fn set_visibility(context: &CliContext, video: &str, is_public: bool) -> Result<()> {
    let video_id = parse_video_input(video)?;
    let rating = context
        .client()?
        .set_rating_visibility(&video_id, is_public)
        .await?;
    println!(
        "Your rating of {} is now {} ({} comparisons).",
        video_id,
        label(rating.is_public),
        rating.n_comparisons
    );
    Ok(())
}

pub async fn set_all_visibility(context: &CliContext, is_public: bool) -> Result<()> {
    context
        .client()?
        .set_all_ratings_visibility(is_public)
        .await?;
    println!("All your ratings are now {}.", label(is_public));
    Ok(())
}
