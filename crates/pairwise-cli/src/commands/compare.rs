use super::context::CliContext;
use anyhow::{Result, anyhow, bail};
use clap::Args;
use pairwise_application::{
    CollectingNotifier, ComparisonSession, NotificationLevel, SessionOptions, SessionView,
};
use pairwise_core::comparison::{Comparison, CriteriaScore};
use pairwise_core::navigation::{NavigationSync, VideoKey};
use pairwise_core::video::parse_video_input;
use pairwise_infrastructure::InMemoryHistory;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First video (URL or identifier)
    #[arg(long)]
    pub video_a: String,
    /// Second video (URL or identifier)
    #[arg(long)]
    pub video_b: String,
    /// Criterion score as `criterion=value`, repeatable
    #[arg(long = "score", value_parser = parse_score, required_unless_present = "dry_run")]
    pub scores: Vec<CriteriaScore>,
    /// Time spent on the comparison, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub duration_ms: u64,
    /// Print the session state and stop before submitting
    #[arg(long)]
    pub dry_run: bool,
}

/// Parses `criterion=value`.
pub fn parse_score(raw: &str) -> Result<CriteriaScore, String> {
    let (criteria, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected criterion=value, got '{}'", raw))?;
    let criteria = criteria.trim();
    if criteria.is_empty() {
        return Err(format!("missing criterion name in '{}'", raw));
    }
    let score = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    if !score.is_finite() {
        return Err(format!("'{}' is not a finite number", value.trim()));
    }
    Ok(CriteriaScore::new(criteria, score))
}

pub async fn run(context: &CliContext, args: CompareArgs) -> Result<()> {
    let video_a = parse_video_input(&args.video_a)?;
    let video_b = parse_video_input(&args.video_b)?;

    let navigation = NavigationSync::new(Arc::new(InMemoryHistory::default()));
    navigation.write(VideoKey::A, &video_a);
    navigation.write(VideoKey::B, &video_b);

    let notifier = Arc::new(CollectingNotifier::new());
    let session = ComparisonSession::mount(
        context.client()?,
        navigation,
        notifier.clone(),
        SessionOptions {
            default_rating_public: context.config.default_rating_public,
        },
    );
    session.load().await;
    print_notifications(&notifier);

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&session.snapshot().await)?);
        return Ok(());
    }

    match &session.view().await {
        SessionView::Ready {
            initial_comparison,
            is_comparison_public,
        } => {
            let action = if initial_comparison.is_some() { "Updating" } else { "Creating" };
            let visibility = if *is_comparison_public { "public" } else { "private" };
            println!("{} {} comparison {} / {}", action, visibility, video_a, video_b);
        }
        SessionView::Loading => bail!("The existing comparison is still loading"),
        SessionView::Placeholder => {
            bail!("Both videos need a rating before they can be compared")
        }
    }

    let draft = Comparison::new(video_a, video_b, args.scores, args.duration_ms);
    let outcome = session.submit(&draft).await;
    print_notifications(&notifier);

    if outcome.is_success() {
        Ok(())
    } else {
        Err(anyhow!("Comparison not submitted"))
    }
}

fn print_notifications(notifier: &CollectingNotifier) {
    for notification in notifier.take() {
        match notification.level {
            NotificationLevel::Success => println!("{}", notification.message),
            NotificationLevel::Warning => eprintln!("warning: {}", notification.message),
            NotificationLevel::Error => eprintln!("error: {}", notification.message),
        }
    }
}
