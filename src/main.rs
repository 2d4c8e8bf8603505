mod chat;
mod community;
mod config;
mod conversations;
mod feed;
mod location;
mod phrases;
mod plan;
mod planner;
mod profile;
mod roster;
mod session;
mod shell;
mod suggestions;
mod utils;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::load()?;
    let roster = roster::Roster::load(&config.candidates_path)?;

    let planner = planner::create_planner(&config);
    let feed = feed::CandidateFeed::new(roster.candidates, config.group_feed);
    let mut session =
        session::Session::new(config.user.clone(), feed, planner, config.planner_timeout);

    for greeting in &roster.greetings {
        if !session.receive_greeting(&greeting.candidate_id, &greeting.text) {
            warn!("Skipping greeting for unknown candidate {}", greeting.candidate_id);
        }
    }

    info!(
        "Session ready for {} ({} language)",
        session.user().profile.name,
        session.language().tag()
    );

    let locator = location::FixedLocator::new(config.location, config.share_location);
    shell::Shell::new(session, Box::new(locator)).run().await?;

    info!("Shutdown complete");
    Ok(())
}
