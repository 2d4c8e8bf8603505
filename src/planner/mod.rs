mod error;
mod gemini;
mod prompt;
mod types;

use crate::config::Config;
use crate::plan::DatePlan;
use crate::profile::{Candidate, Language, UserProfile};
use async_trait::async_trait;
pub use error::PlannerError;
pub use gemini::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GeminiPlanner};
pub use prompt::build_prompt;
use std::sync::Arc;
use tracing::warn;
pub use types::DatePlanner;

/// Stands in for the collaborator when no API key is configured.
pub struct UnconfiguredPlanner;

#[async_trait]
impl DatePlanner for UnconfiguredPlanner {
    async fn suggest_date_plan(
        &self,
        _user: &UserProfile,
        _candidate: &Candidate,
        _language: Language,
    ) -> Result<DatePlan, PlannerError> {
        Err(PlannerError::NotConfigured)
    }
}

pub fn create_planner(config: &Config) -> Arc<dyn DatePlanner> {
    match config.api_key.as_deref() {
        Some(key) if !key.is_empty() => Arc::new(GeminiPlanner::new(
            key,
            &config.api_url,
            &config.model,
        )),
        _ => {
            warn!("No API key configured, date plans will use the fallback venue");
            Arc::new(UnconfiguredPlanner)
        }
    }
}
