use super::PlannerError;
use crate::community::CommunityTopic;
use crate::plan::DatePlan;
use crate::profile::{Candidate, Language, UserProfile};
use async_trait::async_trait;

#[async_trait]
pub trait DatePlanner: Send + Sync {
    async fn suggest_date_plan(
        &self,
        user: &UserProfile,
        candidate: &Candidate,
        language: Language,
    ) -> Result<DatePlan, PlannerError>;

    /// Discussion topics for the community feed. Empty unless overridden.
    async fn community_topics(
        &self,
        _language: Language,
    ) -> Result<Vec<CommunityTopic>, PlannerError> {
        Ok(Vec::new())
    }
}
