use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Planner is not configured (missing API key)")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Planner API error: {status} {body}")]
    Api { status: u16, body: String },
    #[error("Planner returned no content")]
    EmptyResponse,
    #[error("Malformed date plan: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Timeout")]
    Timeout,
}
