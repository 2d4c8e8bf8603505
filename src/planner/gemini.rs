use super::{DatePlanner, PlannerError, build_prompt};
use crate::community::CommunityTopic;
use crate::plan::DatePlan;
use crate::profile::{Candidate, Language, UserProfile};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub struct GeminiPlanner {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

fn date_plan_schema() -> Value {
    let lat_lng = json!({
        "type": "OBJECT",
        "properties": {
            "lat": { "type": "NUMBER" },
            "lng": { "type": "NUMBER" }
        }
    });
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "address": { "type": "STRING" },
            "suggested_time": { "type": "STRING" },
            "description": { "type": "STRING" },
            "reason": { "type": "STRING" },
            "coordinates": lat_lng,
            "whoPays": {
                "type": "OBJECT",
                "properties": {
                    "payer": { "type": "STRING" },
                    "reason": { "type": "STRING" }
                }
            }
        },
        "required": ["name"]
    })
}

fn topics_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
                "likes": { "type": "NUMBER" },
                "comments": { "type": "NUMBER" }
            },
            "required": ["id", "title", "description", "tags"]
        }
    })
}

impl GeminiPlanner {
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Self {
        info!("Gemini date planner initialized (model: {})", model);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    async fn generate(&self, prompt: &str, schema: Value) -> Result<String, PlannerError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(PlannerError::Api { status, body });
        }

        let data: GenerateContentResponse = resp.json().await?;
        data.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(PlannerError::EmptyResponse)
    }
}

#[async_trait]
impl DatePlanner for GeminiPlanner {
    async fn suggest_date_plan(
        &self,
        user: &UserProfile,
        candidate: &Candidate,
        language: Language,
    ) -> Result<DatePlan, PlannerError> {
        let prompt = build_prompt(user, candidate, language);
        debug!("Requesting date plan for {}", candidate.id());
        let text = self.generate(&prompt, date_plan_schema()).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn community_topics(
        &self,
        language: Language,
    ) -> Result<Vec<CommunityTopic>, PlannerError> {
        let prompt = format!(
            "Generate 5 engaging and modern dating/relationship discussion topics. Language: {}",
            language.tag()
        );
        let text = self.generate(&prompt, topics_schema()).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
