use crate::planner::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL};
use crate::profile::{Coordinates, Language, Profile, UserProfile};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PLANNER_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    api: ApiConfig,
    #[serde(default)]
    planner: PlannerConfig,
    session: SessionConfig,
    user: Profile,
    location: Option<Coordinates>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiConfig {
    key: Option<String>,
    url: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PlannerConfig {
    timeout: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PLANNER_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SessionConfig {
    candidates: String,
    language: Option<Language>,
    #[serde(default)]
    group: bool,
    #[serde(default = "default_share_location")]
    share_location: bool,
}

fn default_share_location() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub planner_timeout: Duration,
    pub candidates_path: PathBuf,
    pub group_feed: bool,
    pub user: UserProfile,
    pub location: Option<Coordinates>,
    pub share_location: bool,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let config_file: ConfigFile =
            toml::from_str(content).context("Failed to parse config file")?;

        let api_key = config_file
            .api
            .key
            .or_else(|| std::env::var("GEMINI_API_KEY").ok());

        Ok(Self {
            api_key,
            api_url: config_file
                .api
                .url
                .unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
            model: config_file
                .api
                .model
                .unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
            planner_timeout: Duration::from_secs(config_file.planner.timeout.max(1)),
            candidates_path: config_file.session.candidates.into(),
            group_feed: config_file.session.group,
            user: UserProfile {
                profile: config_file.user,
                language: config_file
                    .session
                    .language
                    .unwrap_or_else(Language::detect),
            },
            location: config_file.location,
            share_location: config_file.session.share_location,
        })
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(&content)
    }

    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }
}
