use crate::profile::Candidate;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Greeting {
    pub candidate_id: String,
    pub text: String,
}

/// Candidates and proactive greetings loaded for one session.
#[derive(Debug, Clone, Deserialize)]
pub struct Roster {
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub greetings: Vec<Greeting>,
}

impl Roster {
    pub fn parse(content: &str) -> Result<Self> {
        let roster: Roster = toml::from_str(content).context("Failed to parse candidate file")?;

        let mut seen = HashSet::new();
        for candidate in &roster.candidates {
            if !seen.insert(candidate.id()) {
                bail!("Duplicate candidate id: {}", candidate.id());
            }
        }
        if let Some(g) = roster
            .greetings
            .iter()
            .find(|g| !seen.contains(g.candidate_id.as_str()))
        {
            bail!("Greeting for unknown candidate: {}", g.candidate_id);
        }
        Ok(roster)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read candidate file: {}", path.display()))?;
        let roster = Self::parse(&content)?;
        info!(
            "Loaded {} candidates and {} greetings from {}",
            roster.candidates.len(),
            roster.greetings.len(),
            path.display()
        );
        Ok(roster)
    }
}
