use crate::profile::{Coordinates, Language};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Payer {
    Me,
    Them,
    Split,
}

impl From<String> for Payer {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "me" => Payer::Me,
            "them" => Payer::Them,
            _ => Payer::Split,
        }
    }
}

impl Payer {
    /// Position on the 0..=100 who-pays slider.
    pub fn slider_value(self) -> u8 {
        match self {
            Payer::Me => 0,
            Payer::Split => 50,
            Payer::Them => 100,
        }
    }

    /// Picks one of the three stops at random.
    pub fn random() -> Self {
        match Uuid::new_v4().as_u128() % 3 {
            0 => Payer::Me,
            1 => Payer::Split,
            _ => Payer::Them,
        }
    }

    pub fn from_slider(value: u8) -> Self {
        if value < 25 {
            Payer::Me
        } else if value > 75 {
            Payer::Them
        } else {
            Payer::Split
        }
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Payer::Me => "Me",
            Payer::Them => "Them",
            Payer::Split => "Split",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhoPays {
    pub payer: Payer,
    #[serde(default)]
    pub reason: String,
}

/// A venue, time and payer suggestion for one user/candidate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePlan {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub suggested_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(
        rename = "whoPays",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub who_pays: Option<WhoPays>,
}

impl DatePlan {
    /// Substituted whenever the planner fails, so the user is never left waiting.
    pub fn fallback(language: Language) -> Self {
        Self {
            name: "The Coffee House".to_string(),
            address: "Center City".to_string(),
            suggested_time: "19:00".to_string(),
            description: match language {
                Language::Vi => "Địa điểm phổ biến.".to_string(),
                Language::En => "Popular spot.".to_string(),
            },
            reason: "Safe choice".to_string(),
            coordinates: Some(Coordinates {
                lat: 10.7769,
                lng: 106.7009,
            }),
            who_pays: Some(WhoPays {
                payer: Payer::Split,
                reason: "First date rule".to_string(),
            }),
        }
    }

    pub fn payer(&self) -> Payer {
        self.who_pays.as_ref().map_or(Payer::Split, |w| w.payer)
    }

    pub fn format_summary(&self) -> String {
        let mut out = format!("{} @ {}", self.name, self.suggested_time);
        if !self.address.is_empty() {
            out.push_str(&format!("\n{}", self.address));
        }
        if !self.description.is_empty() {
            out.push_str(&format!("\n{}", self.description));
        }
        if let Some(ref who) = self.who_pays {
            out.push_str(&format!("\nWho pays: {}", who.payer));
            if !who.reason.is_empty() {
                out.push_str(&format!(" ({})", who.reason));
            }
        }
        out
    }
}
