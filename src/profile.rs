use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[serde(rename = "Non-binary")]
    NonBinary,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Vi,
    #[default]
    En,
}

impl Language {
    /// Picks Vietnamese when the OS locale is Vietnamese, English otherwise.
    pub fn detect() -> Self {
        match sys_locale::get_locale() {
            Some(locale) if locale.to_lowercase().starts_with("vi") => Language::Vi,
            _ => Language::En,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub gender: Gender,
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub verified: bool,
}

impl Profile {
    /// Coordinates when known, otherwise the free-text location.
    pub fn location_for_prompt(&self) -> String {
        match self.coordinates {
            Some(c) => format!("{},{}", c.lat, c.lng),
            None => self.location.clone(),
        }
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub profile: Profile,
    pub language: Language,
}

impl UserProfile {
    pub fn format_summary(&self) -> String {
        let p = &self.profile;
        let mut out = String::with_capacity(64 + p.bio.len());
        let _ = write!(out, "{}, {} ({})", p.name, p.age, p.location);
        if let Some(ref job) = p.job {
            let _ = write!(out, " - {}", job);
        }
        if let Some(c) = p.coordinates {
            let _ = write!(out, "\nAt: {:.4}, {:.4}", c.lat, c.lng);
        }
        if !p.interests.is_empty() {
            out.push_str("\nInterests: ");
            out.push_str(&p.interests.join(", "));
        }
        out
    }
}

/// A prospective match. Immutable once loaded for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub profile: Profile,
    pub match_percentage: u8,
    pub distance_km: f64,
}

impl Candidate {
    pub fn id(&self) -> &str {
        &self.profile.id
    }

    pub fn format_card(&self) -> String {
        let p = &self.profile;
        let mut out = format!(
            "{}{}, {} ({}) | {:.1} km | {}% match\n{}",
            p.name,
            if p.verified { " ✓" } else { "" },
            p.age,
            p.gender,
            self.distance_km,
            self.match_percentage,
            p.location,
        );
        if !p.bio.is_empty() {
            out.push('\n');
            out.push_str(&p.bio);
        }
        if !p.interests.is_empty() {
            out.push_str("\nInterests: ");
            out.push_str(&p.interests.join(", "));
        }
        if !p.photos.is_empty() {
            let _ = write!(out, "\n{} photos", p.photos.len());
        }
        out
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::NonBinary => "Non-binary",
            Gender::Other => "Other",
        })
    }
}

#[cfg(test)]
pub(crate) fn candidate(id: &str, age: u32, distance_km: f64, interests: &[&str]) -> Candidate {
    Candidate {
        profile: Profile {
            id: id.to_string(),
            name: format!("Candidate {}", id),
            age,
            location: "District 1".to_string(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        },
        match_percentage: 80,
        distance_km,
    }
}

#[cfg(test)]
pub(crate) fn user() -> UserProfile {
    UserProfile {
        profile: Profile {
            id: "me".to_string(),
            name: "Tuan Nguyen".to_string(),
            age: 28,
            gender: Gender::Male,
            location: "District 3".to_string(),
            interests: vec!["Running".to_string(), "Coffee".to_string()],
            ..Default::default()
        },
        language: Language::En,
    }
}
