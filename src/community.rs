use serde::{Deserialize, Serialize};

/// A discussion prompt for the community feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityTopic {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: f64,
    #[serde(default)]
    pub comments: f64,
}

impl CommunityTopic {
    pub fn format_line(&self) -> String {
        let mut out = format!("[{}] {}: {}", self.id, self.title, self.description);
        if !self.tags.is_empty() {
            let tags: Vec<String> = self.tags.iter().map(|t| format!("#{}", t)).collect();
            out.push_str(&format!(" {}", tags.join(" ")));
        }
        out.push_str(&format!(
            " ({:.0} likes, {:.0} comments)",
            self.likes, self.comments
        ));
        out
    }
}
