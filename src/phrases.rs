use crate::profile::Language;

/// Fixed chat lines seeded by the conversation lifecycle.
#[derive(Debug, Clone, Copy)]
pub struct Phrases {
    pub hello: &'static str,
    pub intro: &'static str,
    pub plan_ready: &'static str,
    pub check_sidebar: &'static str,
    pub suggest_location: &'static str,
    pub location_found: &'static str,
}

static EN: Phrases = Phrases {
    hello: "Hey there! 👋",
    intro: "Loved your profile, want to chat?",
    plan_ready: "AI has a date plan ready at",
    check_sidebar: "Check the sidebar! 👇",
    suggest_location: "Let's find a new place to meet",
    location_found: "Found a great spot:",
};

static VI: Phrases = Phrases {
    hello: "Chào đằng ấy! 👋",
    intro: "Thấy profile bạn thú vị quá, mình làm quen nhé?",
    plan_ready: "AI đã chuẩn bị sẵn kế hoạch hẹn hò tại",
    check_sidebar: "Kiểm tra cột bên trái nhé! 👇",
    suggest_location: "Tìm địa điểm hẹn mới nhé",
    location_found: "Đã tìm thấy địa điểm:",
};

impl Phrases {
    pub fn for_language(language: Language) -> &'static Phrases {
        match language {
            Language::Vi => &VI,
            Language::En => &EN,
        }
    }

    pub fn plan_announcement(&self, venue: &str) -> String {
        format!("{} {}. {}", self.plan_ready, venue, self.check_sidebar)
    }
}
