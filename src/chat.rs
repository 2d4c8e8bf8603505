use crate::conversations::{Conversation, Message, MessageKind, Sender};
use crate::plan::{DatePlan, Payer};
use crate::profile::{Candidate, Coordinates};
use crate::utils::distance_km;
use std::fmt;

/// Read-only projection of one conversation for display.
pub struct ChatView<'a> {
    candidate: &'a Candidate,
    conversation: &'a Conversation,
    user_coordinates: Option<Coordinates>,
}

impl<'a> ChatView<'a> {
    pub fn new(
        candidate: &'a Candidate,
        conversation: &'a Conversation,
        user_coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            candidate,
            conversation,
            user_coordinates,
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn active_plan(&self) -> Option<&DatePlan> {
        self.conversation.date_plan()
    }

    /// 0 = I pay, 50 = split, 100 = they pay.
    pub fn payer_slider(&self) -> u8 {
        self.conversation.payer_slider()
    }

    pub fn venue_distance_km(&self) -> Option<f64> {
        let venue = self.active_plan()?.coordinates?;
        Some(distance_km(self.user_coordinates?, venue))
    }
}

impl fmt::Display for ChatView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.candidate.profile.first_name();
        writeln!(f, "── {} ──", self.candidate.profile.name)?;

        if let Some(plan) = self.active_plan() {
            writeln!(f, "{}", plan.format_summary())?;
            if let Some(d) = self.venue_distance_km() {
                writeln!(f, "{:.1} km from you", d)?;
            }
            let slider = self.payer_slider();
            writeln!(f, "Payer: {} ({}/100)", Payer::from_slider(slider), slider)?;
            writeln!(f)?;
        }

        for message in self.messages() {
            let who = match message.sender {
                Sender::Me => "You",
                Sender::Match => name,
                Sender::Ai => "AI",
            };
            let marker = match message.kind {
                MessageKind::Image => "[photo] ",
                MessageKind::Text | MessageKind::LocationSuggestion => "",
            };
            writeln!(
                f,
                "[{}] {}: {}{}",
                message.timestamp.format("%H:%M"),
                who,
                marker,
                message.text
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversations::ConversationStore;
    use crate::phrases::Phrases;
    use crate::plan::{DatePlan, WhoPays};
    use crate::profile::{Language, candidate};

    #[test]
    fn surfaces_plan_payer_and_distance() {
        let mut plan = DatePlan::fallback(Language::En);
        plan.who_pays = Some(WhoPays {
            payer: Payer::Them,
            reason: "Their treat".to_string(),
        });
        let mut store = ConversationStore::new();
        store.start_chat("c1", Some(plan), Phrases::for_language(Language::En));

        let c = candidate("c1", 25, 3.0, &[]);
        let view = ChatView::new(
            &c,
            store.get("c1").unwrap(),
            Some(Coordinates {
                lat: 10.7769,
                lng: 106.7009,
            }),
        );
        assert_eq!(view.payer_slider(), 100);
        assert_eq!(view.venue_distance_km(), Some(0.0));
        assert_eq!(view.messages().len(), 3);

        let rendered = view.to_string();
        assert!(rendered.contains("The Coffee House @ 19:00"));
        assert!(rendered.contains("Payer: Them"));
        assert!(rendered.contains("AI: AI has a date plan ready at The Coffee House."));
    }

    #[test]
    fn no_plan_means_split_and_no_distance() {
        let mut store = ConversationStore::new();
        store.start_chat("c1", None, Phrases::for_language(Language::En));
        let c = candidate("c1", 25, 3.0, &[]);
        let view = ChatView::new(&c, store.get("c1").unwrap(), None);
        assert!(view.active_plan().is_none());
        assert_eq!(view.payer_slider(), 50);
        assert!(view.venue_distance_km().is_none());
    }

    #[test]
    fn photos_are_marked_and_slider_moves() {
        let mut store = ConversationStore::new();
        store.start_chat(
            "c1",
            Some(DatePlan::fallback(Language::En)),
            Phrases::for_language(Language::En),
        );
        store.send_message("c1", "https://example.com/me.jpg", MessageKind::Image);
        store.set_payer_slider("c1", 90);

        let c = candidate("c1", 25, 3.0, &[]);
        let rendered = ChatView::new(&c, store.get("c1").unwrap(), None).to_string();
        assert!(rendered.contains("You: [photo] https://example.com/me.jpg"));
        assert!(rendered.contains("Payer: Them (90/100)"));
    }
}
