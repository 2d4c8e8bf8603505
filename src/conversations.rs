use crate::phrases::Phrases;
use crate::plan::{DatePlan, Payer};
use crate::profile::Candidate;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Me,
    Match,
    Ai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Image,
    /// System line announcing a venue; always attributed to the AI.
    LocationSuggestion,
}

impl MessageKind {
    pub fn sender(self) -> Sender {
        match self {
            MessageKind::LocationSuggestion => Sender::Ai,
            _ => Sender::Me,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}

impl Message {
    fn new(sender: Sender, text: impl Into<String>, kind: MessageKind, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: at,
            kind,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conversation {
    pub match_id: String,
    messages: Vec<Message>,
    date_plan: Option<DatePlan>,
    payer_slider: u8,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: u32,
}

impl Conversation {
    fn new(match_id: &str) -> Self {
        Self {
            match_id: match_id.to_string(),
            messages: Vec::new(),
            date_plan: None,
            payer_slider: Payer::Split.slider_value(),
            last_message_at: Utc::now(),
            unread_count: 0,
        }
    }

    fn push(&mut self, message: Message) -> &Message {
        self.last_message_at = message.timestamp;
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn date_plan(&self) -> Option<&DatePlan> {
        self.date_plan.as_ref()
    }

    /// Who-pays position, 0 = I pay, 50 = split, 100 = they pay. Starts from
    /// the attached plan's payer and can be moved freely afterwards.
    pub fn payer_slider(&self) -> u8 {
        self.payer_slider
    }

    fn attach_plan(&mut self, plan: DatePlan) {
        self.payer_slider = plan.payer().slider_value();
        self.date_plan = Some(plan);
    }

    /// The user has written at least once.
    pub fn is_active(&self) -> bool {
        self.messages.iter().any(|m| m.sender == Sender::Me)
    }
}

pub struct Inbox<'a> {
    pub new_matches: Vec<&'a Candidate>,
    pub active_chats: Vec<(&'a Candidate, &'a Conversation)>,
}

/// Conversations keyed by match id. Entries are never removed in a session.
#[derive(Default)]
pub struct ConversationStore {
    conversations: HashMap<String, Conversation>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, match_id: &str) -> Option<&Conversation> {
        self.conversations.get(match_id)
    }

    #[cfg(test)]
    pub fn contains(&self, match_id: &str) -> bool {
        self.conversations.contains_key(match_id)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Creates the conversation with the greeting pair on first call. Later
    /// calls only attach `plan` when none is attached yet.
    pub fn start_chat(
        &mut self,
        match_id: &str,
        plan: Option<DatePlan>,
        phrases: &Phrases,
    ) -> &Conversation {
        match self.conversations.entry(match_id.to_string()) {
            Entry::Occupied(entry) => {
                let conversation = entry.into_mut();
                if conversation.date_plan.is_none()
                    && let Some(plan) = plan
                {
                    debug!("Attaching date plan {} to chat with {}", plan.name, match_id);
                    conversation.attach_plan(plan);
                }
                conversation
            }
            Entry::Vacant(entry) => {
                let now = Utc::now();
                let conversation = entry.insert(Conversation::new(match_id));
                conversation.push(Message::new(
                    Sender::Match,
                    phrases.hello,
                    MessageKind::Text,
                    now - TimeDelta::seconds(10),
                ));
                conversation.push(Message::new(
                    Sender::Match,
                    phrases.intro,
                    MessageKind::Text,
                    now - TimeDelta::seconds(8),
                ));
                if let Some(ref plan) = plan {
                    conversation.push(Message::new(
                        Sender::Ai,
                        phrases.plan_announcement(&plan.name),
                        MessageKind::LocationSuggestion,
                        now - TimeDelta::seconds(5),
                    ));
                }
                if let Some(plan) = plan {
                    conversation.attach_plan(plan);
                }
                conversation.last_message_at = now;
                info!("Started chat with {}", match_id);
                conversation
            }
        }
    }

    /// A message the match sent first. Creates the conversation when absent.
    pub fn receive_greeting(&mut self, match_id: &str, text: &str) -> &Conversation {
        let conversation = self
            .conversations
            .entry(match_id.to_string())
            .or_insert_with(|| Conversation::new(match_id));
        conversation.push(Message::new(
            Sender::Match,
            text,
            MessageKind::Text,
            Utc::now(),
        ));
        conversation.unread_count += 1;
        conversation
    }

    /// No-op returning `None` when no conversation exists for `match_id`.
    pub fn send_message(
        &mut self,
        match_id: &str,
        text: &str,
        kind: MessageKind,
    ) -> Option<&Message> {
        let Some(conversation) = self.conversations.get_mut(match_id) else {
            debug!("Ignoring message to {} without a conversation", match_id);
            return None;
        };
        let message = Message::new(kind.sender(), text, kind, Utc::now());
        debug!(
            "Message {} ({:?}) added to chat with {}",
            message.id, message.kind, conversation.match_id
        );
        Some(conversation.push(message))
    }

    /// Overwrites the attached plan after an explicit new suggestion.
    pub fn replace_date_plan(&mut self, match_id: &str, plan: DatePlan) -> bool {
        match self.conversations.get_mut(match_id) {
            Some(conversation) => {
                conversation.attach_plan(plan);
                true
            }
            None => false,
        }
    }

    /// Edits the time of the attached plan. Blank input changes nothing.
    pub fn change_plan_time(&mut self, match_id: &str, time: &str) -> Option<&DatePlan> {
        let time = time.trim();
        let plan = self.conversations.get_mut(match_id)?.date_plan.as_mut()?;
        if !time.is_empty() {
            debug!("Plan time for {} changed to {}", match_id, time);
            plan.suggested_time = time.to_string();
        }
        Some(&*plan)
    }

    /// Moves the who-pays slider, clamped to 0..=100.
    pub fn set_payer_slider(&mut self, match_id: &str, value: u8) -> Option<u8> {
        let conversation = self.conversations.get_mut(match_id)?;
        conversation.payer_slider = value.min(100);
        Some(conversation.payer_slider)
    }

    pub fn mark_read(&mut self, match_id: &str) {
        if let Some(conversation) = self.conversations.get_mut(match_id) {
            conversation.unread_count = 0;
        }
    }

    pub fn inbox<'a>(&'a self, candidates: &'a [Candidate]) -> Inbox<'a> {
        let mut new_matches = Vec::new();
        let mut active_chats = Vec::new();
        for candidate in candidates {
            match self.conversations.get(candidate.id()) {
                Some(conversation) if conversation.is_active() => {
                    active_chats.push((candidate, conversation))
                }
                _ => new_matches.push(candidate),
            }
        }
        active_chats.sort_by(|a, b| b.1.last_message_at.cmp(&a.1.last_message_at));
        Inbox {
            new_matches,
            active_chats,
        }
    }
}
