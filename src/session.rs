use crate::chat::ChatView;
use crate::community::CommunityTopic;
use crate::conversations::{Conversation, ConversationStore, Inbox, Message, MessageKind};
use crate::feed::{CandidateFeed, Direction, MatchFilters};
use crate::location::{LocationError, Locator};
use crate::phrases::Phrases;
use crate::plan::{DatePlan, Payer};
use crate::planner::DatePlanner;
use crate::profile::{Candidate, Coordinates, Language, UserProfile};
use crate::suggestions::{Lookup, SuggestionCache, SuggestionEvent};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Feed,
    /// Shown right after a successful like.
    MatchConfirmed(String),
    Chat(String),
}

/// Owns every piece of client state. All mutation goes through these methods.
pub struct Session {
    user: UserProfile,
    feed: CandidateFeed,
    planner: Arc<dyn DatePlanner>,
    planner_timeout: Duration,
    cache: SuggestionCache,
    events: mpsc::Receiver<SuggestionEvent>,
    conversations: ConversationStore,
    suggestion: Option<DatePlan>,
    analyzing: bool,
    view: View,
}

impl Session {
    pub fn new(
        user: UserProfile,
        feed: CandidateFeed,
        planner: Arc<dyn DatePlanner>,
        planner_timeout: Duration,
    ) -> Self {
        let (cache, events) = SuggestionCache::new(planner.clone(), planner_timeout);
        Self {
            user,
            feed,
            planner,
            planner_timeout,
            cache,
            events,
            conversations: ConversationStore::new(),
            suggestion: None,
            analyzing: false,
            view: View::Feed,
        }
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn language(&self) -> Language {
        self.user.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.user.language = language;
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn back(&mut self) {
        self.view = View::Feed;
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    #[cfg(test)]
    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Stores the user's position, then shows the first candidate.
    pub async fn request_location(
        &mut self,
        locator: &dyn Locator,
    ) -> Result<Coordinates, LocationError> {
        let coordinates = locator.locate().await?;
        info!(
            "Location granted: {:.4}, {:.4}",
            coordinates.lat, coordinates.lng
        );
        self.user.profile.coordinates = Some(coordinates);
        self.show_current();
        Ok(coordinates)
    }

    pub fn current_candidate(&self) -> Option<&Candidate> {
        self.feed.current()
    }

    /// One-based position of the current candidate and the filtered count.
    pub fn feed_position(&self) -> Option<(usize, usize)> {
        if self.feed.is_empty() {
            return None;
        }
        Some((self.feed.position() + 1, self.feed.len()))
    }

    /// Adds a trimmed interest. Blank and duplicate entries are ignored.
    pub fn add_interest(&mut self, interest: &str) -> bool {
        let interest = interest.trim();
        let interests = &mut self.user.profile.interests;
        if interest.is_empty() || interests.iter().any(|i| i == interest) {
            return false;
        }
        interests.push(interest.to_string());
        info!("Added interest {}", interest);
        true
    }

    pub fn remove_interest(&mut self, interest: &str) -> bool {
        let interests = &mut self.user.profile.interests;
        let before = interests.len();
        interests.retain(|i| i != interest.trim());
        before != interests.len()
    }

    /// Updates the free-text profile fields. A blank job clears it.
    pub fn update_info(&mut self, bio: Option<&str>, job: Option<&str>) {
        if let Some(bio) = bio {
            self.user.profile.bio = bio.trim().to_string();
        }
        if let Some(job) = job {
            let job = job.trim();
            self.user.profile.job = (!job.is_empty()).then(|| job.to_string());
        }
        debug!("Profile info updated");
    }

    /// Plan displayed for the current candidate, if one has arrived.
    pub fn suggestion(&self) -> Option<&DatePlan> {
        self.suggestion.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    /// Resets the displayed plan for the current candidate from the cache,
    /// starting a background fetch on a miss.
    pub fn show_current(&mut self) {
        self.suggestion = None;
        self.analyzing = false;

        let Some(candidate) = self.feed.current() else {
            return;
        };
        match self
            .cache
            .get_or_fetch(&self.user, candidate, self.user.language)
        {
            Lookup::Ready(plan) => self.suggestion = Some(plan),
            Lookup::Pending => self.analyzing = true,
        }
    }

    pub fn advance(&mut self, direction: Direction) -> Option<&Candidate> {
        self.feed.advance(direction);
        self.view = View::Feed;
        self.show_current();
        self.feed.current()
    }

    pub fn pass(&mut self) -> Option<&Candidate> {
        self.advance(Direction::Forward)
    }

    pub fn filters(&self) -> &MatchFilters {
        self.feed.filters()
    }

    pub fn set_filters(&mut self, filters: MatchFilters) {
        self.feed.set_filters(filters);
        self.show_current();
    }

    /// Displays the event's plan only if its candidate is still on screen.
    pub fn apply_suggestion(&mut self, event: &SuggestionEvent) -> bool {
        match self.feed.current() {
            Some(current) if current.id() == event.candidate_id => {
                self.suggestion = Some(event.plan.clone());
                self.analyzing = false;
                true
            }
            _ => {
                debug!(
                    "Discarding date plan for {}, no longer displayed",
                    event.candidate_id
                );
                false
            }
        }
    }

    /// Waits for the next finished fetch and applies it.
    pub async fn next_suggestion(&mut self) -> Option<SuggestionEvent> {
        let event = self.events.recv().await?;
        self.apply_suggestion(&event);
        Some(event)
    }

    /// Only permitted once a plan is cached for `candidate_id`.
    pub fn like(&mut self, candidate_id: &str) -> Option<&Conversation> {
        let Some(plan) = self.cache.get(candidate_id) else {
            debug!("Like for {} ignored, no date plan yet", candidate_id);
            return None;
        };
        if self.feed.find(candidate_id).is_none() {
            debug!("Like for unknown candidate {} ignored", candidate_id);
            return None;
        }

        info!("Liked {} with plan {}", candidate_id, plan.name);
        self.view = View::MatchConfirmed(candidate_id.to_string());
        Some(self.conversations.start_chat(
            candidate_id,
            Some(plan),
            Phrases::for_language(self.user.language),
        ))
    }

    pub fn like_current(&mut self) -> Option<&Conversation> {
        let id = self.feed.current()?.id().to_string();
        self.like(&id)
    }

    /// Moves from the match confirmation into the chat.
    pub fn enter_chat(&mut self) -> bool {
        let View::MatchConfirmed(ref id) = self.view else {
            return false;
        };
        let id = id.clone();
        self.conversations.mark_read(&id);
        self.view = View::Chat(id);
        true
    }

    /// Opens a chat from the inbox, creating it without a plan when absent.
    pub fn open_chat(&mut self, candidate_id: &str) -> Option<&Conversation> {
        self.feed.find(candidate_id)?;
        self.view = View::Chat(candidate_id.to_string());
        self.conversations.start_chat(
            candidate_id,
            None,
            Phrases::for_language(self.user.language),
        );
        self.conversations.mark_read(candidate_id);
        self.conversations.get(candidate_id)
    }

    pub fn receive_greeting(&mut self, candidate_id: &str, text: &str) -> bool {
        if self.feed.find(candidate_id).is_none() {
            return false;
        }
        self.conversations.receive_greeting(candidate_id, text);
        true
    }

    fn open_chat_id(&self) -> Option<String> {
        match self.view {
            View::Chat(ref id) => Some(id.clone()),
            _ => None,
        }
    }

    /// Sends to the open chat; no-op outside the chat view.
    pub fn send(&mut self, text: &str, kind: MessageKind) -> Option<&Message> {
        let id = self.open_chat_id()?;
        self.conversations.send_message(&id, text, kind)
    }

    /// Edits the time of the open chat's plan.
    pub fn change_plan_time(&mut self, time: &str) -> Option<&DatePlan> {
        let id = self.open_chat_id()?;
        self.conversations.change_plan_time(&id, time)
    }

    pub fn set_payer_slider(&mut self, value: u8) -> Option<u8> {
        let id = self.open_chat_id()?;
        self.conversations.set_payer_slider(&id, value)
    }

    /// Snaps the open chat's slider to a random stop.
    pub fn randomize_payer(&mut self) -> Option<u8> {
        let id = self.open_chat_id()?;
        let payer = Payer::random();
        debug!("Randomized payer for {}: {}", id, payer);
        self.conversations
            .set_payer_slider(&id, payer.slider_value())
    }

    /// Fetches a fresh plan for the open chat and attaches it.
    pub async fn suggest_new_plan(&mut self) -> Option<DatePlan> {
        let id = self.open_chat_id()?;
        let candidate = self.feed.find(&id)?.clone();
        let phrases = Phrases::for_language(self.user.language);

        self.conversations.send_message(
            &id,
            &format!("{} 📍", phrases.suggest_location),
            MessageKind::Text,
        );
        let (plan, origin) = self
            .cache
            .refresh(&self.user, &candidate, self.user.language)
            .await;
        debug!("New plan for {} ({:?}): {}", id, origin, plan.name);

        self.conversations.replace_date_plan(&id, plan.clone());
        self.conversations.send_message(
            &id,
            &format!("{} {}!", phrases.location_found, plan.name),
            MessageKind::LocationSuggestion,
        );
        Some(plan)
    }

    pub fn chat_view(&self) -> Option<ChatView<'_>> {
        let View::Chat(ref id) = self.view else {
            return None;
        };
        Some(ChatView::new(
            self.feed.find(id)?,
            self.conversations.get(id)?,
            self.user.profile.coordinates,
        ))
    }

    pub fn inbox(&self) -> Inbox<'_> {
        self.conversations.inbox(self.feed.all())
    }

    /// Community discussion topics; empty when the collaborator fails.
    pub async fn community_topics(&self) -> Vec<CommunityTopic> {
        let request = self.planner.community_topics(self.user.language);
        match tokio::time::timeout(self.planner_timeout, request).await {
            Ok(Ok(topics)) => topics,
            Ok(Err(e)) => {
                warn!("Community topics unavailable: {}", e);
                Vec::new()
            }
            Err(_) => {
                warn!("Community topics timed out");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversations::Sender;
    use crate::location::FixedLocator;
    use crate::planner::PlannerError;
    use crate::profile::{self, candidate};
    use crate::suggestions::PlanOrigin;
    use std::sync::Mutex;
    use crate::suggestions::testing::{Reply, ScriptedPlanner, plan};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Notify;

    const TIMEOUT: Duration = Duration::from_secs(15);

    /// Answers "Plan for <id>", holding candidates with a gate until notified.
    struct KeyedPlanner {
        gates: HashMap<String, Arc<Notify>>,
    }

    #[async_trait]
    impl DatePlanner for KeyedPlanner {
        async fn suggest_date_plan(
            &self,
            _user: &UserProfile,
            candidate: &Candidate,
            _language: Language,
        ) -> Result<DatePlan, PlannerError> {
            if let Some(gate) = self.gates.get(candidate.id()) {
                gate.notified().await;
            }
            Ok(plan(&format!("Plan for {}", candidate.id())))
        }
    }

    fn session_with(planner: Arc<dyn DatePlanner>) -> Session {
        let feed = CandidateFeed::new(
            vec![
                candidate("X", 25, 2.0, &["Coffee"]),
                candidate("Y", 27, 4.0, &["Running"]),
            ],
            false,
        );
        Session::new(profile::user(), feed, planner, TIMEOUT)
    }

    #[tokio::test]
    async fn like_without_cached_plan_is_rejected() {
        let gate = Arc::new(Notify::new());
        let planner = Arc::new(KeyedPlanner {
            gates: HashMap::from([("X".to_string(), gate)]),
        });
        let mut session = session_with(planner);
        session.show_current();
        assert!(session.is_analyzing());

        assert!(session.like("X").is_none());
        assert!(session.like_current().is_none());
        assert!(!session.conversations().contains("X"));
        assert_eq!(session.view(), &View::Feed);
    }

    #[tokio::test]
    async fn fallback_plan_unlocks_like() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Fail]));
        let mut session = session_with(planner);
        session.show_current();

        let event = session.next_suggestion().await.unwrap();
        assert_eq!(event.origin, PlanOrigin::Fallback);
        let cached = session.cache().get("X").unwrap();
        assert_eq!(cached, DatePlan::fallback(Language::En));
        assert_eq!(session.suggestion(), Some(&cached));

        let conversation = session.like("X").unwrap();
        assert_eq!(conversation.date_plan(), Some(&cached));
        assert_eq!(session.view(), &View::MatchConfirmed("X".to_string()));
    }

    #[tokio::test]
    async fn late_response_for_previous_candidate_is_not_displayed() {
        let gate_x = Arc::new(Notify::new());
        let planner = Arc::new(KeyedPlanner {
            gates: HashMap::from([("X".to_string(), gate_x.clone())]),
        });
        let mut session = session_with(planner);
        session.show_current();
        assert!(session.suggestion().is_none());

        session.advance(Direction::Forward);
        assert_eq!(session.current_candidate().map(|c| c.id()), Some("Y"));
        let y_event = session.next_suggestion().await.unwrap();
        assert_eq!(y_event.candidate_id, "Y");
        assert_eq!(session.suggestion(), Some(&plan("Plan for Y")));

        gate_x.notify_one();
        let x_event = session.next_suggestion().await.unwrap();
        assert_eq!(x_event.candidate_id, "X");
        assert_eq!(session.suggestion(), Some(&plan("Plan for Y")));
        assert_eq!(session.cache().get("X"), Some(plan("Plan for X")));
    }

    #[tokio::test]
    async fn navigating_back_serves_cached_plan_without_refetch() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Plan(plan("Rooftop"))]));
        let mut session = session_with(planner.clone());
        session.show_current();
        session.next_suggestion().await.unwrap();

        session.advance(Direction::Forward);
        session.next_suggestion().await.unwrap();
        session.advance(Direction::Backward);

        assert!(!session.is_analyzing());
        assert_eq!(session.suggestion(), Some(&plan("Rooftop")));
        assert_eq!(planner.calls(), 2);
    }

    #[tokio::test]
    async fn like_then_message_counts() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Plan(plan("Rooftop"))]));
        let mut session = session_with(planner);
        session.show_current();
        session.advance(Direction::Forward);
        while session.cache().get("Y").is_none() {
            session.next_suggestion().await.unwrap();
        }

        session.like("Y").unwrap();
        assert!(session.enter_chat());
        let sent = session.send("hello", MessageKind::Text).unwrap();
        assert_eq!(sent.sender, Sender::Me);

        let conversation = session.conversations().get("Y").unwrap();
        assert_eq!(conversation.messages().len(), 2 + 1 + 1);
        assert_eq!(session.view(), &View::Chat("Y".to_string()));
    }

    #[tokio::test]
    async fn liking_twice_keeps_first_plan_and_greeting() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Plan(plan("Rooftop"))]));
        let mut session = session_with(planner);
        session.show_current();
        session.next_suggestion().await.unwrap();

        session.like("X").unwrap();
        let conversation = session.like("X").unwrap();
        assert_eq!(conversation.messages().len(), 3);
        assert_eq!(conversation.date_plan(), Some(&plan("Rooftop")));
    }

    #[tokio::test]
    async fn pass_only_moves_the_cursor() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Plan(plan("Rooftop"))]));
        let mut session = session_with(planner);
        session.show_current();

        assert_eq!(session.pass().map(|c| c.id()), Some("Y"));
        assert!(session.conversations().is_empty());
        assert_eq!(session.pass().map(|c| c.id()), Some("X"));
    }

    #[tokio::test]
    async fn send_outside_chat_is_noop() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Fail]));
        let mut session = session_with(planner);
        assert!(session.send("hi", MessageKind::Text).is_none());
        assert!(session.change_plan_time("20:00").is_none());
        assert!(session.randomize_payer().is_none());
        assert!(!session.enter_chat());
    }

    #[tokio::test]
    async fn new_plan_in_chat_replaces_attached_plan() {
        let planner = Arc::new(ScriptedPlanner::new(vec![
            Reply::Plan(plan("Rooftop")),
            Reply::Plan(plan("Night Market")),
        ]));
        let mut session = session_with(planner);
        session.show_current();
        session.next_suggestion().await.unwrap();
        session.like("X").unwrap();
        session.enter_chat();

        let fresh = session.suggest_new_plan().await.unwrap();
        assert_eq!(fresh.name, "Night Market");

        let view = session.chat_view().unwrap();
        assert_eq!(view.active_plan(), Some(&plan("Night Market")));
        let messages = view.messages();
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[3].sender, Sender::Me);
        assert_eq!(messages[4].kind, MessageKind::LocationSuggestion);
        assert!(messages[4].text.contains("Night Market"));
    }

    #[tokio::test]
    async fn greeting_then_open_chat_clears_unread() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Fail]));
        let mut session = session_with(planner);

        assert!(session.receive_greeting("Y", "I like running too!"));
        assert!(!session.receive_greeting("nobody", "hi"));
        assert_eq!(session.conversations().get("Y").unwrap().unread_count, 1);

        let conversation = session.open_chat("Y").unwrap();
        assert_eq!(conversation.unread_count, 0);
        assert_eq!(conversation.messages().len(), 1);
        assert!(conversation.date_plan().is_none());

        session.send("Me too!", MessageKind::Text).unwrap();
        let inbox = session.inbox();
        assert_eq!(inbox.active_chats.len(), 1);
        assert_eq!(inbox.new_matches.len(), 1);
    }

    #[tokio::test]
    async fn location_grant_starts_first_fetch() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Plan(plan("Rooftop"))]));
        let mut session = session_with(planner.clone());

        let denied = FixedLocator::new(None, false);
        assert!(session.request_location(&denied).await.is_err());
        assert!(!session.is_analyzing());

        let here = Coordinates {
            lat: 10.78,
            lng: 106.69,
        };
        let granted = FixedLocator::new(Some(here), true);
        assert_eq!(session.request_location(&granted).await.unwrap(), here);
        assert_eq!(session.user().profile.coordinates, Some(here));
        assert!(session.is_analyzing());
        session.next_suggestion().await.unwrap();
        assert_eq!(session.suggestion(), Some(&plan("Rooftop")));
    }

    #[tokio::test]
    async fn filters_reselect_current_candidate() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Plan(plan("Rooftop"))]));
        let mut session = session_with(planner);
        session.show_current();
        session.advance(Direction::Forward);

        session.set_filters(MatchFilters {
            max_distance_km: 3.0,
            ..Default::default()
        });
        assert_eq!(session.current_candidate().map(|c| c.id()), Some("X"));
        assert_eq!(session.filters().max_distance_km, 3.0);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_in_flight_does_not_undo_new_chat_plan() {
        let planner = Arc::new(ScriptedPlanner::new(vec![
            Reply::Fail,
            Reply::Hang,
            Reply::Plan(plan("Night Market")),
        ]));
        let feed = CandidateFeed::new(vec![candidate("X", 25, 2.0, &[])], false);
        let mut session = Session::new(profile::user(), feed, planner, Duration::from_secs(3));
        session.show_current();
        session.next_suggestion().await.unwrap();
        session.like("X").unwrap();
        session.enter_chat();

        session.show_current();
        assert!(session.cache().is_in_flight("X"));
        let fresh = session.suggest_new_plan().await.unwrap();
        assert_eq!(fresh, plan("Night Market"));

        while let Ok(event) = session.events.try_recv() {
            session.apply_suggestion(&event);
        }
        assert_eq!(session.cache().get("X"), Some(plan("Night Market")));
        assert_eq!(session.cache().origin("X"), Some(PlanOrigin::Generated));
        assert_eq!(session.suggestion(), Some(&plan("Night Market")));
        let view = session.chat_view().unwrap();
        assert_eq!(view.active_plan(), Some(&plan("Night Market")));
    }

    #[tokio::test]
    async fn fallback_event_for_previous_candidate_is_ignored() {
        let planner = Arc::new(KeyedPlanner {
            gates: HashMap::new(),
        });
        let mut session = session_with(planner);
        session.show_current();
        session.next_suggestion().await.unwrap();
        session.advance(Direction::Forward);
        session.next_suggestion().await.unwrap();

        let stale = SuggestionEvent {
            candidate_id: "X".to_string(),
            plan: DatePlan::fallback(Language::En),
            origin: PlanOrigin::Fallback,
        };
        assert!(!session.apply_suggestion(&stale));
        assert_eq!(session.suggestion(), Some(&plan("Plan for Y")));
    }

    #[tokio::test]
    async fn chat_plan_time_and_payer_are_adjustable() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Fail]));
        let mut session = session_with(planner);
        session.show_current();
        session.next_suggestion().await.unwrap();
        session.like("X").unwrap();
        session.enter_chat();

        let edited = session.change_plan_time("Friday 20:30").unwrap();
        assert_eq!(edited.suggested_time, "Friday 20:30");
        assert_eq!(session.cache().get("X").unwrap().suggested_time, "19:00");

        assert_eq!(session.set_payer_slider(10), Some(10));
        assert_eq!(session.chat_view().unwrap().payer_slider(), 10);
        let stop = session.randomize_payer().unwrap();
        assert!(matches!(stop, 0 | 50 | 100));
    }

    /// Records the interests each request was made with.
    struct RecordingPlanner {
        seen: Mutex<Vec<Vec<String>>>,
    }

    #[async_trait]
    impl DatePlanner for RecordingPlanner {
        async fn suggest_date_plan(
            &self,
            user: &UserProfile,
            candidate: &Candidate,
            _language: Language,
        ) -> Result<DatePlan, PlannerError> {
            self.seen
                .lock()
                .unwrap()
                .push(user.profile.interests.clone());
            Ok(plan(&format!("Plan for {}", candidate.id())))
        }

        async fn community_topics(
            &self,
            _language: Language,
        ) -> Result<Vec<CommunityTopic>, PlannerError> {
            Err(PlannerError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn profile_edits_reach_later_fetches() {
        let planner = Arc::new(RecordingPlanner {
            seen: Mutex::new(Vec::new()),
        });
        let mut session = session_with(planner.clone());

        assert!(session.add_interest(" Art "));
        assert!(!session.add_interest("Art"));
        assert!(!session.add_interest("  "));
        assert!(session.remove_interest("Coffee"));
        assert!(!session.remove_interest("Coffee"));
        session.update_info(Some("New in town"), Some(""));
        assert_eq!(session.user().profile.bio, "New in town");
        assert!(session.user().profile.job.is_none());

        session.show_current();
        session.next_suggestion().await.unwrap();
        let seen = planner.seen.lock().unwrap();
        assert_eq!(seen[0], vec!["Running".to_string(), "Art".to_string()]);
    }

    #[tokio::test]
    async fn community_topics_degrade_to_empty() {
        let failing = Arc::new(RecordingPlanner {
            seen: Mutex::new(Vec::new()),
        });
        assert!(session_with(failing).community_topics().await.is_empty());

        let unconfigured = session_with(Arc::new(crate::planner::UnconfiguredPlanner));
        assert!(unconfigured.community_topics().await.is_empty());
    }

    #[tokio::test]
    async fn feed_position_tracks_cursor() {
        let planner = Arc::new(ScriptedPlanner::new(vec![Reply::Fail]));
        let mut session = session_with(planner);
        assert_eq!(session.feed_position(), Some((1, 2)));
        session.advance(Direction::Forward);
        assert_eq!(session.feed_position(), Some((2, 2)));
        session.set_filters(MatchFilters {
            min_age: 40,
            ..Default::default()
        });
        assert_eq!(session.feed_position(), None);
    }
}
