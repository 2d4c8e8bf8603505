use crate::plan::DatePlan;
use crate::planner::{DatePlanner, PlannerError};
use crate::profile::{Candidate, Language, UserProfile};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::{Notify, mpsc};
use tracing::{debug, info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOrigin {
    Generated,
    /// Substituted after a planner failure; retried on the next lookup.
    Fallback,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    plan: DatePlan,
    origin: PlanOrigin,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Ready(DatePlan),
    Pending,
}

/// Completion of a background fetch. May arrive after the user moved on.
#[derive(Debug, Clone)]
pub struct SuggestionEvent {
    pub candidate_id: String,
    pub plan: DatePlan,
    pub origin: PlanOrigin,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    /// Woken once the fetch for that id has settled.
    in_flight: HashMap<String, Arc<Notify>>,
}

impl CacheState {
    /// Records a finished fetch and returns what the cache now holds. A
    /// fallback never replaces an existing entry.
    fn settle(&mut self, id: &str, plan: DatePlan, origin: PlanOrigin) -> CacheEntry {
        if let Some(done) = self.in_flight.remove(id) {
            done.notify_waiters();
        }
        let entry = CacheEntry { plan, origin };
        match origin {
            PlanOrigin::Generated => {
                self.entries.insert(id.to_string(), entry.clone());
                entry
            }
            PlanOrigin::Fallback => self.entries.entry(id.to_string()).or_insert(entry).clone(),
        }
    }
}

/// Per-candidate date plan cache with single-flight background fetches.
pub struct SuggestionCache {
    planner: Arc<dyn DatePlanner>,
    state: Arc<Mutex<CacheState>>,
    timeout: Duration,
    events: mpsc::Sender<SuggestionEvent>,
}

impl SuggestionCache {
    pub fn new(
        planner: Arc<dyn DatePlanner>,
        timeout: Duration,
    ) -> (Self, mpsc::Receiver<SuggestionEvent>) {
        let (events, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let cache = Self {
            planner,
            state: Arc::new(Mutex::new(CacheState::default())),
            timeout,
            events,
        };
        (cache, rx)
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        lock_state(&self.state)
    }

    pub fn get(&self, candidate_id: &str) -> Option<DatePlan> {
        self.lock()
            .entries
            .get(candidate_id)
            .map(|e| e.plan.clone())
    }

    pub fn origin(&self, candidate_id: &str) -> Option<PlanOrigin> {
        self.lock().entries.get(candidate_id).map(|e| e.origin)
    }

    #[cfg(test)]
    pub fn is_in_flight(&self, candidate_id: &str) -> bool {
        self.lock().in_flight.contains_key(candidate_id)
    }

    /// Returns the cached plan, or starts a background fetch and reports `Pending`.
    /// A fallback entry is returned as-is while a retry runs behind it.
    pub fn get_or_fetch(
        &self,
        user: &UserProfile,
        candidate: &Candidate,
        language: Language,
    ) -> Lookup {
        let id = candidate.id();
        let mut state = self.lock();

        let cached = state.entries.get(id).cloned();
        if let Some(ref entry) = cached
            && entry.origin == PlanOrigin::Generated
        {
            return Lookup::Ready(entry.plan.clone());
        }

        if state.in_flight.contains_key(id) {
            debug!("Date plan fetch for {} already in flight", id);
        } else {
            state.in_flight.insert(id.to_string(), Arc::new(Notify::new()));
            drop(state);
            self.spawn_fetch(user.clone(), candidate.clone(), language);
        }

        match cached {
            Some(entry) => Lookup::Ready(entry.plan),
            None => Lookup::Pending,
        }
    }

    fn spawn_fetch(&self, user: UserProfile, candidate: Candidate, language: Language) {
        let planner = self.planner.clone();
        let state = self.state.clone();
        let events = self.events.clone();
        let timeout = self.timeout;

        tokio::spawn(async move {
            let id = candidate.id().to_string();
            let (plan, origin) =
                fetch_or_fallback(planner.as_ref(), &user, &candidate, language, timeout).await;

            let stored = lock_state(&state).settle(&id, plan, origin);
            if stored.origin != origin {
                debug!("Keeping cached {:?} plan for {}", stored.origin, id);
            }
            let _ = events
                .send(SuggestionEvent {
                    candidate_id: id,
                    plan: stored.plan,
                    origin: stored.origin,
                })
                .await;
        });
    }

    /// Explicit refetch that bypasses the lookup. Waits for a fetch already in
    /// flight for the candidate and returns its plan when it produced one. A
    /// failure returns the fallback without replacing an existing entry.
    pub async fn refresh(
        &self,
        user: &UserProfile,
        candidate: &Candidate,
        language: Language,
    ) -> (DatePlan, PlanOrigin) {
        let id = candidate.id();

        loop {
            let done = {
                let mut state = self.lock();
                match state.in_flight.get(id) {
                    Some(done) => done.clone(),
                    None => {
                        state
                            .in_flight
                            .insert(id.to_string(), Arc::new(Notify::new()));
                        break;
                    }
                }
            };

            debug!("Waiting for the running date plan fetch for {}", id);
            let settled = done.notified();
            tokio::pin!(settled);
            settled.as_mut().enable();
            let still_running = self
                .lock()
                .in_flight
                .get(id)
                .is_some_and(|d| Arc::ptr_eq(d, &done));
            if still_running {
                settled.await;
            }

            let generated = self
                .lock()
                .entries
                .get(id)
                .filter(|e| e.origin == PlanOrigin::Generated)
                .cloned();
            if let Some(entry) = generated {
                return (entry.plan, entry.origin);
            }
        }

        let (plan, origin) =
            fetch_or_fallback(self.planner.as_ref(), user, candidate, language, self.timeout).await;
        let stored = self.lock().settle(id, plan.clone(), origin);
        let _ = self.events.try_send(SuggestionEvent {
            candidate_id: id.to_string(),
            plan: stored.plan,
            origin: stored.origin,
        });
        (plan, origin)
    }
}

fn lock_state(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn fetch_with_timeout(
    planner: &dyn DatePlanner,
    user: &UserProfile,
    candidate: &Candidate,
    language: Language,
    timeout: Duration,
) -> Result<DatePlan, PlannerError> {
    tokio::time::timeout(timeout, planner.suggest_date_plan(user, candidate, language))
        .await
        .unwrap_or(Err(PlannerError::Timeout))
}

async fn fetch_or_fallback(
    planner: &dyn DatePlanner,
    user: &UserProfile,
    candidate: &Candidate,
    language: Language,
    timeout: Duration,
) -> (DatePlan, PlanOrigin) {
    match fetch_with_timeout(planner, user, candidate, language, timeout).await {
        Ok(plan) => {
            info!("Date plan ready for {}: {}", candidate.id(), plan.name);
            (plan, PlanOrigin::Generated)
        }
        Err(e) => {
            warn!(
                "Date plan fetch for {} failed, using fallback: {}",
                candidate.id(),
                e
            );
            (DatePlan::fallback(language), PlanOrigin::Fallback)
        }
    }
}
