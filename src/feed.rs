use crate::profile::Candidate;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchFilters {
    pub min_age: u32,
    pub max_age: u32,
    pub max_distance_km: f64,
    /// `None` shows every category.
    pub category: Option<String>,
}

impl Default for MatchFilters {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 50,
            max_distance_km: 50.0,
            category: None,
        }
    }
}

impl MatchFilters {
    fn accepts(&self, candidate: &Candidate, is_group: bool) -> bool {
        let p = &candidate.profile;
        let age_ok = is_group || (p.age >= self.min_age && p.age <= self.max_age);
        let distance_ok = candidate.distance_km <= self.max_distance_km;
        let category_ok = match self.category {
            Some(ref category) => p
                .interests
                .iter()
                .any(|i| i.eq_ignore_ascii_case(category)),
            None => true,
        };
        age_ok && distance_ok && category_ok
    }
}

/// Ordered candidate list with a circular cursor over the filtered subset.
pub struct CandidateFeed {
    candidates: Vec<Candidate>,
    filters: MatchFilters,
    is_group: bool,
    filtered: Vec<usize>,
    cursor: usize,
}

impl CandidateFeed {
    pub fn new(candidates: Vec<Candidate>, is_group: bool) -> Self {
        let mut feed = Self {
            candidates,
            filters: MatchFilters::default(),
            is_group,
            filtered: Vec::new(),
            cursor: 0,
        };
        feed.refilter();
        feed
    }

    fn refilter(&mut self) {
        self.filtered = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| self.filters.accepts(c, self.is_group))
            .map(|(i, _)| i)
            .collect();

        if self.cursor >= self.filtered.len() {
            self.cursor = 0;
        }
        debug!(
            "Feed filtered to {} of {} candidates",
            self.filtered.len(),
            self.candidates.len()
        );
    }

    pub fn set_filters(&mut self, filters: MatchFilters) {
        self.filters = filters;
        self.refilter();
    }

    pub fn filters(&self) -> &MatchFilters {
        &self.filters
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.filtered
            .get(self.cursor)
            .map(|&i| &self.candidates[i])
    }

    pub fn advance(&mut self, direction: Direction) -> Option<&Candidate> {
        let len = self.filtered.len();
        if len == 0 {
            return None;
        }
        self.cursor = match direction {
            Direction::Forward => (self.cursor + 1) % len,
            Direction::Backward => (self.cursor + len - 1) % len,
        };
        self.current()
    }

    /// Looks up any loaded candidate, filtered out or not.
    pub fn find(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id() == id)
    }

    pub fn all(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }
}
