use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::{
    models::EnrichedMovie,
    services::{providers::MovieProvider, recommendations},
};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one in-flight fetch
///
/// Results are only applied when the token still names the session's latest
/// fetch; anything else was superseded by a reload or a mood change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken {
    session_id: u64,
    generation: u64,
}

/// What the view can show
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing to show yet, or the last load produced no movies
    Empty,
    Browsing {
        movies: Vec<EnrichedMovie>,
        cursor: usize,
    },
}

/// Recommendations for one mood selection
///
/// Created when a mood is picked, dropped when the user goes back to the mood
/// catalog.
#[derive(Debug)]
pub struct FetchSession {
    id: u64,
    mood: String,
    generation: u64,
    loading: bool,
    state: SessionState,
    expanded_reviews: HashSet<u64>,
}

impl FetchSession {
    pub fn new(mood: impl Into<String>) -> Self {
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            mood: mood.into(),
            generation: 0,
            loading: false,
            state: SessionState::Empty,
            expanded_reviews: HashSet::new(),
        }
    }

    pub fn mood(&self) -> &str {
        &self.mood
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, SessionState::Empty)
    }

    pub fn len(&self) -> usize {
        match &self.state {
            SessionState::Empty => 0,
            SessionState::Browsing { movies, .. } => movies.len(),
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::Browsing { cursor, .. } => Some(*cursor),
        }
    }

    /// The movie under the cursor
    pub fn current(&self) -> Option<&EnrichedMovie> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::Browsing { movies, cursor } => movies.get(*cursor),
        }
    }

    /// Starts a new fetch, superseding any fetch still in flight
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.generation += 1;
        self.loading = true;
        FetchToken {
            session_id: self.id,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, token: FetchToken) -> bool {
        token.session_id == self.id && token.generation == self.generation
    }

    /// Installs the result of a fetch
    ///
    /// Returns `false` and leaves the session untouched when the token is
    /// stale. Otherwise the list is replaced, expanded reviews are collapsed
    /// and the cursor lands on a random movie.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        token: FetchToken,
        movies: Vec<EnrichedMovie>,
        rng: &mut R,
    ) -> bool {
        if !self.is_current(token) {
            tracing::debug!(
                mood = %self.mood,
                generation = token.generation,
                current_generation = self.generation,
                "Discarding stale fetch result"
            );
            return false;
        }

        self.loading = false;
        self.expanded_reviews.clear();
        self.state = if movies.is_empty() {
            SessionState::Empty
        } else {
            let cursor = rng.random_range(0..movies.len());
            SessionState::Browsing { movies, cursor }
        };

        tracing::info!(
            mood = %self.mood,
            movies = self.len(),
            "Session updated"
        );

        true
    }

    /// Re-runs the pipeline and replaces the list
    pub async fn reload<R: Rng + ?Sized>(
        &mut self,
        provider: &dyn MovieProvider,
        sample_size: u32,
        rng: &mut R,
    ) -> bool {
        let token = self.begin_fetch();
        let movies =
            recommendations::get_recommendations(provider, &self.mood, sample_size, rng).await;
        self.apply(token, movies, rng)
    }

    /// Moves to the next movie, wrapping at the end
    pub fn next(&mut self) -> Option<&EnrichedMovie> {
        if let SessionState::Browsing { movies, cursor } = &mut self.state {
            *cursor = (*cursor + 1) % movies.len();
        }
        self.current()
    }

    /// Moves to the previous movie, wrapping at the start
    pub fn previous(&mut self) -> Option<&EnrichedMovie> {
        if let SessionState::Browsing { movies, cursor } = &mut self.state {
            *cursor = (*cursor + movies.len() - 1) % movies.len();
        }
        self.current()
    }

    /// Expands or collapses the reviews of a movie; returns the new state
    pub fn toggle_reviews(&mut self, movie_id: u64) -> bool {
        if self.expanded_reviews.remove(&movie_id) {
            false
        } else {
            self.expanded_reviews.insert(movie_id)
        }
    }

    pub fn reviews_expanded(&self, movie_id: u64) -> bool {
        self.expanded_reviews.contains(&movie_id)
    }

    /// Ends the session; the view returns to the mood catalog
    pub fn reset(self) {
        tracing::debug!(mood = %self.mood, "Session discarded");
    }
}
