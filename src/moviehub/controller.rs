//! # Catalog State Controller
//!
//! Owns the client-side view of the catalog: a snapshot of every movie, where
//! loading stands, and the most recent error. All writes go through the store
//! first; the snapshot only changes once the store has accepted a mutation.
//!
//! ## Load State
//!
//! ```text
//! Uninitialized ──load()──▶ Loading ──ok──▶ Ready
//!                                    └─err─▶ Failed(message)
//! ```
//!
//! `load()` may be called again from any state (a retry, or a refresh).
//! Operations before `Ready` are allowed and see an empty snapshot.
//!
//! ## Errors
//!
//! A failed operation stores its message as the current error, replacing any
//! previous one, and still returns the error to the caller. `clear_error()`
//! dismisses it.

use crate::error::Result;
use crate::filter::{self, GenreFilter};
use crate::model::{Movie, MovieDraft, MovieId};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loading,
    Ready,
    Failed(String),
}

/// Where the genre list offered for filtering comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreSource {
    /// The seed catalog the process started with. Genres introduced later by
    /// add or update are not offered.
    #[default]
    Seed,
    /// Whatever the current snapshot contains.
    Live,
}

pub struct CatalogController<S: RecordStore> {
    store: S,
    movies: Vec<Movie>,
    state: LoadState,
    error: Option<String>,
    seed_genres: Vec<String>,
    genre_source: GenreSource,
}

impl<S: RecordStore> CatalogController<S> {
    /// Controller over `store`. `seed` is the catalog the store was seeded
    /// with; only its genres are kept.
    pub fn new(store: S, seed: &[Movie]) -> Self {
        Self {
            store,
            movies: Vec::new(),
            state: LoadState::Uninitialized,
            error: None,
            seed_genres: filter::distinct_genres(seed),
            genre_source: GenreSource::default(),
        }
    }

    pub fn with_genre_source(mut self, source: GenreSource) -> Self {
        self.genre_source = source;
        self
    }

    /// `new` followed by `load`. A failed load is kept in `state()`.
    pub async fn connect(store: S, seed: &[Movie]) -> Self {
        let mut controller = Self::new(store, seed);
        let _ = controller.load().await;
        controller
    }

    pub async fn load(&mut self) -> Result<()> {
        self.state = LoadState::Loading;
        match self.store.fetch_all().await {
            Ok(movies) => {
                info!(count = movies.len(), "catalog loaded");
                self.movies = movies;
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "catalog load failed");
                self.state = LoadState::Failed(message.clone());
                self.error = Some(message);
                Err(e)
            }
        }
    }

    pub async fn add(&mut self, draft: &MovieDraft) -> Result<Movie> {
        let result = self.store.create(draft).await;
        let movie = self.record(result)?;
        info!(id = %movie.id, title = %movie.title, "movie added");
        self.movies.push(movie.clone());
        Ok(movie)
    }

    pub async fn update(&mut self, id: MovieId, draft: &MovieDraft) -> Result<Movie> {
        let result = self.store.update(id, draft).await;
        let movie = self.record(result)?;
        info!(%id, title = %movie.title, "movie updated");
        if let Some(slot) = self.movies.iter_mut().find(|m| m.id == id) {
            *slot = movie.clone();
        }
        Ok(movie)
    }

    pub async fn remove(&mut self, id: MovieId) -> Result<()> {
        let result = self.store.remove(id).await;
        self.record(result)?;
        info!(%id, "movie removed");
        self.movies.retain(|m| m.id != id);
        Ok(())
    }

    /// Movies matching `search` and `genre`, in snapshot order.
    pub fn filtered_view(&self, search: &str, genre: &GenreFilter) -> Vec<Movie> {
        filter::filter_movies(&self.movies, search, genre)
    }

    /// `"All"` followed by the sorted genres of the configured [`GenreSource`].
    pub fn distinct_genres(&self) -> Vec<String> {
        match self.genre_source {
            GenreSource::Seed => self.seed_genres.clone(),
            GenreSource::Live => filter::distinct_genres(&self.movies),
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn find(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn genre_source(&self) -> GenreSource {
        self.genre_source
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!(error = %e, "store rejected operation");
            self.error = Some(e.to_string());
        }
        result
    }
}
