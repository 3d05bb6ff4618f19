use super::RecordStore;
use crate::error::{CatalogError, Result};
use crate::model::{Movie, MovieDraft, MovieId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

/// Simulated round-trip time of the mock backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub fetch: Duration,
    pub mutate: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            fetch: Duration::from_millis(500),
            mutate: Duration::from_millis(300),
        }
    }
}

impl Latency {
    pub const fn none() -> Self {
        Self {
            fetch: Duration::ZERO,
            mutate: Duration::ZERO,
        }
    }

    pub const fn from_millis(fetch: u64, mutate: u64) -> Self {
        Self {
            fetch: Duration::from_millis(fetch),
            mutate: Duration::from_millis(mutate),
        }
    }
}

/// In-memory mock backend.
///
/// Clones share the same collection and id counter. Each operation runs as its
/// own task: once polled it completes even if the caller stops waiting.
#[derive(Clone)]
pub struct InMemoryStore {
    movies: Arc<Mutex<Vec<Movie>>>,
    /// Largest id handed out or seeded so far.
    last_id: Arc<AtomicU64>,
    latency: Latency,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Store holding `movies`. New ids start after the largest seeded id.
    pub fn seeded(movies: Vec<Movie>) -> Self {
        let last_id = movies.iter().map(|m| m.id.0).max().unwrap_or(0);
        Self {
            movies: Arc::new(Mutex::new(movies)),
            last_id: Arc::new(AtomicU64::new(last_id)),
            latency: Latency::default(),
        }
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Number of movies currently held, without simulated latency.
    pub fn len(&self) -> Result<usize> {
        Ok(lock(&self.movies)?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock(movies: &Mutex<Vec<Movie>>) -> Result<MutexGuard<'_, Vec<Movie>>> {
    movies
        .lock()
        .map_err(|_| CatalogError::Unknown("store lock poisoned".into()))
}

async fn after_delay<T, F>(delay: Duration, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let task = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        op()
    });

    match task.await {
        Ok(result) => result,
        Err(e) => Err(CatalogError::Unknown(format!("store task failed: {}", e))),
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Movie>> {
        let movies = Arc::clone(&self.movies);
        after_delay(self.latency.fetch, move || {
            let snapshot = lock(&movies)?.clone();
            debug!(count = snapshot.len(), "fetched all movies");
            Ok(snapshot)
        })
        .await
    }

    async fn create(&self, draft: &MovieDraft) -> Result<Movie> {
        let movies = Arc::clone(&self.movies);
        let last_id = Arc::clone(&self.last_id);
        let draft = draft.clone();
        after_delay(self.latency.mutate, move || {
            let id = last_id
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
                .ok()
                .and_then(|last| last.checked_add(1))
                .map(MovieId)
                .ok_or_else(|| CatalogError::Unknown("movie ids exhausted".into()))?;
            let movie = draft.to_movie(id)?;
            lock(&movies)?.push(movie.clone());
            debug!(%id, title = %movie.title, "created movie");
            Ok(movie)
        })
        .await
    }

    async fn update(&self, id: MovieId, draft: &MovieDraft) -> Result<Movie> {
        let movies = Arc::clone(&self.movies);
        let draft = draft.clone();
        after_delay(self.latency.mutate, move || {
            let mut movies = lock(&movies)?;
            let movie = movies
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(CatalogError::NotFound(id))?;
            draft.apply_to(movie)?;
            debug!(%id, title = %movie.title, "updated movie");
            Ok(movie.clone())
        })
        .await
    }

    async fn remove(&self, id: MovieId) -> Result<()> {
        let movies = Arc::clone(&self.movies);
        after_delay(self.latency.mutate, move || {
            let mut movies = lock(&movies)?;
            let position = movies
                .iter()
                .position(|m| m.id == id)
                .ok_or(CatalogError::NotFound(id))?;
            movies.remove(position);
            debug!(%id, "removed movie");
            Ok(())
        })
        .await
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::seed::default_seed;

    /// Builds stores with no latency unless asked for.
    pub struct StoreFixture {
        movies: Vec<Movie>,
        latency: Latency,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                movies: Vec::new(),
                latency: Latency::none(),
            }
        }

        pub fn with_seed(mut self) -> Self {
            self.movies.extend(default_seed());
            self
        }

        pub fn with_movie(mut self, title: &str, genre: &str) -> Self {
            let id = MovieId(self.movies.iter().map(|m| m.id.0).max().unwrap_or(0) + 1);
            self.movies.push(Movie {
                id,
                title: title.to_string(),
                year: 2000,
                genre: genre.to_string(),
                rating: 7.0,
                duration: "100 min".to_string(),
                download_link: format!("https://example.com/{}.mp4", id),
                description: format!("About {}", title),
            });
            self
        }

        pub fn with_latency(mut self, latency: Latency) -> Self {
            self.latency = latency;
            self
        }

        pub fn movies(&self) -> &[Movie] {
            &self.movies
        }

        pub fn build(self) -> InMemoryStore {
            InMemoryStore::seeded(self.movies).with_latency(self.latency)
        }
    }

    pub fn sample_draft(title: &str) -> MovieDraft {
        MovieDraft {
            title: title.to_string(),
            year: "2023".to_string(),
            genre: "Drama".to_string(),
            rating: "7.5".to_string(),
            duration: "120 min".to_string(),
            download_link: "https://example.com/new.mp4".to_string(),
            description: format!("{} description", title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{sample_draft, StoreFixture};
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn fetch_all_returns_copy_after_latency() {
        let store = StoreFixture::new()
            .with_seed()
            .with_latency(Latency::default())
            .build();

        let started = Instant::now();
        let movies = store.fetch_all().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(movies.len(), 5);
        assert_eq!(movies[0].title, "Inception");
    }

    #[tokio::test(start_paused = true)]
    async fn mutations_wait_even_when_they_fail() {
        let store = StoreFixture::new()
            .with_latency(Latency::default())
            .build();

        let started = Instant::now();
        let result = store.remove(MovieId(99)).await;
        assert!(matches!(result, Err(CatalogError::NotFound(MovieId(99)))));
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn create_assigns_fresh_ids_after_seed() {
        let store = StoreFixture::new().with_seed().build();
        let a = store.create(&sample_draft("A")).await.unwrap();
        let b = store.create(&sample_draft("B")).await.unwrap();
        assert_eq!(a.id, MovieId(6));
        assert_eq!(b.id, MovieId(7));
        assert_eq!(store.len().unwrap(), 7);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_remove() {
        let store = InMemoryStore::new().with_latency(Latency::none());
        let first = store.create(&sample_draft("First")).await.unwrap();
        store.remove(first.id).await.unwrap();
        let second = store.create(&sample_draft("Second")).await.unwrap();
        assert_ne!(first.id, second.id);
        assert!(!store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn create_stops_when_ids_run_out() {
        let mut movie = crate::seed::default_seed().remove(0);
        movie.id = MovieId(u64::MAX - 1);
        let store = InMemoryStore::seeded(vec![movie]).with_latency(Latency::none());

        let last = store.create(&sample_draft("Last")).await.unwrap();
        assert_eq!(last.id, MovieId(u64::MAX));

        let result = store.create(&sample_draft("One too many")).await;
        assert!(matches!(result, Err(CatalogError::Unknown(_))));
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn len_reports_a_poisoned_lock() {
        let store = StoreFixture::new().with_seed().build();
        let movies = Arc::clone(&store.movies);
        let _ = std::thread::spawn(move || {
            let _guard = movies.lock().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(store.len(), Err(CatalogError::Unknown(_))));
        assert!(store.is_empty().is_err());
    }

    #[tokio::test]
    async fn create_rejects_unparseable_numbers_without_storing() {
        let store = StoreFixture::new().with_seed().build();
        let mut draft = sample_draft("Broken");
        draft.rating = "great".into();

        let result = store.create(&draft).await;
        assert!(matches!(
            result,
            Err(CatalogError::Validation { field: "rating", .. })
        ));
        assert_eq!(store.len().unwrap(), 5);
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let store = StoreFixture::new().with_seed().build();
        let mut draft = sample_draft("The Matrix Reloaded");
        draft.year = "2003".into();

        let updated = store.update(MovieId(2), &draft).await.unwrap();
        assert_eq!(updated.id, MovieId(2));
        assert_eq!(updated.year, 2003);

        let movies = store.fetch_all().await.unwrap();
        assert_eq!(movies[1].title, "The Matrix Reloaded");
        assert_eq!(movies.len(), 5);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = StoreFixture::new().with_seed().build();
        let before = store.fetch_all().await.unwrap();
        match store.update(MovieId(42), &sample_draft("X")).await {
            Err(CatalogError::NotFound(id)) => assert_eq!(id, MovieId(42)),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert_eq!(store.fetch_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn remove_drops_only_the_target() {
        let store = StoreFixture::new().with_seed().build();
        store.remove(MovieId(3)).await.unwrap();
        let ids: Vec<u64> = store
            .fetch_all()
            .await
            .unwrap()
            .iter()
            .map(|m| m.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
    }

    #[tokio::test]
    async fn clones_share_the_collection() {
        let store = StoreFixture::new().with_seed().build();
        let other = store.clone();
        other.remove(MovieId(1)).await.unwrap();
        assert_eq!(store.len().unwrap(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_mutation_still_applies() {
        let store = StoreFixture::new()
            .with_seed()
            .with_latency(Latency::default())
            .build();

        let gave_up =
            tokio::time::timeout(Duration::from_millis(100), store.remove(MovieId(1))).await;
        assert!(gave_up.is_err());
        assert_eq!(store.len().unwrap(), 5);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(store.len().unwrap(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_updates_are_not_serialized() {
        let store = StoreFixture::new()
            .with_seed()
            .with_latency(Latency::default())
            .build();

        let first = sample_draft("First writer");
        let second = sample_draft("Second writer");
        let started = Instant::now();
        let (a, b) = tokio::join!(
            store.update(MovieId(1), &first),
            store.update(MovieId(1), &second)
        );
        a.unwrap();
        b.unwrap();

        // Both slept in parallel rather than one after the other.
        assert!(started.elapsed() < Duration::from_millis(600));

        let movies = store.fetch_all().await.unwrap();
        assert_eq!(movies.len(), 5);
        assert!(movies[0].title == "First writer" || movies[0].title == "Second writer");
    }
}
