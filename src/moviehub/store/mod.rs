//! # Storage Layer
//!
//! The [`RecordStore`] trait is the contract between the catalog controller and
//! whatever holds the canonical movie collection. It is async because the
//! collection is assumed to live out of process; every call is a round trip.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: mock backend
//!   - Canonical collection held in memory, insertion order preserved
//!   - Sleeps for a configurable [`memory::Latency`] before each operation
//!   - Ids from a monotonic counter, never reused
//!
//! ## Contract
//!
//! - `fetch_all` returns a full copy; callers may keep it as their snapshot.
//! - `create` and `update` parse the draft's numeric fields and fail with
//!   `Validation` instead of storing a bad value.
//! - `update` and `remove` fail with `NotFound` for an unknown id and leave the
//!   collection untouched.
//! - Any other failure surfaces as `Unknown`.
//!
//! No operation is atomic with respect to concurrent callers.

use crate::error::Result;
use crate::model::{Movie, MovieDraft, MovieId};
use async_trait::async_trait;

pub mod memory;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Snapshot copy of every movie, in insertion order.
    async fn fetch_all(&self) -> Result<Vec<Movie>>;

    /// Appends a new movie built from `draft` and returns it.
    async fn create(&self, draft: &MovieDraft) -> Result<Movie>;

    /// Replaces every field but the id of movie `id`, in place.
    async fn update(&self, id: MovieId, draft: &MovieDraft) -> Result<Movie>;

    async fn remove(&self, id: MovieId) -> Result<()>;
}
