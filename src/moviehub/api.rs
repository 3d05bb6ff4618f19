//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for catalog operations, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (id text to [`MovieId`], genre text to [`GenreFilter`])
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs` and the controller
//! - **Authorization**: whether a caller may add, edit or delete is decided by
//!   the UI. Anyone holding a `CatalogApi` can call every method.
//! - **Presentation**: returns data, not strings for a terminal
//!
//! ## Generic Over RecordStore
//!
//! `CatalogApi<S: RecordStore>` works with any backend; the binary uses
//! `InMemoryStore`, tests can plug in failing stores.

use crate::commands;
use crate::controller::CatalogController;
use crate::error::{CatalogError, Result};
use crate::model::{MovieDraft, MovieId};
use crate::store::RecordStore;
use chrono::Datelike;
use std::path::{Path, PathBuf};

pub struct CatalogApi<S: RecordStore> {
    controller: CatalogController<S>,
    config_dir: PathBuf,
}

impl<S: RecordStore> CatalogApi<S> {
    pub fn new(controller: CatalogController<S>, config_dir: PathBuf) -> Self {
        Self {
            controller,
            config_dir,
        }
    }

    pub fn list_movies(&self, query: &MovieQuery) -> Result<CmdResult> {
        commands::list::run(&self.controller, query)
    }

    pub fn view_movie(&self, id: &str) -> Result<CmdResult> {
        commands::view::run(&self.controller, parse_id(id)?)
    }

    pub fn genres(&self) -> Result<CmdResult> {
        commands::genres::run(&self.controller)
    }

    pub fn play_movie(&self, id: &str) -> Result<CmdResult> {
        commands::play::run(&self.controller, parse_id(id)?)
    }

    pub async fn add_movie(&mut self, draft: &MovieDraft) -> Result<CmdResult> {
        commands::add::run(&mut self.controller, draft, current_year()).await
    }

    /// The draft an edit form for `id` starts from.
    pub fn edit_draft(&self, id: &str) -> Result<MovieDraft> {
        let id = parse_id(id)?;
        self.controller
            .find(id)
            .map(|m| m.to_draft())
            .ok_or(CatalogError::NotFound(id))
    }

    pub async fn update_movie(&mut self, id: &str, draft: &MovieDraft) -> Result<CmdResult> {
        let id = parse_id(id)?;
        commands::update::run(&mut self.controller, id, draft, current_year()).await
    }

    pub async fn delete_movie(&mut self, id: &str) -> Result<CmdResult> {
        let id = parse_id(id)?;
        commands::delete::run(&mut self.controller, id).await
    }

    /// Fetch the catalog again, replacing the snapshot.
    pub async fn reload(&mut self) -> Result<()> {
        self.controller.load().await
    }

    pub fn current_error(&self) -> Option<&str> {
        self.controller.error()
    }

    pub fn clear_error(&mut self) {
        self.controller.clear_error()
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn controller(&self) -> &CatalogController<S> {
        &self.controller
    }
}

fn parse_id(input: &str) -> Result<MovieId> {
    input
        .parse()
        .map_err(|_| CatalogError::Api(format!("Invalid movie id: {}", input)))
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, MovieQuery};
pub use crate::filter::{GenreFilter, SortKey, SortOrder};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_seed;
    use crate::store::memory::fixtures::{sample_draft, StoreFixture};
    use crate::store::memory::InMemoryStore;

    async fn api() -> (CatalogApi<InMemoryStore>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = StoreFixture::new().with_seed().build();
        let controller = CatalogController::connect(store, &default_seed()).await;
        (CatalogApi::new(controller, dir.path().to_path_buf()), dir)
    }

    #[tokio::test]
    async fn list_dispatches_query() {
        let (api, _dir) = api().await;
        let result = api
            .list_movies(&MovieQuery::new("knight", "All"))
            .unwrap();
        assert_eq!(result.listed_movies.len(), 1);
        assert_eq!(result.listed_movies[0].title, "The Dark Knight");
    }

    #[tokio::test]
    async fn ids_are_parsed() {
        let (api, _dir) = api().await;
        assert_eq!(
            api.view_movie("4").unwrap().listed_movies[0].title,
            "Interstellar"
        );
        assert!(matches!(api.view_movie("four"), Err(CatalogError::Api(_))));
        assert!(matches!(
            api.view_movie("40"),
            Err(CatalogError::NotFound(MovieId(40)))
        ));
    }

    #[tokio::test]
    async fn edit_flow_round_trips() {
        let (mut api, _dir) = api().await;
        let mut draft = api.edit_draft("5").unwrap();
        assert_eq!(draft.year, "1994");
        draft.title = "Forrest Gump (Remastered)".into();

        let result = api.update_movie("5", &draft).await.unwrap();
        assert_eq!(result.affected_movies[0].title, "Forrest Gump (Remastered)");
        assert_eq!(api.controller().movies()[4].title, "Forrest Gump (Remastered)");
    }

    #[tokio::test]
    async fn add_and_delete_dispatch() {
        let (mut api, _dir) = api().await;
        let added = api.add_movie(&sample_draft("Aftersun")).await.unwrap();
        let id = added.affected_movies[0].id.to_string();

        api.delete_movie(&id).await.unwrap();
        assert_eq!(api.controller().movies().len(), 5);
    }

    #[tokio::test]
    async fn errors_can_be_dismissed() {
        let (mut api, _dir) = api().await;
        assert!(api.delete_movie("99").await.is_err());
        assert_eq!(api.current_error(), Some("Movie not found: 99"));
        api.clear_error();
        assert_eq!(api.current_error(), None);
    }

    #[tokio::test]
    async fn genres_dispatch() {
        let (api, _dir) = api().await;
        assert_eq!(api.genres().unwrap().genres.len(), 4);
    }

    #[tokio::test]
    async fn config_uses_api_dir() {
        let (api, dir) = api().await;
        api.config(ConfigAction::Set("fetch-latency".into(), "0".into()))
            .unwrap();
        assert!(dir.path().join("config.json").exists());
    }
}
