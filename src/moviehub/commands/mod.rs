use crate::config::CatalogConfig;
use crate::filter::{GenreFilter, SortKey, SortOrder};
use crate::model::Movie;

pub mod add;
pub mod config;
pub mod delete;
pub mod genres;
pub mod list;
pub mod play;
pub mod update;
pub mod view;

pub const MOVIE_ADDED: &str = "Movie added successfully!";
pub const MOVIE_UPDATED: &str = "Movie updated successfully!";
pub const MOVIE_DELETED: &str = "Movie deleted successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_movies: Vec<Movie>,
    pub listed_movies: Vec<Movie>,
    pub genres: Vec<String>,
    pub config: Option<CatalogConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_movies(mut self, movies: Vec<Movie>) -> Self {
        self.affected_movies = movies;
        self
    }

    pub fn with_listed_movies(mut self, movies: Vec<Movie>) -> Self {
        self.listed_movies = movies;
        self
    }

    pub fn with_genres(mut self, genres: Vec<String>) -> Self {
        self.genres = genres;
        self
    }

    pub fn with_config(mut self, config: CatalogConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// What a list view asks for: the search box, the genre dropdown and an
/// optional sort.
#[derive(Debug, Clone, Default)]
pub struct MovieQuery {
    pub search: String,
    pub genre: GenreFilter,
    pub sort: Option<(SortKey, SortOrder)>,
}

impl MovieQuery {
    pub fn new(search: impl Into<String>, genre: impl Into<GenreFilter>) -> Self {
        Self {
            search: search.into(),
            genre: genre.into(),
            sort: None,
        }
    }

    pub fn sorted(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = Some((key, order));
        self
    }
}
