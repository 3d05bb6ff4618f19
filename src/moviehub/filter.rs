//! Pure derivations over a list of movies.
//!
//! Nothing here mutates its input. Filtering keeps the input order; only
//! [`sort_movies`] reorders, and it returns a copy.

use crate::model::Movie;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// Genre label that matches every movie.
pub const ALL_GENRES: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenreFilter {
    #[default]
    All,
    Named(String),
}

impl GenreFilter {
    pub fn matches(&self, genre: &str) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Named(name) => name == genre,
        }
    }
}

impl From<&str> for GenreFilter {
    fn from(value: &str) -> Self {
        if value == ALL_GENRES {
            GenreFilter::All
        } else {
            GenreFilter::Named(value.to_string())
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => write!(f, "{}", ALL_GENRES),
            GenreFilter::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Case-insensitive substring match on title or description, plus genre.
/// An empty search term matches everything.
pub fn matches(movie: &Movie, search: &str, genre: &GenreFilter) -> bool {
    if !genre.matches(&movie.genre) {
        return false;
    }
    if search.is_empty() {
        return true;
    }

    let term = search.to_lowercase();
    movie.title.to_lowercase().contains(&term) || movie.description.to_lowercase().contains(&term)
}

pub fn filter_movies(movies: &[Movie], search: &str, genre: &GenreFilter) -> Vec<Movie> {
    movies
        .iter()
        .filter(|m| matches(m, search, genre))
        .cloned()
        .collect()
}

/// `"All"` followed by the sorted, deduplicated genres of `movies`.
pub fn distinct_genres(movies: &[Movie]) -> Vec<String> {
    let unique: BTreeSet<&str> = movies.iter().map(|m| m.genre.as_str()).collect();
    std::iter::once(ALL_GENRES.to_string())
        .chain(unique.into_iter().map(str::to_string))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Title,
    Year,
    Rating,
    Genre,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sorted copy of `movies`. Text keys compare case-insensitively; ties keep
/// their original order.
pub fn sort_movies(movies: &[Movie], key: SortKey, order: SortOrder) -> Vec<Movie> {
    let mut sorted = movies.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare_by(a, b, key);
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    sorted
}

fn compare_by(a: &Movie, b: &Movie, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Genre => a.genre.to_lowercase().cmp(&b.genre.to_lowercase()),
        SortKey::Year => a.year.cmp(&b.year),
        SortKey::Rating => a.rating.total_cmp(&b.rating),
    }
}
