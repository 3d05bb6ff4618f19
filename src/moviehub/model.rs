use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Store-assigned identifier of a movie. Never reused within one store.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for MovieId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(MovieId)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub rating: f64,
    // Free text as entered, e.g. "148 min"
    pub duration: String,
    pub download_link: String,
    pub description: String,
}

impl Movie {
    /// A draft pre-filled with this movie's fields, as an edit form starts out.
    pub fn to_draft(&self) -> MovieDraft {
        MovieDraft {
            title: self.title.clone(),
            year: self.year.to_string(),
            genre: self.genre.clone(),
            rating: self.rating.to_string(),
            duration: self.duration.clone(),
            download_link: self.download_link.clone(),
            description: self.description.clone(),
        }
    }

    /// Duration for display. Bare minute counts ("148") are expanded, anything
    /// else is shown as entered.
    pub fn display_duration(&self) -> String {
        match self.duration.trim().parse::<u32>() {
            Ok(minutes) => format_minutes(minutes),
            Err(_) => self.duration.clone(),
        }
    }
}

/// Unsaved form input for a movie. `year` and `rating` are raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub title: String,
    pub year: String,
    pub genre: String,
    pub rating: String,
    pub duration: String,
    pub download_link: String,
    pub description: String,
}

impl MovieDraft {
    pub fn parse_year(&self) -> Result<i32> {
        self.year
            .trim()
            .parse()
            .map_err(|_| CatalogError::Validation {
                field: "year",
                value: self.year.clone(),
            })
    }

    /// Parses the rating. `NaN` and infinities are rejected even though
    /// `f64::from_str` accepts them.
    pub fn parse_rating(&self) -> Result<f64> {
        match self.rating.trim().parse::<f64>() {
            Ok(rating) if rating.is_finite() => Ok(rating),
            _ => Err(CatalogError::Validation {
                field: "rating",
                value: self.rating.clone(),
            }),
        }
    }

    pub fn to_movie(&self, id: MovieId) -> Result<Movie> {
        Ok(Movie {
            id,
            title: self.title.clone(),
            year: self.parse_year()?,
            genre: self.genre.clone(),
            rating: self.parse_rating()?,
            duration: self.duration.clone(),
            download_link: self.download_link.clone(),
            description: self.description.clone(),
        })
    }

    /// Writes every draft field over `movie`, keeping its id. Nothing is
    /// written when a numeric field fails to parse.
    pub fn apply_to(&self, movie: &mut Movie) -> Result<()> {
        let updated = self.to_movie(movie.id)?;
        *movie = updated;
        Ok(())
    }
}

pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{} min", mins)
    }
}
