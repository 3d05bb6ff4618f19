//! Form-level checks on a [`MovieDraft`] before it is submitted.
//!
//! The store only refuses numbers it cannot parse. These rules are stricter and
//! report every problem at once so a form can show them together.

use crate::model::MovieDraft;
use url::Url;

pub const MIN_YEAR: i32 = 1900;
/// How far past the current year a release year may be.
pub const FUTURE_YEARS: i32 = 5;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

pub fn validate_draft(draft: &MovieDraft, current_year: i32) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if draft.title.trim().is_empty() {
        errors.push("Title is required".to_string());
    }

    match draft.parse_year() {
        Ok(year) if (MIN_YEAR..=current_year + FUTURE_YEARS).contains(&year) => {}
        _ => errors.push("Please enter a valid year".to_string()),
    }

    if draft.genre.trim().is_empty() {
        errors.push("Genre is required".to_string());
    }

    match draft.parse_rating() {
        Ok(rating) if (MIN_RATING..=MAX_RATING).contains(&rating) => {}
        _ => errors.push("Rating must be between 0 and 10".to_string()),
    }

    if draft.duration.trim().is_empty() {
        errors.push("Duration is required".to_string());
    }

    let link = draft.download_link.trim();
    if link.is_empty() {
        errors.push("Download link is required".to_string());
    } else if Url::parse(link).is_err() {
        errors.push("Please enter a valid URL".to_string());
    }

    if draft.description.trim().is_empty() {
        errors.push("Description is required".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
