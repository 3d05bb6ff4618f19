use crate::commands::{CmdMessage, CmdResult, MOVIE_UPDATED};
use crate::controller::CatalogController;
use crate::error::{CatalogError, Result};
use crate::model::{MovieDraft, MovieId};
use crate::store::RecordStore;
use crate::validation::validate_draft;

pub async fn run<S: RecordStore>(
    controller: &mut CatalogController<S>,
    id: MovieId,
    draft: &MovieDraft,
    current_year: i32,
) -> Result<CmdResult> {
    validate_draft(draft, current_year).map_err(CatalogError::InvalidDraft)?;

    let movie = controller.update(id, draft).await?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} ({}): {}",
        MOVIE_UPDATED, movie.id, movie.title
    )));
    Ok(result.with_affected_movies(vec![movie]))
}
