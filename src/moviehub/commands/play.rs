use crate::commands::{CmdMessage, CmdResult};
use crate::controller::CatalogController;
use crate::error::{CatalogError, Result};
use crate::model::MovieId;
use crate::store::RecordStore;

/// Resolves what a player needs for one movie. The movie comes back in
/// `affected_movies`; its `download_link` is the stream source.
pub fn run<S: RecordStore>(controller: &CatalogController<S>, id: MovieId) -> Result<CmdResult> {
    let movie = controller
        .find(id)
        .cloned()
        .ok_or(CatalogError::NotFound(id))?;

    let mut result = CmdResult::default();
    if movie.download_link.trim().is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "{} has no playback link",
            movie.title
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Now playing: {} ({})",
            movie.title, movie.year
        )));
    }
    Ok(result.with_affected_movies(vec![movie]))
}
