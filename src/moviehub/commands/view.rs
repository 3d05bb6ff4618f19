use crate::commands::CmdResult;
use crate::controller::CatalogController;
use crate::error::{CatalogError, Result};
use crate::model::MovieId;
use crate::store::RecordStore;

/// Detail view of one movie from the current snapshot.
pub fn run<S: RecordStore>(controller: &CatalogController<S>, id: MovieId) -> Result<CmdResult> {
    let movie = controller
        .find(id)
        .cloned()
        .ok_or(CatalogError::NotFound(id))?;
    Ok(CmdResult::default().with_listed_movies(vec![movie]))
}
