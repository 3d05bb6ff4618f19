use crate::commands::{CmdMessage, CmdResult, MovieQuery};
use crate::controller::{CatalogController, LoadState};
use crate::error::Result;
use crate::filter::sort_movies;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(
    controller: &CatalogController<S>,
    query: &MovieQuery,
) -> Result<CmdResult> {
    let mut listed = controller.filtered_view(&query.search, &query.genre);
    if let Some((key, order)) = query.sort {
        listed = sort_movies(&listed, key, order);
    }

    let mut result = CmdResult::default().with_listed_movies(listed);

    if let LoadState::Failed(reason) = controller.state() {
        result.add_message(CmdMessage::error(format!(
            "Failed to load movies: {}",
            reason
        )));
    } else if let Some(error) = controller.error() {
        result.add_message(CmdMessage::warning(error.to_string()));
    }

    Ok(result)
}
