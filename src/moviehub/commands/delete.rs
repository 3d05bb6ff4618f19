use crate::commands::{CmdMessage, CmdResult, MOVIE_DELETED};
use crate::controller::CatalogController;
use crate::error::Result;
use crate::model::MovieId;
use crate::store::RecordStore;

pub async fn run<S: RecordStore>(
    controller: &mut CatalogController<S>,
    id: MovieId,
) -> Result<CmdResult> {
    // Captured before removal so the message can name it.
    let removed = controller.find(id).cloned();

    controller.remove(id).await?;

    let mut result = CmdResult::default();
    let message = match &removed {
        Some(movie) => format!("{} ({}): {}", MOVIE_DELETED, id, movie.title),
        None => format!("{} ({})", MOVIE_DELETED, id),
    };
    result.add_message(CmdMessage::success(message));
    Ok(result.with_affected_movies(removed.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::seed::default_seed;
    use crate::store::memory::fixtures::StoreFixture;

    #[tokio::test]
    async fn deletes_and_names_the_movie() {
        let store = StoreFixture::new().with_seed().build();
        let mut controller = CatalogController::connect(store, &default_seed()).await;

        let result = run(&mut controller, MovieId(3)).await.unwrap();
        assert_eq!(result.affected_movies[0].title, "The Dark Knight");
        assert_eq!(
            result.messages[0].content,
            "Movie deleted successfully! (3): The Dark Knight"
        );
        assert_eq!(controller.movies().len(), 4);
    }

    #[tokio::test]
    async fn deleting_twice_fails_the_second_time() {
        let store = StoreFixture::new().with_seed().build();
        let mut controller = CatalogController::connect(store, &default_seed()).await;

        run(&mut controller, MovieId(3)).await.unwrap();
        let again = run(&mut controller, MovieId(3)).await;
        assert!(matches!(again, Err(CatalogError::NotFound(MovieId(3)))));
        assert_eq!(controller.movies().len(), 4);
    }
}
