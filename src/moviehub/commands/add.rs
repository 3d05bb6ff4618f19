use crate::commands::{CmdMessage, CmdResult, MOVIE_ADDED};
use crate::controller::CatalogController;
use crate::error::{CatalogError, Result};
use crate::model::MovieDraft;
use crate::store::RecordStore;
use crate::validation::validate_draft;

pub async fn run<S: RecordStore>(
    controller: &mut CatalogController<S>,
    draft: &MovieDraft,
    current_year: i32,
) -> Result<CmdResult> {
    validate_draft(draft, current_year).map_err(CatalogError::InvalidDraft)?;

    let movie = controller.add(draft).await?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} ({}): {}",
        MOVIE_ADDED, movie.id, movie.title
    )));
    Ok(result.with_affected_movies(vec![movie]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_seed;
    use crate::store::memory::fixtures::{sample_draft, StoreFixture};

    #[tokio::test]
    async fn adds_valid_draft() {
        let store = StoreFixture::new().with_seed().build();
        let mut controller = CatalogController::connect(store, &default_seed()).await;

        let result = run(&mut controller, &sample_draft("Past Lives"), 2026)
            .await
            .unwrap();
        assert_eq!(result.affected_movies.len(), 1);
        assert_eq!(result.affected_movies[0].title, "Past Lives");
        assert_eq!(controller.movies().len(), 6);
        assert!(result.messages[0].content.starts_with(MOVIE_ADDED));
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_store() {
        let store = StoreFixture::new().with_seed().build();
        let mut controller = CatalogController::connect(store.clone(), &default_seed()).await;
        let mut draft = sample_draft("");
        draft.rating = "11".into();

        match run(&mut controller, &draft, 2026).await {
            Err(CatalogError::InvalidDraft(errors)) => {
                assert_eq!(
                    errors,
                    vec!["Title is required", "Rating must be between 0 and 10"]
                );
            }
            other => panic!("Expected InvalidDraft, got {:?}", other),
        }
        assert_eq!(store.len().unwrap(), 5);
        assert!(controller.error().is_none());
    }
}
