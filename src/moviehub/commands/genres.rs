use crate::commands::CmdResult;
use crate::controller::CatalogController;
use crate::error::Result;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(controller: &CatalogController<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_genres(controller.distinct_genres()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_seed;
    use crate::store::memory::fixtures::StoreFixture;

    #[tokio::test]
    async fn lists_seed_genres() {
        let store = StoreFixture::new().with_seed().build();
        let controller = CatalogController::connect(store, &default_seed()).await;

        let result = run(&controller).unwrap();
        assert_eq!(result.genres, vec!["All", "Action", "Drama", "Sci-Fi"]);
    }
}
