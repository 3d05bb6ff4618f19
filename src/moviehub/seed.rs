//! Initial catalog contents.
//!
//! The seed is configuration data: the built-in five movies, or a JSON array of
//! movies (same field names as [`Movie`] serializes to) read from a file.

use crate::error::{CatalogError, Result};
use crate::model::{Movie, MovieId};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub fn default_seed() -> Vec<Movie> {
    vec![
        Movie {
            id: MovieId(1),
            title: "Inception".into(),
            year: 2010,
            genre: "Sci-Fi".into(),
            rating: 8.8,
            duration: "148 min".into(),
            download_link: "https://pixeldrain.dev/api/file/hphCNT4u".into(),
            description: "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea into the mind of a C.E.O.".into(),
        },
        Movie {
            id: MovieId(2),
            title: "The Matrix".into(),
            year: 1999,
            genre: "Sci-Fi".into(),
            rating: 8.7,
            duration: "136 min".into(),
            download_link: "https://file-examples.com/storage/fe2c98031e626e27303f260/2017/04/file_example_MP4_1920_1_8MB.mp4".into(),
            description: "A computer hacker learns from mysterious rebels about the true nature of his reality and his role in the war against its controllers.".into(),
        },
        Movie {
            id: MovieId(3),
            title: "The Dark Knight".into(),
            year: 2008,
            genre: "Action".into(),
            rating: 9.0,
            duration: "152 min".into(),
            download_link: "https://file-examples.com/storage/fe2c98031e626e27303f260/2017/04/file_example_MP4_1280_1_2MB.mp4".into(),
            description: "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests of his ability to fight injustice.".into(),
        },
        Movie {
            id: MovieId(4),
            title: "Interstellar".into(),
            year: 2014,
            genre: "Sci-Fi".into(),
            rating: 8.6,
            duration: "169 min".into(),
            download_link: "https://file-examples.com/storage/fe2c98031e626e27303f260/2017/04/file_example_MP4_640_30_4_1MB.mp4".into(),
            description: "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.".into(),
        },
        Movie {
            id: MovieId(5),
            title: "Forrest Gump".into(),
            year: 1994,
            genre: "Drama".into(),
            rating: 8.8,
            duration: "142 min".into(),
            download_link: "https://file-examples.com/storage/fe2c98031e626e27303f260/2017/04/file_example_MP4_480_1_5MG.mp4".into(),
            description: "The presidencies of Kennedy and Johnson, the Vietnam War, the Watergate scandal and other historical events unfold from the perspective of an Alabama man with an IQ of 75.".into(),
        },
    ]
}

/// Reads a seed file. Duplicate ids are rejected since the store relies on
/// them being unique, and so is `u64::MAX`, which would leave no id for new
/// movies.
pub fn load_seed_file<P: AsRef<Path>>(path: P) -> Result<Vec<Movie>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(CatalogError::Io)?;
    let movies: Vec<Movie> = serde_json::from_str(&content).map_err(CatalogError::Serialization)?;

    let mut seen = HashSet::new();
    for movie in &movies {
        if movie.id.0 == u64::MAX {
            return Err(CatalogError::Store(format!(
                "Movie id {} in {} is too large",
                movie.id,
                path.display()
            )));
        }
        if !seen.insert(movie.id) {
            return Err(CatalogError::Store(format!(
                "Duplicate movie id {} in {}",
                movie.id,
                path.display()
            )));
        }
    }

    tracing::debug!(path = %path.display(), count = movies.len(), "loaded seed file");
    Ok(movies)
}

/// The seed from `path` when given, the built-in catalog otherwise.
pub fn load_seed(path: Option<&Path>) -> Result<Vec<Movie>> {
    match path {
        Some(path) => load_seed_file(path),
        None => Ok(default_seed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_has_unique_ids_in_order() {
        let seed = default_seed();
        let ids: Vec<u64> = seed.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn loads_seed_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        let movies = default_seed()[..2].to_vec();
        fs::write(&path, serde_json::to_string_pretty(&movies).unwrap()).unwrap();

        let loaded = load_seed(Some(&path)).unwrap();
        assert_eq!(loaded, movies);
    }

    #[test]
    fn accepts_camel_case_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        fs::write(
            &path,
            r#"[{"id": 10, "title": "Heat", "year": 1995, "genre": "Crime", "rating": 8.3,
                "duration": "170 min", "downloadLink": "https://example.com/heat.mp4",
                "description": "Cops and robbers."}]"#,
        )
        .unwrap();

        let loaded = load_seed_file(&path).unwrap();
        assert_eq!(loaded[0].id, MovieId(10));
        assert_eq!(loaded[0].download_link, "https://example.com/heat.mp4");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        let mut movies = default_seed();
        movies[1].id = MovieId(1);
        fs::write(&path, serde_json::to_string(&movies).unwrap()).unwrap();

        assert!(matches!(load_seed_file(&path), Err(CatalogError::Store(_))));
    }

    #[test]
    fn rejects_id_that_exhausts_the_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.json");
        let mut movies = default_seed();
        movies[4].id = MovieId(u64::MAX);
        fs::write(&path, serde_json::to_string(&movies).unwrap()).unwrap();

        match load_seed_file(&path) {
            Err(CatalogError::Store(msg)) => assert!(msg.contains("too large")),
            other => panic!("Expected Store error, got {:?}", other),
        }

        movies[4].id = MovieId(u64::MAX - 1);
        fs::write(&path, serde_json::to_string(&movies).unwrap()).unwrap();
        assert!(load_seed_file(&path).is_ok());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_seed_file(dir.path().join("nope.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
