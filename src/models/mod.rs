use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single catalog entry as persisted by the ingestion script.
///
/// Records are immutable once loaded: the engine keeps them in corpus order
/// and refers to them by row index everywhere else (title map, similarity
/// matrix). `overview`, `genre_ids`, and `poster_path` may be NULL in the
/// catalog and are substituted with empty strings during feature building.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct MovieRecord {
    /// TMDB movie id, unique within the catalog
    pub id: i64,
    /// Display title, also the query key (case-insensitive)
    pub title: String,
    /// Plot synopsis
    pub overview: Option<String>,
    /// Genre id list serialized as a string, e.g. "[16, 35]"
    pub genre_ids: Option<String>,
    /// Relative poster image path
    pub poster_path: Option<String>,
}

/// Minimal catalog entry returned by the titles listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogTitle {
    pub id: i64,
    pub title: String,
}

impl From<&MovieRecord> for CatalogTitle {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

/// One ranked recommendation produced by a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
}

impl From<&MovieRecord> for Recommendation {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            overview: movie.overview.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_from_record() {
        let record = MovieRecord {
            id: 603,
            title: "The Matrix".to_string(),
            overview: Some("A hacker discovers reality is simulated".to_string()),
            genre_ids: Some("[28, 878]".to_string()),
            poster_path: Some("/matrix.jpg".to_string()),
        };

        let recommendation = Recommendation::from(&record);
        assert_eq!(recommendation.id, 603);
        assert_eq!(recommendation.title, "The Matrix");
        assert_eq!(recommendation.poster_path.as_deref(), Some("/matrix.jpg"));
    }

    #[test]
    fn test_catalog_title_from_record_with_missing_fields() {
        let record = MovieRecord {
            id: 862,
            title: "Toy Story".to_string(),
            overview: None,
            genre_ids: None,
            poster_path: None,
        };

        let title = CatalogTitle::from(&record);
        assert_eq!(title.id, 862);
        assert_eq!(title.title, "Toy Story");
    }
}
