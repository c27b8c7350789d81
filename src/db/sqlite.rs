use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

use super::CorpusStore;

/// Creates a SQLite connection pool for the movie catalog.
///
/// The catalog is produced out-of-band by the ingestion script, so a missing
/// database file is an error here rather than something to create silently.
pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Corpus store backed by the ingested SQLite catalog.
pub struct SqliteCorpusStore {
    pool: SqlitePool,
}

impl SqliteCorpusStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CorpusStore for SqliteCorpusStore {
    async fn load_movies(&self) -> AppResult<Vec<MovieRecord>> {
        // rowid order matches ingestion order, which the row-index arena
        // and the duplicate-title resolution both depend on.
        let movies = sqlx::query_as::<_, MovieRecord>(
            "SELECT id, title, overview, genre_ids, poster_path FROM movies ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(movies)
    }
}

/// Stand-in store used when the catalog could not be opened at startup.
///
/// Every load reports the original failure as `StoreUnavailable`, which
/// keeps the engine unfit and the query endpoints answering 503 instead of
/// crashing the process.
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CorpusStore for UnavailableStore {
    async fn load_movies(&self) -> AppResult<Vec<MovieRecord>> {
        Err(AppError::StoreUnavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        sqlx::query(
            "CREATE TABLE movies (
                id INTEGER,
                title TEXT,
                overview TEXT,
                genre_ids TEXT,
                release_date TEXT,
                vote_average REAL,
                poster_path TEXT
            )",
        )
        .execute(&pool)
        .await
        .expect("create movies table");
        pool
    }

    #[tokio::test]
    async fn test_load_movies_preserves_ingestion_order() {
        let pool = seeded_pool().await;
        for (id, title) in [(3i64, "Zulu"), (1, "Alpha"), (2, "Mango")] {
            sqlx::query("INSERT INTO movies (id, title) VALUES (?, ?)")
                .bind(id)
                .bind(title)
                .execute(&pool)
                .await
                .expect("insert row");
        }

        let store = SqliteCorpusStore::new(pool);
        let movies = store.load_movies().await.expect("load movies");

        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Zulu", "Alpha", "Mango"]);
    }

    #[tokio::test]
    async fn test_load_movies_tolerates_null_fields() {
        let pool = seeded_pool().await;
        sqlx::query("INSERT INTO movies (id, title) VALUES (1, 'Toy Story')")
            .execute(&pool)
            .await
            .expect("insert row");

        let store = SqliteCorpusStore::new(pool);
        let movies = store.load_movies().await.expect("load movies");

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].overview, None);
        assert_eq!(movies[0].genre_ids, None);
        assert_eq!(movies[0].poster_path, None);
    }

    #[tokio::test]
    async fn test_unavailable_store_reports_store_unavailable() {
        let store = UnavailableStore::new("no such file: data/movies.db");
        let err = store.load_movies().await.expect_err("must fail");
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_create_pool_rejects_missing_file() {
        let result = create_pool("sqlite:///nonexistent/dir/movies.db").await;
        assert!(result.is_err());
    }
}
