use crate::{error::AppResult, models::MovieRecord};

pub mod sqlite;

pub use sqlite::create_pool;
pub use sqlite::SqliteCorpusStore;
pub use sqlite::UnavailableStore;

/// Read-side abstraction over the persisted movie catalog.
///
/// The engine only ever needs one operation: load the full corpus in
/// storage order. Keeping it behind a trait lets tests swap in a mocked
/// store and keeps the engine independent of where the catalog lives.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CorpusStore: Send + Sync {
    /// Load every movie record, ordered as ingested.
    async fn load_movies(&self) -> AppResult<Vec<MovieRecord>>;
}
