//! MovieMatch API: content-based movie recommendations.
//!
//! The engine fits a TF-IDF vector space over a SQLite movie catalog,
//! computes the full pairwise cosine-similarity matrix once, and answers
//! top-N "movies like this one" queries by title. A thin axum layer exposes
//! the engine over HTTP.

pub mod api;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
