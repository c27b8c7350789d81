//! Text normalization and composite feature building.
//!
//! Each movie is compared through a single "feature soup": its title,
//! overview, and genre-id string concatenated and normalized. The
//! normalization is deliberately blunt (lower-case, ASCII letters/digits/
//! whitespace only) so that the vectorizer sees a uniform token stream.

use crate::models::MovieRecord;

/// Normalizes raw catalog text for vectorization.
///
/// Lower-cases the input, then keeps only ASCII letters, ASCII digits, and
/// whitespace. Accented characters and symbols are dropped, not folded.
/// Idempotent: applying it twice yields the same string.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Builds the normalized composite feature text for one record.
///
/// Missing overview/genre fields become empty strings before concatenation,
/// so a sparse record still produces a usable (possibly short) document.
pub fn composite_text(movie: &MovieRecord) -> String {
    let overview = movie.overview.as_deref().unwrap_or_default();
    let genre_ids = movie.genre_ids.as_deref().unwrap_or_default();

    normalize(&format!("{} {} {}", movie.title, overview, genre_ids))
}

/// Builds composite feature texts for the whole corpus, in corpus order.
pub fn composite_corpus(movies: &[MovieRecord]) -> Vec<String> {
    movies.iter().map(composite_text).collect()
}
