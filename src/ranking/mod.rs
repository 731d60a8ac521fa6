pub mod distance;
pub mod score;
pub mod text;

pub use distance::{distance, similarity};
pub use score::fuzzy_score;
pub use text::{normalize, tokens};

use crate::core::Movie;

/// Candidate with its transient sort keys; internal to `rank`
#[derive(Debug)]
struct RankedCandidate {
    movie: Movie,
    score: f64,
    rating: f64,
}

/// Re-rank one page of candidates for `query`.
///
/// Pure reordering: the output is a permutation of the input with unmodified
/// movies, sorted by fuzzy score descending, then rating descending. The sort
/// is stable, so full ties keep their input order.
pub fn rank(query: &str, candidates: &[Movie]) -> Vec<Movie> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|movie| RankedCandidate {
            score: fuzzy_score(query, &movie.title),
            rating: movie.rating(),
            movie: movie.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    ranked.into_iter().map(|r| r.movie).collect()
}
