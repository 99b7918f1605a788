//! Threshold filtering and ranking.
//!
//! [`filter_min_score`] is the single threshold rule shared by server-side
//! ranking and client-side refinement (through the Wasm bindings), so the two
//! can never disagree about which results pass.

use std::cmp::Ordering;

use crate::product::{Product, RankedProduct, Scored};
use crate::score::{HashSeedScorer, SimilarityScorer};

/// Whether a score passes the threshold (inclusive).
pub fn meets_min_score(score: f64, min_score: f64) -> bool {
    score >= min_score
}

/// Keep the items whose similarity score is at least `min_score`.
///
/// Order is preserved; nothing is re-sorted.
pub fn filter_min_score<T, I>(items: I, min_score: f64) -> Vec<T>
where
    T: Scored,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .filter(|item| meets_min_score(item.similarity_score(), min_score))
        .collect()
}

/// Result ordering: score descending, then id ascending.
pub fn compare_ranked(a: &RankedProduct, b: &RankedProduct) -> Ordering {
    b.similarity_score
        .total_cmp(&a.similarity_score)
        .then_with(|| a.id.cmp(&b.id))
}

/// Rank `products` against `image_ref` with the default scorer.
pub fn rank(
    image_ref: &str,
    products: &[Product],
    top_k: usize,
    min_score: f64,
) -> Vec<RankedProduct> {
    rank_with(&HashSeedScorer, image_ref, products, top_k, min_score)
}

/// Rank `products` against `image_ref` with a custom scorer.
///
/// Every product is scored, results below `min_score` are dropped, the rest
/// are ordered by [`compare_ranked`] and truncated to `top_k`. An empty
/// catalog, an unreachable threshold or `top_k == 0` all yield an empty list.
pub fn rank_with<S>(
    scorer: &S,
    image_ref: &str,
    products: &[Product],
    top_k: usize,
    min_score: f64,
) -> Vec<RankedProduct>
where
    S: SimilarityScorer + ?Sized,
{
    if top_k == 0 {
        return Vec::new();
    }

    let scored = products
        .iter()
        .map(|product| RankedProduct::scored(product, scorer.score(image_ref, product)));

    let mut ranked = filter_min_score(scored, min_score);
    ranked.sort_by(compare_ranked);
    ranked.truncate(top_k);
    ranked
}
