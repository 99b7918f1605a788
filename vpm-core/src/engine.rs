//! Ranking engine bound to an injected product store.

use std::sync::Arc;

use crate::error::Result;
use crate::product::{Product, Query, RankedProduct};
use crate::rank::rank_with;
use crate::score::{HashSeedScorer, SimilarityScorer};
use crate::store::ProductStore;

/// Scores and ranks the store's catalog for each query.
///
/// Each search reads one catalog snapshot and then runs the pure ranking
/// function over it. If the store read fails the error is returned as-is and
/// no ranking is attempted.
pub struct RankingEngine<S = HashSeedScorer> {
    store: Arc<dyn ProductStore>,
    scorer: S,
}

impl RankingEngine<HashSeedScorer> {
    /// Engine using the default hash/seed scorer.
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self::with_scorer(store, HashSeedScorer)
    }
}

impl<S: SimilarityScorer> RankingEngine<S> {
    pub fn with_scorer(store: Arc<dyn ProductStore>, scorer: S) -> Self {
        Self { store, scorer }
    }

    /// The underlying product store
    pub fn store(&self) -> &Arc<dyn ProductStore> {
        &self.store
    }

    /// Full catalog, ordered by id ascending.
    pub async fn products(&self) -> Result<Vec<Product>> {
        self.store.list_products().await
    }

    /// Rank the catalog against `query`.
    pub async fn search(&self, query: &Query) -> Result<Vec<RankedProduct>> {
        let products = self.store.list_products().await?;
        let ranked = rank_with(
            &self.scorer,
            &query.image_url,
            &products,
            query.top_k,
            query.min_score,
        );

        tracing::debug!(
            image_url = %query.image_url,
            top_k = query.top_k,
            min_score = query.min_score,
            candidates = products.len(),
            results = ranked.len(),
            "Ranked catalog"
        );

        Ok(ranked)
    }
}

impl<S> std::fmt::Debug for RankingEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field("store", &self.store.backend_name())
            .finish()
    }
}
