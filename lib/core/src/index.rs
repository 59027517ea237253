use crate::{Catalog, Error, FeatureVector, PlayerSeason, Result, SeasonKey};
use ahash::AHashSet;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::sync::Arc;

/// Candidate pool multiplier applied to `k` before de-duplicating players
pub const DEFAULT_OVERSAMPLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// Cosine similarity; zero vectors score 0.0 against everything
    #[default]
    Cosine,
    /// Negative L2 distance, so larger is still more similar
    Euclidean,
    Dot,
}

/// Configuration for a similarity index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    pub distance: Distance,
    pub oversample: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            distance: Distance::Cosine,
            oversample: DEFAULT_OVERSAMPLE,
        }
    }
}

/// A ranked query hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSeason {
    pub season: PlayerSeason,
    pub score: f32,
}

/// Exact nearest-neighbour index over a [`Catalog`]
///
/// The index never changes after [`SimilarityIndex::build`], so a single
/// instance can be shared across threads and queried without locking.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    catalog: Arc<Catalog>,
    config: IndexConfig,
    norms: Vec<f32>,
}

impl SimilarityIndex {
    pub fn build(catalog: Arc<Catalog>, config: IndexConfig) -> Result<Self> {
        if config.oversample == 0 {
            return Err(Error::InvalidConfig("oversample must be at least 1".to_string()));
        }

        let norms = catalog
            .entries()
            .par_iter()
            .map(|entry| entry.vector.norm())
            .collect();

        tracing::debug!(
            seasons = catalog.len(),
            dim = catalog.dim(),
            distance = ?config.distance,
            "similarity index built"
        );

        Ok(Self {
            catalog,
            config,
            norms,
        })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> IndexConfig {
        self.config
    }

    pub fn dim(&self) -> usize {
        self.catalog.dim()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Feature vector of a catalogued season, for "more like this" queries
    pub fn lookup(&self, key: &SeasonKey) -> Option<&FeatureVector> {
        self.catalog.vector(key)
    }

    pub fn get(&self, key: &SeasonKey) -> Option<&PlayerSeason> {
        self.catalog.get(key)
    }

    /// Query with the vector of an existing season. `None` if the key is not catalogued.
    pub fn query_by_key(&self, key: &SeasonKey, k: usize) -> Result<Option<Vec<ScoredSeason>>> {
        match self.lookup(key) {
            Some(vector) => self.query(vector, k).map(Some),
            None => Ok(None),
        }
    }

    /// Return up to `k` most similar seasons, at most one per player
    ///
    /// Ranking is by score descending, ties broken by catalog insertion order.
    /// Each player is represented by their best-ranked season. Fewer than `k`
    /// results are returned only when the catalog has fewer distinct players.
    pub fn query(&self, query: &FeatureVector, k: usize) -> Result<Vec<ScoredSeason>> {
        if query.dim() != self.dim() {
            return Err(Error::InvalidDimension {
                expected: self.dim(),
                actual: query.dim(),
            });
        }

        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let query_norm = query.norm();
        let mut scored: Vec<(usize, f32)> = self
            .catalog
            .entries()
            .par_iter()
            .zip(self.norms.par_iter())
            .enumerate()
            .map(|(idx, (entry, &norm))| (idx, self.score(query, query_norm, &entry.vector, norm)))
            .collect();

        let pool = k.saturating_mul(self.config.oversample).min(scored.len());
        if pool < scored.len() {
            scored.select_nth_unstable_by_key(pool, rank_key);
        }
        scored[..pool].sort_unstable_by_key(rank_key);

        let capacity = k.min(self.len());
        let mut results = Vec::with_capacity(capacity);
        let mut seen = AHashSet::with_capacity(capacity);
        self.collect_distinct(&scored[..pool], k, &mut seen, &mut results);

        if results.len() < k && pool < scored.len() {
            // The oversampled pool was exhausted by repeat players; every entry
            // past the pool ranks below it, so sorting the rest extends the ranking.
            tracing::debug!(
                k,
                pool,
                found = results.len(),
                "candidate pool exhausted, scanning remaining ranking"
            );
            let rest = &mut scored[pool..];
            rest.sort_unstable_by_key(rank_key);
            self.collect_distinct(rest, k, &mut seen, &mut results);
        }

        Ok(results)
    }

    fn collect_distinct(
        &self,
        ranked: &[(usize, f32)],
        k: usize,
        seen: &mut AHashSet<u64>,
        results: &mut Vec<ScoredSeason>,
    ) {
        let entries = self.catalog.entries();
        for &(idx, score) in ranked {
            if results.len() >= k {
                break;
            }
            let season = &entries[idx].season;
            if seen.insert(season.player_id()) {
                results.push(ScoredSeason {
                    season: season.clone(),
                    score,
                });
            }
        }
    }

    #[inline]
    fn score(
        &self,
        query: &FeatureVector,
        query_norm: f32,
        vector: &FeatureVector,
        norm: f32,
    ) -> f32 {
        let score = match self.config.distance {
            Distance::Cosine => {
                if query_norm == 0.0 || norm == 0.0 {
                    0.0
                } else {
                    query.dot(vector) / (query_norm * norm)
                }
            }
            Distance::Euclidean => -query.l2_distance(vector),
            Distance::Dot => query.dot(vector),
        };

        if score.is_nan() {
            f32::NEG_INFINITY
        } else {
            score
        }
    }
}

/// Total ranking order: best score first, then catalog position
#[inline]
fn rank_key(&(idx, score): &(usize, f32)) -> (Reverse<OrderedFloat<f32>>, usize) {
    (Reverse(OrderedFloat(score)), idx)
}
