//! Player name directory
//!
//! Maps display names to player ids. Names are unique keys: when two players
//! share a name, the lower-scoring one is keyed as `"Name (player_id)"`.

use ahash::{AHashMap, AHashSet};
use hoopsim_core::{Catalog, PlayerId};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

/// Share of the scoring ranking whose weight is squared
const TOP_SHARE: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameEntry {
    pub name: String,
    pub player_id: PlayerId,
    /// Seasons in the catalog, squared for top scorers
    pub weight: f64,
}

#[derive(Debug, Clone, Default)]
pub struct NameDirectory {
    entries: Vec<NameEntry>,
    by_name: AHashMap<String, usize>,
}

impl NameDirectory {
    /// Build from a catalog, ordering players by their best points season
    pub fn build(catalog: &Catalog) -> Self {
        let mut seasons: Vec<_> = catalog.iter().collect();
        seasons.sort_by(|a, b| {
            let a = a.stats.pts.unwrap_or(f32::NEG_INFINITY);
            let b = b.stats.pts.unwrap_or(f32::NEG_INFINITY);
            b.total_cmp(&a)
        });

        let mut season_counts: AHashMap<PlayerId, usize> = AHashMap::new();
        for season in catalog.iter() {
            *season_counts.entry(season.player_id()).or_default() += 1;
        }

        let mut seen = AHashSet::new();
        let ranked: Vec<(PlayerId, &str)> = seasons
            .iter()
            .map(|s| (s.player_id(), s.name.as_str()))
            .filter(|pair| seen.insert(*pair))
            .collect();

        let total = ranked.len();
        let mut directory = Self::default();
        for (rank, (player_id, name)) in ranked.into_iter().enumerate() {
            let mut key = name.to_string();
            if directory.by_name.contains_key(&key) {
                key = format!("{} ({})", name, player_id);
            }
            if directory.by_name.contains_key(&key) {
                continue;
            }

            let exponent = if (total - rank) as f64 / total as f64 >= TOP_SHARE { 2 } else { 1 };
            let seasons = season_counts.get(&player_id).copied().unwrap_or(0) as f64;

            directory.by_name.insert(key.clone(), directory.entries.len());
            directory.entries.push(NameEntry {
                name: key,
                player_id,
                weight: seasons.powi(exponent),
            });
        }

        directory
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&NameEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn resolve(&self, name: &str) -> Option<PlayerId> {
        self.get(name).map(|entry| entry.player_id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All names, alphabetically
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Names containing `needle`, case-insensitive, alphabetically
    pub fn search(&self, needle: &str) -> Vec<&str> {
        let needle = needle.to_lowercase();
        self.names()
            .into_iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Pick a name with probability proportional to its weight
    pub fn choose_weighted<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&NameEntry> {
        self.entries.choose_weighted(rng, |entry| entry.weight).ok()
    }
}
