use crate::{Error, FeatureVector, PlayerId, PlayerSeason, Result, SeasonKey, StatSchema};
use ahash::AHashMap;

#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) season: PlayerSeason,
    pub(crate) vector: FeatureVector,
}

/// Collects player-seasons before freezing them into a [`Catalog`]
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    schema: StatSchema,
    entries: Vec<Entry>,
    positions: AHashMap<SeasonKey, usize>,
}

impl CatalogBuilder {
    pub fn new(schema: StatSchema) -> Self {
        Self {
            schema,
            entries: Vec::new(),
            positions: AHashMap::new(),
        }
    }

    pub fn schema(&self) -> &StatSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a season; its key must not already be present
    pub fn insert(&mut self, season: PlayerSeason) -> Result<()> {
        if self.positions.contains_key(&season.key) {
            return Err(Error::DuplicateSeason(season.key));
        }
        self.push(season);
        Ok(())
    }

    /// Add a season, replacing an existing one with the same key in place.
    /// Returns true if a season was replaced.
    pub fn upsert(&mut self, season: PlayerSeason) -> bool {
        match self.positions.get(&season.key) {
            Some(&pos) => {
                let vector = self.schema.vectorize(&season.stats);
                self.entries[pos] = Entry { season, vector };
                true
            }
            None => {
                self.push(season);
                false
            }
        }
    }

    fn push(&mut self, season: PlayerSeason) {
        let vector = self.schema.vectorize(&season.stats);
        self.positions.insert(season.key, self.entries.len());
        self.entries.push(Entry { season, vector });
    }

    pub fn build(self) -> Catalog {
        tracing::debug!(
            seasons = self.entries.len(),
            dim = self.schema.dim(),
            "catalog built"
        );
        Catalog {
            schema: self.schema,
            entries: self.entries,
            positions: self.positions,
        }
    }
}

/// Immutable, insertion-ordered collection of player-seasons and their vectors
#[derive(Debug, Clone)]
pub struct Catalog {
    schema: StatSchema,
    entries: Vec<Entry>,
    positions: AHashMap<SeasonKey, usize>,
}

impl Catalog {
    /// Build a catalog in one go, rejecting duplicate keys
    pub fn from_seasons<I>(schema: StatSchema, seasons: I) -> Result<Self>
    where
        I: IntoIterator<Item = PlayerSeason>,
    {
        let mut builder = CatalogBuilder::new(schema);
        for season in seasons {
            builder.insert(season)?;
        }
        Ok(builder.build())
    }

    pub fn schema(&self) -> &StatSchema {
        &self.schema
    }

    pub fn dim(&self) -> usize {
        self.schema.dim()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &SeasonKey) -> Option<&PlayerSeason> {
        self.position(key).map(|pos| &self.entries[pos].season)
    }

    /// Feature vector of a catalogued season
    pub fn vector(&self, key: &SeasonKey) -> Option<&FeatureVector> {
        self.position(key).map(|pos| &self.entries[pos].vector)
    }

    /// Seasons in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &PlayerSeason> {
        self.entries.iter().map(|entry| &entry.season)
    }

    /// All seasons of one player, in insertion order
    pub fn player_seasons(&self, player_id: PlayerId) -> impl Iterator<Item = &PlayerSeason> {
        self.iter().filter(move |season| season.player_id() == player_id)
    }

    pub(crate) fn position(&self, key: &SeasonKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }
}
