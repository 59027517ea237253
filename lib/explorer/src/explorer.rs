use crate::loader::{load_catalog, Category, LoadReport};
use crate::names::NameDirectory;
use crate::profile::PlayerProfile;
use crate::{Error, Result};
use hoopsim_core::{
    Catalog, IndexConfig, PlayerId, PlayerSeason, ScoredSeason, SeasonKey, SimilarityIndex,
    StatField, StatLine, StatSchema,
};
use parking_lot::RwLock;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_LIMIT: usize = 10;

/// Configuration for an explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplorerConfig {
    pub index: IndexConfig,
    pub limit: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            index: IndexConfig::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// A similarity hit ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarPlayer {
    #[serde(flatten)]
    pub season: PlayerSeason,
    pub score: f32,
    pub link: String,
}

impl From<ScoredSeason> for SimilarPlayer {
    fn from(scored: ScoredSeason) -> Self {
        let link = stats_link(scored.season.player_id());
        Self {
            season: scored.season,
            score: scored.score,
            link,
        }
    }
}

pub fn stats_link(player_id: PlayerId) -> String {
    format!("https://www.nba.com/stats/player/{}?PerMode=Totals", player_id)
}

/// Similar-season explorer over one category's catalog
///
/// The similarity index is built on first use and kept for the explorer's lifetime.
#[derive(Debug)]
pub struct Explorer {
    category: Category,
    catalog: Arc<Catalog>,
    names: NameDirectory,
    config: ExplorerConfig,
    index: RwLock<Option<Arc<SimilarityIndex>>>,
}

impl Explorer {
    pub fn new(category: Category, catalog: Catalog, config: ExplorerConfig) -> Self {
        let names = NameDirectory::build(&catalog);
        Self {
            category,
            catalog: Arc::new(catalog),
            names,
            config,
            index: RwLock::new(None),
        }
    }

    /// Load the category's CSV from `data_dir` over every stat field
    pub fn open(
        data_dir: impl AsRef<Path>,
        category: Category,
        config: ExplorerConfig,
    ) -> Result<(Self, LoadReport)> {
        let path = data_dir.as_ref().join(category.file_name());
        let (catalog, report) = load_catalog(path, category, StatSchema::all())?;
        Ok((Self::new(category, catalog, config), report))
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn names(&self) -> &NameDirectory {
        &self.names
    }

    pub fn config(&self) -> ExplorerConfig {
        self.config
    }

    /// The similarity index, building it on first call
    pub fn index(&self) -> Result<Arc<SimilarityIndex>> {
        if let Some(index) = self.index.read().as_ref() {
            return Ok(Arc::clone(index));
        }

        let mut slot = self.index.write();
        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(SimilarityIndex::build(Arc::clone(&self.catalog), self.config.index)?);
        *slot = Some(Arc::clone(&index));
        Ok(index)
    }

    pub fn profile(&self, name: &str) -> Option<PlayerProfile> {
        PlayerProfile::build(&self.catalog, &self.names, name)
    }

    /// Seasons most similar to a named player's season
    ///
    /// An unknown name or a season the player did not play yields no results.
    pub fn similar_to_season(
        &self,
        name: &str,
        season: u16,
        limit: usize,
    ) -> Result<Vec<SimilarPlayer>> {
        let Some(player_id) = self.names.resolve(name) else {
            debug!(player = name, "unknown player name");
            return Ok(Vec::new());
        };

        let key = SeasonKey::new(player_id, season);
        match self.index()?.query_by_key(&key, limit)? {
            Some(results) => Ok(results.into_iter().map(SimilarPlayer::from).collect()),
            None => {
                debug!(%key, "player-season not found");
                Ok(Vec::new())
            }
        }
    }

    /// Seasons most similar to a hand-entered stat line
    pub fn similar_to_stats(&self, stats: &StatLine, limit: usize) -> Result<Vec<SimilarPlayer>> {
        let query = self.catalog.schema().vectorize(stats);
        let results = self.index()?.query(&query, limit)?;
        Ok(results.into_iter().map(SimilarPlayer::from).collect())
    }
}

/// Parse `FIELD=VALUE` pairs into a stat line; unmentioned fields stay missing
pub fn parse_stat_line<'a, I>(pairs: I) -> Result<StatLine>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut line = StatLine::default();
    for pair in pairs {
        let (field, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::InvalidStat(format!("expected FIELD=VALUE, got '{}'", pair)))?;
        let field: StatField = field.parse()?;
        let value = value.trim();
        let value: f32 = value
            .parse()
            .map_err(|_| Error::InvalidStat(format!("'{}' is not a number for {}", value, field)))?;
        field.set(&mut line, Some(value));
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopsim_core::PlayerId;

    fn season(player_id: PlayerId, name: &str, year: u16, stats: [f32; 3]) -> PlayerSeason {
        let line = StatLine {
            gp: Some(stats[0]),
            ast: Some(stats[1]),
            pts: Some(stats[2]),
            ..StatLine::default()
        };
        PlayerSeason::new(SeasonKey::new(player_id, year), name, line)
    }

    fn explorer() -> Explorer {
        let schema = StatSchema::new(vec![StatField::Gp, StatField::Ast, StatField::Pts]).unwrap();
        let catalog = Catalog::from_seasons(
            schema,
            vec![
                season(1, "Point Guard", 2000, [80.0, 800.0, 1200.0]),
                season(1, "Point Guard", 2001, [80.0, 790.0, 1250.0]),
                season(2, "Scorer", 2000, [80.0, 200.0, 2400.0]),
                season(3, "Other Guard", 2000, [80.0, 700.0, 1100.0]),
            ],
        )
        .unwrap();
        Explorer::new(Category::Totals, catalog, ExplorerConfig::default())
    }

    #[test]
    fn test_index_is_memoized() {
        let explorer = explorer();
        let first = explorer.index().unwrap();
        let second = explorer.index().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_similar_to_season() {
        let explorer = explorer();
        let results = explorer.similar_to_season("Point Guard", 2000, 3).unwrap();

        let ids: Vec<PlayerId> = results.iter().map(|r| r.season.player_id()).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_eq!(results[0].season.season(), 2000);
        assert_eq!(results[0].link, "https://www.nba.com/stats/player/1?PerMode=Totals");
    }

    #[test]
    fn test_similar_to_unknown_is_empty() {
        let explorer = explorer();
        assert!(explorer.similar_to_season("Nobody", 2000, 3).unwrap().is_empty());
        assert!(explorer.similar_to_season("Scorer", 1990, 3).unwrap().is_empty());
    }

    #[test]
    fn test_similar_to_stats() {
        let explorer = explorer();
        let line = parse_stat_line(["GP=80", "PTS=2300", "ast=250"]).unwrap();
        let results = explorer.similar_to_stats(&line, 1).unwrap();
        assert_eq!(results[0].season.name, "Scorer");
    }

    #[test]
    fn test_parse_stat_line_errors() {
        assert!(matches!(parse_stat_line(["PTS"]), Err(Error::InvalidStat(_))));
        assert!(matches!(parse_stat_line(["PTS=lots"]), Err(Error::InvalidStat(_))));
        assert!(matches!(
            parse_stat_line(["WINS=50"]),
            Err(Error::Core(hoopsim_core::Error::UnknownField(_)))
        ));
    }

    #[test]
    fn test_similar_player_json() {
        let explorer = explorer();
        let results = explorer.similar_to_season("Scorer", 2000, 1).unwrap();
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["name"], "Scorer");
        assert_eq!(json["key"]["season"], 2000);
        assert!(json["link"].as_str().unwrap().contains("/player/2?"));
    }
}
