use serde::{Deserialize, Serialize};

/// Player identity, coarser than a season
pub type PlayerId = u64;

/// Stable identifier of one player's season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeasonKey {
    pub player_id: PlayerId,
    /// Start year of the season, e.g. 2015 for 2015-16
    pub season: u16,
}

impl SeasonKey {
    #[inline]
    #[must_use]
    pub fn new(player_id: PlayerId, season: u16) -> Self {
        Self { player_id, season }
    }
}

impl std::fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.player_id, self.season)
    }
}

/// Box score line for one player-season
///
/// Every field is optional; the source tables leave percentages blank when
/// there were no attempts, and older seasons predate some stats entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub age: Option<f32>,
    pub gp: Option<f32>,
    pub gs: Option<f32>,
    pub min: Option<f32>,
    pub fgm: Option<f32>,
    pub fga: Option<f32>,
    pub fg_pct: Option<f32>,
    pub fg3m: Option<f32>,
    pub fg3a: Option<f32>,
    pub fg3_pct: Option<f32>,
    pub ftm: Option<f32>,
    pub fta: Option<f32>,
    pub ft_pct: Option<f32>,
    pub oreb: Option<f32>,
    pub dreb: Option<f32>,
    pub reb: Option<f32>,
    pub ast: Option<f32>,
    pub stl: Option<f32>,
    pub blk: Option<f32>,
    pub tov: Option<f32>,
    pub pf: Option<f32>,
    pub pts: Option<f32>,
}

/// One row of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeason {
    pub key: SeasonKey,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    pub stats: StatLine,
}

impl PlayerSeason {
    #[inline]
    #[must_use]
    pub fn new(key: SeasonKey, name: impl Into<String>, stats: StatLine) -> Self {
        Self {
            key,
            name: name.into(),
            team: None,
            stats,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    #[inline]
    pub fn player_id(&self) -> PlayerId {
        self.key.player_id
    }

    #[inline]
    pub fn season(&self) -> u16 {
        self.key.season
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        assert_eq!(SeasonKey::new(2544, 2012).to_string(), "2544/2012");
    }

    #[test]
    fn test_serialize_skips_missing_team() {
        let season = PlayerSeason::new(SeasonKey::new(1, 2000), "Someone", StatLine::default());
        let json = serde_json::to_value(&season).unwrap();
        assert!(json.get("team").is_none());

        let json = serde_json::to_value(season.with_team("BOS")).unwrap();
        assert_eq!(json["team"], "BOS");
    }
}
