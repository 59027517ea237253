use crate::names::NameDirectory;
use hoopsim_core::{Catalog, PlayerId};
use serde::Serialize;

/// Primary metric of one season
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonMetric {
    pub season: u16,
    pub pts: Option<f32>,
}

/// A player's active seasons, best season and points trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub name: String,
    pub player_id: PlayerId,
    /// Catalog order
    pub seasons: Vec<u16>,
    /// Highest points total; the earliest listed season wins ties
    pub best_season: u16,
    pub trend: Vec<SeasonMetric>,
}

impl PlayerProfile {
    /// Profile of a directory name; `None` if the name is unknown or has no seasons
    pub fn build(catalog: &Catalog, names: &NameDirectory, name: &str) -> Option<Self> {
        let player_id = names.resolve(name)?;

        let trend: Vec<SeasonMetric> = catalog
            .player_seasons(player_id)
            .map(|s| SeasonMetric {
                season: s.season(),
                pts: s.stats.pts,
            })
            .collect();

        let mut best: Option<SeasonMetric> = None;
        for metric in &trend {
            let pts = metric.pts.unwrap_or(f32::NEG_INFINITY);
            if best.map_or(true, |b| pts > b.pts.unwrap_or(f32::NEG_INFINITY)) {
                best = Some(*metric);
            }
        }
        let best_season = best?.season;

        Some(Self {
            name: name.to_string(),
            player_id,
            seasons: trend.iter().map(|m| m.season).collect(),
            best_season,
            trend,
        })
    }

    pub fn is_active_in(&self, season: u16) -> bool {
        self.seasons.contains(&season)
    }
}
