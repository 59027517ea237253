//! Typed catalog loading
//!
//! Rows are deserialised by column name into a fixed record, validated once,
//! and only then turned into [`PlayerSeason`]s. Rows without a usable player
//! id, name or season are rejected instead of flowing into the index.

use crate::{Error, Result};
use hoopsim_core::{Catalog, CatalogBuilder, PlayerSeason, SeasonKey, StatLine, StatSchema};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Statistics category; each one is loaded into its own catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Totals,
    PerGame,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Totals, Category::PerGame];

    /// Seasons with fewer games played are left out of the catalog
    pub fn min_games(self) -> f32 {
        match self {
            Category::Totals => 40.0,
            Category::PerGame => 20.0,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Category::Totals => "total-stats.csv",
            Category::PerGame => "per-game-stats.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Totals => "Totals",
            Category::PerGame => "Per Game",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "totals" | "total" => Ok(Category::Totals),
            "per-game" | "per_game" | "pergame" | "per game" => Ok(Category::PerGame),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// Outcome counters of a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub accepted: usize,
    pub rejected: usize,
    pub below_min_games: usize,
    /// Rows that replaced an earlier row for the same player and season
    pub replaced: usize,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "PLAYER_ID", default, deserialize_with = "csv::invalid_option")]
    player_id: Option<u64>,
    #[serde(rename = "PLAYER_NAME", default)]
    player_name: Option<String>,
    #[serde(rename = "SEASON_ID", default)]
    season_id: Option<String>,
    #[serde(rename = "TEAM_ABBREVIATION", default)]
    team: Option<String>,
    #[serde(rename = "PLAYER_AGE", default, deserialize_with = "csv::invalid_option")]
    age: Option<f32>,
    #[serde(rename = "GP", default, deserialize_with = "csv::invalid_option")]
    gp: Option<f32>,
    #[serde(rename = "GS", default, deserialize_with = "csv::invalid_option")]
    gs: Option<f32>,
    #[serde(rename = "MIN", default, deserialize_with = "csv::invalid_option")]
    min: Option<f32>,
    #[serde(rename = "FGM", default, deserialize_with = "csv::invalid_option")]
    fgm: Option<f32>,
    #[serde(rename = "FGA", default, deserialize_with = "csv::invalid_option")]
    fga: Option<f32>,
    #[serde(rename = "FG_PCT", default, deserialize_with = "csv::invalid_option")]
    fg_pct: Option<f32>,
    #[serde(rename = "FG3M", default, deserialize_with = "csv::invalid_option")]
    fg3m: Option<f32>,
    #[serde(rename = "FG3A", default, deserialize_with = "csv::invalid_option")]
    fg3a: Option<f32>,
    #[serde(rename = "FG3_PCT", default, deserialize_with = "csv::invalid_option")]
    fg3_pct: Option<f32>,
    #[serde(rename = "FTM", default, deserialize_with = "csv::invalid_option")]
    ftm: Option<f32>,
    #[serde(rename = "FTA", default, deserialize_with = "csv::invalid_option")]
    fta: Option<f32>,
    #[serde(rename = "FT_PCT", default, deserialize_with = "csv::invalid_option")]
    ft_pct: Option<f32>,
    #[serde(rename = "OREB", default, deserialize_with = "csv::invalid_option")]
    oreb: Option<f32>,
    #[serde(rename = "DREB", default, deserialize_with = "csv::invalid_option")]
    dreb: Option<f32>,
    #[serde(rename = "REB", default, deserialize_with = "csv::invalid_option")]
    reb: Option<f32>,
    #[serde(rename = "AST", default, deserialize_with = "csv::invalid_option")]
    ast: Option<f32>,
    #[serde(rename = "STL", default, deserialize_with = "csv::invalid_option")]
    stl: Option<f32>,
    #[serde(rename = "BLK", default, deserialize_with = "csv::invalid_option")]
    blk: Option<f32>,
    #[serde(rename = "TOV", default, deserialize_with = "csv::invalid_option")]
    tov: Option<f32>,
    #[serde(rename = "PF", default, deserialize_with = "csv::invalid_option")]
    pf: Option<f32>,
    #[serde(rename = "PTS", default, deserialize_with = "csv::invalid_option")]
    pts: Option<f32>,
}

impl RawRow {
    fn into_season(self) -> std::result::Result<PlayerSeason, &'static str> {
        let player_id = self.player_id.ok_or("missing PLAYER_ID")?;
        let name = self
            .player_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or("missing PLAYER_NAME")?;
        let season = self
            .season_id
            .as_deref()
            .and_then(parse_season)
            .ok_or("missing or malformed SEASON_ID")?;

        let stats = StatLine {
            age: self.age,
            gp: self.gp,
            gs: self.gs,
            min: self.min,
            fgm: self.fgm,
            fga: self.fga,
            fg_pct: self.fg_pct,
            fg3m: self.fg3m,
            fg3a: self.fg3a,
            fg3_pct: self.fg3_pct,
            ftm: self.ftm,
            fta: self.fta,
            ft_pct: self.ft_pct,
            oreb: self.oreb,
            dreb: self.dreb,
            reb: self.reb,
            ast: self.ast,
            stl: self.stl,
            blk: self.blk,
            tov: self.tov,
            pf: self.pf,
            pts: self.pts,
        };

        let mut season = PlayerSeason::new(SeasonKey::new(player_id, season), name, stats);
        season.team = self
            .team
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Ok(season)
    }
}

/// Start year of a season id: `2015` and `2015-16` both give 2015
pub fn parse_season(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    let year = raw.split_once('-').map(|(start, _)| start).unwrap_or(raw);
    if year.len() != 4 {
        return None;
    }
    year.parse().ok()
}

/// Load one category's catalog from a CSV file
pub fn load_catalog(
    path: impl AsRef<Path>,
    category: Category,
    schema: StatSchema,
) -> Result<(Catalog, LoadReport)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), %category, "loading catalog");
    load_catalog_from_reader(file, category, schema)
}

/// Load one category's catalog from any CSV reader
pub fn load_catalog_from_reader<R: Read>(
    rdr: R,
    category: Category,
    schema: StatSchema,
) -> Result<(Catalog, LoadReport)> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut builder = CatalogBuilder::new(schema);
    let mut report = LoadReport::default();

    for (row, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!(row = row + 1, "skipping malformed row: {}", e);
                report.rejected += 1;
                continue;
            }
        };

        if raw.gp.unwrap_or(0.0) < category.min_games() {
            report.below_min_games += 1;
            continue;
        }

        match raw.into_season() {
            Ok(season) => {
                let key = season.key;
                if builder.upsert(season) {
                    debug!(%key, "later row replaces earlier row");
                    report.replaced += 1;
                } else {
                    report.accepted += 1;
                }
            }
            Err(reason) => {
                warn!(row = row + 1, "rejecting row: {}", reason);
                report.rejected += 1;
            }
        }
    }

    debug!(?report, %category, "catalog loaded");
    Ok((builder.build(), report))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "PLAYER_ID,PLAYER_NAME,SEASON_ID,TEAM_ABBREVIATION,PLAYER_AGE,GP,GS,MIN,FGM,FGA,FG_PCT,FG3M,FG3A,FG3_PCT,FTM,FTA,FT_PCT,OREB,DREB,REB,AST,STL,BLK,TOV,PF,PTS";

    fn load(csv_data: &str, category: Category) -> (Catalog, LoadReport) {
        load_catalog_from_reader(csv_data.as_bytes(), category, StatSchema::all()).unwrap()
    }

    #[test]
    fn test_parse_season() {
        assert_eq!(parse_season("2015"), Some(2015));
        assert_eq!(parse_season("2015-16"), Some(2015));
        assert_eq!(parse_season(" 1999-00 "), Some(1999));
        assert_eq!(parse_season("15-16"), None);
        assert_eq!(parse_season(""), None);
    }

    #[test]
    fn test_load_rows() {
        let csv_data = format!(
            "{HEADER}\n\
             2544,LeBron James,2012-13,MIA,28,76,76,2877,765,1354,0.565,103,254,0.406,403,535,0.753,97,513,610,551,129,67,226,110,2036\n\
             201939,Stephen Curry,2015,GSW,28,79,79,2700,805,1598,0.504,402,886,0.454,363,400,0.908,68,362,430,527,169,15,262,161,2375\n"
        );
        let (catalog, report) = load(&csv_data, Category::Totals);

        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, 0);
        assert_eq!(catalog.len(), 2);

        let lebron = catalog.get(&SeasonKey::new(2544, 2012)).unwrap();
        assert_eq!(lebron.name, "LeBron James");
        assert_eq!(lebron.team.as_deref(), Some("MIA"));
        assert_eq!(lebron.stats.pts, Some(2036.0));
        assert_eq!(lebron.stats.fg3_pct, Some(0.406));
    }

    #[test]
    fn test_min_games_filter() {
        let csv_data = format!(
            "{HEADER}\n\
             1,Short Season,2001,BOS,22,25,0,300,40,90,0.444,0,1,0,20,30,0.667,10,30,40,20,5,3,15,30,100\n\
             2,No Games,2001,BOS,22,,0,300,40,90,0.444,0,1,0,20,30,0.667,10,30,40,20,5,3,15,30,100\n"
        );
        let (totals, report) = load(&csv_data, Category::Totals);
        assert!(totals.is_empty());
        assert_eq!(report.below_min_games, 2);

        let (per_game, _) = load(&csv_data, Category::PerGame);
        assert_eq!(per_game.len(), 1);
    }

    #[test]
    fn test_rejects_rows_without_identity() {
        let csv_data = format!(
            "{HEADER}\n\
             ,Nobody,2001,BOS,22,60,0,300,40,90,0.444,0,1,0,20,30,0.667,10,30,40,20,5,3,15,30,100\n\
             3,,2001,BOS,22,60,0,300,40,90,0.444,0,1,0,20,30,0.667,10,30,40,20,5,3,15,30,100\n\
             4,Bad Season,20X1,BOS,22,60,0,300,40,90,0.444,0,1,0,20,30,0.667,10,30,40,20,5,3,15,30,100\n\
             5,Fine,2001,BOS,22,60,0,300,40,90,0.444,0,1,0,20,30,0.667,10,30,40,20,5,3,15,30,100\n"
        );
        let (catalog, report) = load(&csv_data, Category::Totals);
        assert_eq!(report.rejected, 3);
        assert_eq!(report.accepted, 1);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_blank_and_garbage_numbers_are_missing() {
        let csv_data = format!(
            "{HEADER}\n\
             7,Old Timer,1950,SYR,25,60,,1800,300,800,0.375,,,,200,260,0.769,,,500,100,,,,150,800\n\
             8,Typo,1950,SYR,25,60,n/a,1800,300,800,0.375,,,,200,260,0.769,,,500,100,,,,150,800\n"
        );
        let (catalog, report) = load(&csv_data, Category::Totals);
        assert_eq!(report.accepted, 2);

        let old = catalog.get(&SeasonKey::new(7, 1950)).unwrap();
        assert_eq!(old.stats.fg3m, None);
        assert_eq!(old.stats.gs, None);
        assert_eq!(catalog.get(&SeasonKey::new(8, 1950)).unwrap().stats.gs, None);

        let vector = catalog.vector(&SeasonKey::new(7, 1950)).unwrap();
        assert_eq!(vector.as_slice()[2], 0.0);
    }

    #[test]
    fn test_later_duplicate_wins() {
        let csv_data = format!(
            "{HEADER}\n\
             9,Traded,2005,TOT,27,70,70,2000,300,700,0.429,20,60,0.333,100,130,0.769,50,150,200,150,50,10,80,150,720\n\
             10,Other,2005,LAL,27,70,70,2000,300,700,0.429,20,60,0.333,100,130,0.769,50,150,200,150,50,10,80,150,700\n\
             9,Traded,2005,NYK,27,45,45,1200,180,420,0.429,12,36,0.333,60,78,0.769,30,90,120,90,30,6,48,90,432\n"
        );
        let (catalog, report) = load(&csv_data, Category::Totals);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.replaced, 1);

        let first = catalog.iter().next().unwrap();
        assert_eq!(first.key, SeasonKey::new(9, 2005));
        assert_eq!(first.team.as_deref(), Some("NYK"));
    }

    #[test]
    fn test_wrong_column_count_is_rejected() {
        let csv_data = format!(
            "{HEADER}\n\
             11,Short Row,2001,BOS,22,60\n\
             12,Long Row,2001,BOS,22,60,0,300,40,90,0.444,0,1,0,20,30,0.667,10,30,40,20,5,3,15,30,100,7\n\
             13,Fine,2001,BOS,22,60,0,300,40,90,0.444,0,1,0,20,30,0.667,10,30,40,20,5,3,15,30,100\n"
        );
        let (catalog, report) = load(&csv_data, Category::Totals);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.accepted, 1);
        assert!(catalog.get(&SeasonKey::new(13, 2001)).is_some());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Category::PerGame.file_name());
        let csv_data = format!(
            "{HEADER}\n\
             14,On Disk,2010-11,DAL,31,72,72,35.1,8.7,18.2,0.478,1.1,2.7,0.393,5.0,5.6,0.892,0.8,6.3,7.1,2.6,0.5,0.6,1.8,2.0,23.5\n"
        );
        std::fs::write(&path, csv_data).unwrap();

        let (catalog, report) = load_catalog(&path, Category::PerGame, StatSchema::all()).unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(catalog.get(&SeasonKey::new(14, 2010)).unwrap().stats.pts, Some(23.5));

        let missing = dir.path().join(Category::Totals.file_name());
        let err = load_catalog(&missing, Category::Totals, StatSchema::all()).unwrap_err();
        assert!(matches!(err, Error::Io { path, .. } if path == missing));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("totals".parse::<Category>().unwrap(), Category::Totals);
        assert_eq!("Per-Game".parse::<Category>().unwrap(), Category::PerGame);
        assert!(matches!("advanced".parse::<Category>(), Err(Error::UnknownCategory(_))));
    }
}
