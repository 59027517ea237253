//! Stat schema definitions
//!
//! A [`StatSchema`] is the fixed, ordered list of numeric fields that turns a
//! [`StatLine`] into a [`FeatureVector`]. Vectors built from different schemas
//! are not comparable.

use crate::error::{Error, Result};
use crate::season::StatLine;
use crate::vector::FeatureVector;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A numeric stat column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatField {
    #[serde(rename = "PLAYER_AGE")]
    Age,
    Gp,
    Gs,
    Min,
    Fgm,
    Fga,
    FgPct,
    Fg3m,
    Fg3a,
    Fg3Pct,
    Ftm,
    Fta,
    FtPct,
    Oreb,
    Dreb,
    Reb,
    Ast,
    Stl,
    Blk,
    Tov,
    Pf,
    Pts,
}

impl StatField {
    /// Every field, in source column order
    pub const ALL: [StatField; 22] = [
        StatField::Age,
        StatField::Gp,
        StatField::Gs,
        StatField::Min,
        StatField::Fgm,
        StatField::Fga,
        StatField::FgPct,
        StatField::Fg3m,
        StatField::Fg3a,
        StatField::Fg3Pct,
        StatField::Ftm,
        StatField::Fta,
        StatField::FtPct,
        StatField::Oreb,
        StatField::Dreb,
        StatField::Reb,
        StatField::Ast,
        StatField::Stl,
        StatField::Blk,
        StatField::Tov,
        StatField::Pf,
        StatField::Pts,
    ];

    /// Column name as it appears in the source tables
    pub fn column(self) -> &'static str {
        match self {
            StatField::Age => "PLAYER_AGE",
            StatField::Gp => "GP",
            StatField::Gs => "GS",
            StatField::Min => "MIN",
            StatField::Fgm => "FGM",
            StatField::Fga => "FGA",
            StatField::FgPct => "FG_PCT",
            StatField::Fg3m => "FG3M",
            StatField::Fg3a => "FG3A",
            StatField::Fg3Pct => "FG3_PCT",
            StatField::Ftm => "FTM",
            StatField::Fta => "FTA",
            StatField::FtPct => "FT_PCT",
            StatField::Oreb => "OREB",
            StatField::Dreb => "DREB",
            StatField::Reb => "REB",
            StatField::Ast => "AST",
            StatField::Stl => "STL",
            StatField::Blk => "BLK",
            StatField::Tov => "TOV",
            StatField::Pf => "PF",
            StatField::Pts => "PTS",
        }
    }

    pub fn value(self, line: &StatLine) -> Option<f32> {
        *self.slot(line)
    }

    pub fn set(self, line: &mut StatLine, value: Option<f32>) {
        *self.slot_mut(line) = value;
    }

    fn slot(self, line: &StatLine) -> &Option<f32> {
        match self {
            StatField::Age => &line.age,
            StatField::Gp => &line.gp,
            StatField::Gs => &line.gs,
            StatField::Min => &line.min,
            StatField::Fgm => &line.fgm,
            StatField::Fga => &line.fga,
            StatField::FgPct => &line.fg_pct,
            StatField::Fg3m => &line.fg3m,
            StatField::Fg3a => &line.fg3a,
            StatField::Fg3Pct => &line.fg3_pct,
            StatField::Ftm => &line.ftm,
            StatField::Fta => &line.fta,
            StatField::FtPct => &line.ft_pct,
            StatField::Oreb => &line.oreb,
            StatField::Dreb => &line.dreb,
            StatField::Reb => &line.reb,
            StatField::Ast => &line.ast,
            StatField::Stl => &line.stl,
            StatField::Blk => &line.blk,
            StatField::Tov => &line.tov,
            StatField::Pf => &line.pf,
            StatField::Pts => &line.pts,
        }
    }

    fn slot_mut(self, line: &mut StatLine) -> &mut Option<f32> {
        match self {
            StatField::Age => &mut line.age,
            StatField::Gp => &mut line.gp,
            StatField::Gs => &mut line.gs,
            StatField::Min => &mut line.min,
            StatField::Fgm => &mut line.fgm,
            StatField::Fga => &mut line.fga,
            StatField::FgPct => &mut line.fg_pct,
            StatField::Fg3m => &mut line.fg3m,
            StatField::Fg3a => &mut line.fg3a,
            StatField::Fg3Pct => &mut line.fg3_pct,
            StatField::Ftm => &mut line.ftm,
            StatField::Fta => &mut line.fta,
            StatField::FtPct => &mut line.ft_pct,
            StatField::Oreb => &mut line.oreb,
            StatField::Dreb => &mut line.dreb,
            StatField::Reb => &mut line.reb,
            StatField::Ast => &mut line.ast,
            StatField::Stl => &mut line.stl,
            StatField::Blk => &mut line.blk,
            StatField::Tov => &mut line.tov,
            StatField::Pf => &mut line.pf,
            StatField::Pts => &mut line.pts,
        }
    }
}

impl std::fmt::Display for StatField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for StatField {
    type Err = Error;

    /// Accepts the source column name in any case; `AGE` is an alias for `PLAYER_AGE`
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        if upper == "AGE" {
            return Ok(StatField::Age);
        }
        StatField::ALL
            .iter()
            .copied()
            .find(|field| field.column() == upper)
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// Ordered list of the stat fields that make up a feature vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSchema {
    fields: Vec<StatField>,
}

impl StatSchema {
    /// Create a schema, rejecting empty or repeated field lists
    pub fn new(fields: Vec<StatField>) -> Result<Self> {
        if fields.is_empty() {
            return Err(Error::InvalidSchema("schema cannot be empty".to_string()));
        }

        for (i, field) in fields.iter().enumerate() {
            if fields[..i].contains(field) {
                return Err(Error::InvalidSchema(format!("field {} is repeated", field)));
            }
        }

        Ok(Self { fields })
    }

    /// Schema over every stat column, in source column order
    pub fn all() -> Self {
        Self {
            fields: StatField::ALL.to_vec(),
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn fields(&self) -> &[StatField] {
        &self.fields
    }

    /// Build the feature vector for a stat line
    pub fn vectorize(&self, line: &StatLine) -> FeatureVector {
        FeatureVector::from_options(self.fields.iter().map(|field| field.value(line)))
    }
}

impl Default for StatSchema {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectorize_follows_field_order() {
        let line = StatLine {
            gp: Some(82.0),
            pts: Some(2251.0),
            ast: Some(551.0),
            ..StatLine::default()
        };

        let schema = StatSchema::new(vec![StatField::Pts, StatField::Gp, StatField::Ast]).unwrap();
        assert_eq!(schema.vectorize(&line).as_slice(), &[2251.0, 82.0, 551.0]);
    }

    #[test]
    fn test_vectorize_missing_is_zero() {
        let line = StatLine {
            gp: Some(70.0),
            ..StatLine::default()
        };
        let v = StatSchema::all().vectorize(&line);
        assert_eq!(v.dim(), 22);
        assert_eq!(v.as_slice()[1], 70.0);
        assert_eq!(v.as_slice().iter().filter(|x| **x == 0.0).count(), 21);
    }

    #[test]
    fn test_empty_schema_error() {
        assert!(matches!(StatSchema::new(vec![]), Err(Error::InvalidSchema(_))));
    }

    #[test]
    fn test_repeated_field_error() {
        assert!(matches!(
            StatSchema::new(vec![StatField::Pts, StatField::Reb, StatField::Pts]),
            Err(Error::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("pts".parse::<StatField>().unwrap(), StatField::Pts);
        assert_eq!("FG3_PCT".parse::<StatField>().unwrap(), StatField::Fg3Pct);
        assert_eq!("age".parse::<StatField>().unwrap(), StatField::Age);
        assert!(matches!("WAR".parse::<StatField>(), Err(Error::UnknownField(_))));
    }

    #[test]
    fn test_set_and_value() {
        let mut line = StatLine::default();
        StatField::Blk.set(&mut line, Some(3.5));
        assert_eq!(line.blk, Some(3.5));
        assert_eq!(StatField::Blk.value(&line), Some(3.5));
    }

    #[test]
    fn test_serde_roundtrip() {
        let schema =
            StatSchema::new(vec![StatField::Age, StatField::FgPct, StatField::Pts]).unwrap();
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"{"fields":["PLAYER_AGE","FG_PCT","PTS"]}"#);
        let parsed: StatSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, parsed);
    }
}
