//! Explicit interaction state
//!
//! A [`Session`] records what the previous interaction showed. Each step takes
//! the previous session plus the new input and returns the next session along
//! with what to display; nothing is kept in shared mutable state.

use crate::explorer::{Explorer, SimilarPlayer};
use crate::loader::Category;
use crate::profile::PlayerProfile;
use crate::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub category: Option<Category>,
    pub name: Option<String>,
    pub season: Option<u16>,
}

/// What the user asked for in this step; `None` means "keep or default"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInput {
    pub name: Option<String>,
    pub season: Option<u16>,
}

/// Output of one step
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Turn {
    pub profile: Option<PlayerProfile>,
    pub results: Vec<SimilarPlayer>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the next player-season and run its similarity search
    ///
    /// The name falls back to the previous one, then to a weighted random
    /// pick. The previous season is only carried over when neither the
    /// category nor the name changed; otherwise the player's best season is
    /// used.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        explorer: &Explorer,
        input: SessionInput,
        limit: usize,
        rng: &mut R,
    ) -> Result<(Session, Turn)> {
        let category = explorer.category();
        let names = explorer.names();

        let requested = input.name.as_deref().or(self.name.as_deref());
        let name = match requested.filter(|name| names.contains(name)) {
            Some(name) => name.to_string(),
            None => match names.choose_weighted(rng) {
                Some(entry) => entry.name.clone(),
                None => return Ok((Self::empty(category), Turn::default())),
            },
        };

        let Some(profile) = explorer.profile(&name) else {
            return Ok((Self::empty(category), Turn::default()));
        };

        let unchanged =
            self.category == Some(category) && self.name.as_deref() == Some(name.as_str());
        let carried = if unchanged { self.season } else { None };
        let season = input
            .season
            .or(carried)
            .filter(|&season| profile.is_active_in(season))
            .unwrap_or(profile.best_season);

        let results = explorer.similar_to_season(&name, season, limit)?;
        let next = Session {
            category: Some(category),
            name: Some(name),
            season: Some(season),
        };
        let turn = Turn {
            profile: Some(profile),
            results,
        };
        Ok((next, turn))
    }

    fn empty(category: Category) -> Self {
        Self {
            category: Some(category),
            name: None,
            season: None,
        }
    }
}
