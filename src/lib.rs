//! # hoopsim
//!
//! Find historical basketball player-seasons with similar statistical profiles.
//!
//! Every player-season becomes a fixed-length feature vector built from its box
//! score line. Queries rank the whole catalog by vector similarity and keep only
//! each player's best-ranked season.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! hoopsim --data-dir ./data similar --name "Tim Duncan" --season 2001
//! hoopsim --category per-game search --stat PTS=27 --stat REB=7 --stat AST=7
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use hoopsim::prelude::*;
//!
//! let (explorer, _report) = Explorer::open("./data", Category::PerGame, ExplorerConfig::default()).unwrap();
//!
//! let stats = parse_stat_line(["PTS=27", "REB=7", "AST=7"]).unwrap();
//! let results = explorer.similar_to_stats(&stats, 10).unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - `hoopsim-core` - Player-seasons, stat schema, catalog and similarity index
//! - `hoopsim-explorer` - CSV loading, name directory, profiles, explorer and session state

// Re-export core types
pub use hoopsim_core::{
    Catalog, CatalogBuilder, Distance, FeatureVector, IndexConfig, PlayerId, PlayerSeason,
    ScoredSeason, SeasonKey, SimilarityIndex, StatField, StatLine, StatSchema,
};

// Re-export explorer
pub use hoopsim_explorer::{
    load_catalog, parse_stat_line, Category, Explorer, ExplorerConfig, LoadReport, NameDirectory,
    PlayerProfile, Session, SessionInput, SimilarPlayer, Turn,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        parse_stat_line, Catalog, Category, Distance, Explorer, ExplorerConfig, FeatureVector,
        IndexConfig, PlayerSeason, SeasonKey, Session, SessionInput, SimilarityIndex, StatField,
        StatLine, StatSchema,
    };
}
