//! # hoopsim Core
//!
//! Core library for hoopsim.
//!
//! This crate provides the data model and the nearest-neighbour index:
//!
//! - [`PlayerSeason`] - One player's box score line for one season
//! - [`StatSchema`] - Ordered stat fields that define a [`FeatureVector`]
//! - [`Catalog`] - Immutable, insertion-ordered set of player-seasons
//! - [`SimilarityIndex`] - Exact k-nearest-neighbour search, one season per player
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hoopsim_core::{
//!     Catalog, IndexConfig, PlayerSeason, SeasonKey, SimilarityIndex, StatField, StatLine,
//!     StatSchema,
//! };
//!
//! let schema = StatSchema::new(vec![StatField::Gp, StatField::Ast, StatField::Pts]).unwrap();
//! let line = StatLine { gp: Some(82.0), ast: Some(551.0), pts: Some(2251.0), ..StatLine::default() };
//! let season = PlayerSeason::new(SeasonKey::new(2544, 2012), "LeBron James", line);
//!
//! let catalog = Catalog::from_seasons(schema, vec![season]).unwrap();
//! let index = SimilarityIndex::build(Arc::new(catalog), IndexConfig::default()).unwrap();
//!
//! let results = index.query_by_key(&SeasonKey::new(2544, 2012), 10).unwrap().unwrap();
//! assert_eq!(results[0].season.name, "LeBron James");
//! ```

pub mod catalog;
pub mod error;
pub mod index;
pub mod schema;
pub mod season;
pub mod vector;

pub use catalog::{Catalog, CatalogBuilder};
pub use error::{Error, Result};
pub use index::{Distance, IndexConfig, ScoredSeason, SimilarityIndex, DEFAULT_OVERSAMPLE};
pub use schema::{StatField, StatSchema};
pub use season::{PlayerId, PlayerSeason, SeasonKey, StatLine};
pub use vector::FeatureVector;
