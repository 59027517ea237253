//! # hoopsim Explorer
//!
//! The player-season explorer built on [`hoopsim_core`].
//!
//! - [`loader`] - Typed CSV loading with row validation and minimum games filters
//! - [`NameDirectory`] - Unique display names, weighted for random picks
//! - [`PlayerProfile`] - Active seasons, best season and points trend
//! - [`Explorer`] - Lazily built similarity index plus name and stat-line queries
//! - [`Session`] - Explicit state threaded between interactions
//!
//! ## Example
//!
//! ```rust,no_run
//! use hoopsim_explorer::{Category, Explorer, ExplorerConfig};
//!
//! let (explorer, report) = Explorer::open("./data", Category::Totals, ExplorerConfig::default()).unwrap();
//! println!("{} seasons loaded", report.accepted);
//!
//! let profile = explorer.profile("Tim Duncan").unwrap();
//! for hit in explorer.similar_to_season("Tim Duncan", profile.best_season, 10).unwrap() {
//!     println!("{} {} {:.4}", hit.season.name, hit.season.season(), hit.score);
//! }
//! ```

pub mod error;
pub mod explorer;
pub mod loader;
pub mod names;
pub mod profile;
pub mod session;

pub use error::{Error, Result};
pub use explorer::{
    parse_stat_line, stats_link, Explorer, ExplorerConfig, SimilarPlayer, DEFAULT_LIMIT,
};
pub use loader::{load_catalog, load_catalog_from_reader, parse_season, Category, LoadReport};
pub use names::{NameDirectory, NameEntry};
pub use profile::{PlayerProfile, SeasonMetric};
pub use session::{Session, SessionInput, Turn};
