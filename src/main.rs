use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use hoopsim_core::{Distance, IndexConfig, DEFAULT_OVERSAMPLE};
use hoopsim_explorer::{
    parse_stat_line, Category, Explorer, ExplorerConfig, Session, SessionInput, SimilarPlayer,
    DEFAULT_LIMIT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Find historical player-seasons with similar statistics
#[derive(Parser, Debug)]
#[command(name = "hoopsim")]
#[command(about = "Find player-seasons with similar statistics", long_about = None)]
struct Args {
    /// Directory holding total-stats.csv and per-game-stats.csv
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Stat category: totals or per-game
    #[arg(short, long, default_value = "totals")]
    category: Category,

    /// Similarity metric
    #[arg(long, value_enum, default_value_t = DistanceArg::Cosine)]
    distance: DistanceArg,

    /// Candidate pool multiplier before one-season-per-player filtering
    #[arg(long, default_value_t = DEFAULT_OVERSAMPLE)]
    oversample: usize,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seasons most similar to a player's season
    Similar {
        /// Player name; defaults to the session's player or a random pick
        #[arg(short, long)]
        name: Option<String>,

        /// Season start year; defaults to the player's best season
        #[arg(short, long)]
        season: Option<u16>,

        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// File to read and update the session from
        #[arg(long)]
        session: Option<PathBuf>,

        /// Seed for the random player pick
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Seasons most similar to a hand-entered stat line
    Search {
        /// Stat value such as PTS=25; repeat for more fields
        #[arg(long = "stat", value_name = "FIELD=VALUE", required = true)]
        stats: Vec<String>,

        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// A player's active seasons, best season and points trend
    Profile {
        #[arg(short, long)]
        name: String,
    },
    /// List player names
    Names {
        /// Only names containing this text
        #[arg(long)]
        contains: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DistanceArg {
    Cosine,
    Euclidean,
    Dot,
}

impl From<DistanceArg> for Distance {
    fn from(arg: DistanceArg) -> Self {
        match arg {
            DistanceArg::Cosine => Distance::Cosine,
            DistanceArg::Euclidean => Distance::Euclidean,
            DistanceArg::Dot => Distance::Dot,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting hoopsim v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("Category: {}", args.category);

    let config = ExplorerConfig {
        index: IndexConfig {
            distance: args.distance.into(),
            oversample: args.oversample,
        },
        ..ExplorerConfig::default()
    };

    let (explorer, report) = Explorer::open(&args.data_dir, args.category, config)
        .with_context(|| format!("failed to load {} catalog", args.category))?;
    info!(
        "Catalog loaded: {} seasons, {} rejected, {} below minimum games, {} replaced",
        report.accepted, report.rejected, report.below_min_games, report.replaced
    );

    match args.command {
        Command::Similar {
            name,
            season,
            limit,
            session,
            seed,
        } => {
            let previous = match &session {
                Some(path) => read_session(path)?,
                None => Session::new(),
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };

            let input = SessionInput { name, season };
            let (next, turn) = previous.advance(&explorer, input, limit, &mut rng)?;
            if let Some(path) = &session {
                write_session(path, &next)?;
            }

            if args.json {
                println!("{}", serde_json::to_string_pretty(&turn)?);
            } else if let (Some(name), Some(season)) = (&next.name, next.season) {
                println!("{} {} ({})", name, season, explorer.category());
                print_results(&turn.results);
            } else {
                println!("No players in catalog");
            }
        }
        Command::Search { stats, limit } => {
            let line = parse_stat_line(stats.iter().map(String::as_str))?;
            let results = explorer.similar_to_stats(&line, limit)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_results(&results);
            }
        }
        Command::Profile { name } => {
            let profile = explorer
                .profile(&name)
                .with_context(|| format!("unknown player: {}", name))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("{} (best season {})", profile.name, profile.best_season);
                for metric in &profile.trend {
                    match metric.pts {
                        Some(pts) => println!("  {}  {:>8.1}", metric.season, pts),
                        None => println!("  {}  {:>8}", metric.season, "-"),
                    }
                }
            }
        }
        Command::Names { contains } => {
            let names = match &contains {
                Some(needle) => explorer.names().search(needle),
                None => explorer.names().names(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
    }

    Ok(())
}

fn read_session(path: &Path) -> anyhow::Result<Session> {
    if !path.exists() {
        return Ok(Session::new());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid session file {:?}", path))
}

fn write_session(path: &Path, session: &Session) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(session)?;
    std::fs::write(path, raw).with_context(|| format!("failed to write session {:?}", path))
}

fn print_results(results: &[SimilarPlayer]) {
    if results.is_empty() {
        println!("Player-season not found");
        return;
    }

    println!(
        "{:<28} {:>6} {:<4} {:>8} {:>8} {:>8} {:>8}  {}",
        "Name", "Season", "Team", "Score", "PTS", "REB", "AST", "Link"
    );
    for hit in results {
        let season = &hit.season;
        println!(
            "{:<28} {:>6} {:<4} {:>8.4} {:>8} {:>8} {:>8}  {}",
            season.name,
            season.season(),
            season.team.as_deref().unwrap_or("-"),
            hit.score,
            stat(season.stats.pts),
            stat(season.stats.reb),
            stat(season.stats.ast),
            hit.link
        );
    }
}

fn stat(value: Option<f32>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}
