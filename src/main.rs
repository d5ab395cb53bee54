use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cricket_ledger::api::{build_router, dedup_by_id, state::AppState};
use cricket_ledger::config::AppConfig;
use cricket_ledger::models::{
    BattingEntry, BowlingEntry, FieldingEntry, Innings, Match, MatchDay, Player,
};
use cricket_ledger::stats::filter::StatsFilter;
use cricket_ledger::stats::{aggregate, format_average};
use cricket_ledger::storage::{EntityType, JsonlReader, StorageConfig};

#[derive(Parser)]
#[command(name = "cricket-ledger")]
#[command(about = "Local cricket statistics tracker with a dashboard API")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the statistics tables to the terminal
    Summary {
        /// Comma-separated match dates (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Rivalry name
        #[arg(long)]
        rivalry: Option<String>,
    },

    /// Debug utilities
    Debug {
        #[command(subcommand)]
        action: DebugAction,
    },
}

#[derive(Subcommand)]
enum DebugAction {
    /// Validate storage integrity and print record counts
    Storage,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting cricket-ledger v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default(std::path::Path::new(&cli.config))?;
    let data_dir = cli
        .data_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data_dir.clone());
    let storage = StorageConfig::new(data_dir);

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState {
                storage: Arc::new(storage),
            };
            let app = build_router(state);
            let addr = format!(
                "{}:{}",
                host.unwrap_or(config.server.host),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }

        Commands::Summary { date, rivalry } => {
            print_summary(&storage, date.as_deref(), rivalry.as_deref())?;
        }

        Commands::Debug { action } => match action {
            DebugAction::Storage => {
                validate_storage(&storage)?;
            }
        },
    }

    Ok(())
}

fn print_summary(
    storage: &StorageConfig,
    date: Option<&str>,
    rivalry: Option<&str>,
) -> Result<()> {
    let filter = StatsFilter::from_params(date, rivalry);
    let days: Vec<MatchDay> = JsonlReader::for_entity(storage, EntityType::MatchDay).read_all()?;
    let selection = filter.resolve(&days);

    let matches: Vec<Match> = JsonlReader::for_entity(storage, EntityType::Match).read_all()?;
    let matches = dedup_by_id(matches, |m| m.id.as_str());
    let innings: Vec<Innings> = JsonlReader::for_entity(storage, EntityType::Innings).read_all()?;
    let innings = dedup_by_id(innings, |i| i.id.as_str());

    println!("=== Team Stats ({}) ===", filter.label());
    println!(
        "{:<14} {:>3} {:>3} {:>5} {:>6} {:>7} {:>8}",
        "Team", "P", "W", "Win%", "Runs", "SR", "Best"
    );
    for row in aggregate::team_stats(&matches, &innings, &selection) {
        println!(
            "{:<14} {:>3} {:>3} {:>4}% {:>6} {:>7.2} {:>8}",
            row.team, row.played, row.won, row.win_percent, row.runs, row.strike_rate,
            row.highest_score
        );
    }

    let batting: Vec<BattingEntry> =
        JsonlReader::for_entity(storage, EntityType::Batting).read_all()?;
    let batting = dedup_by_id(batting, |e| e.id.as_str());

    println!("\n=== Batting ({}) ===", filter.label());
    println!(
        "{:<14} {:>4} {:>5} {:>5} {:>4} {:>7} {:>7}",
        "Player", "Inns", "Runs", "Balls", "HS", "SR", "Avg"
    );
    for row in aggregate::batting_stats(&batting, &selection) {
        println!(
            "{:<14} {:>4} {:>5} {:>5} {:>4} {:>7.2} {:>7.2}",
            row.player, row.innings, row.runs, row.balls, row.highest_score, row.strike_rate,
            row.average
        );
    }

    let bowling: Vec<BowlingEntry> =
        JsonlReader::for_entity(storage, EntityType::Bowling).read_all()?;
    let bowling = dedup_by_id(bowling, |e| e.id.as_str());

    println!("\n=== Bowling ({}) ===", filter.label());
    println!(
        "{:<14} {:>4} {:>6} {:>5} {:>4} {:>6} {:>7}",
        "Player", "Inns", "Overs", "Runs", "Wkts", "Econ", "Avg"
    );
    for row in aggregate::bowling_stats(&bowling, &selection) {
        println!(
            "{:<14} {:>4} {:>6} {:>5} {:>4} {:>6.2} {:>7}",
            row.player,
            row.innings,
            row.overs,
            row.runs_conceded,
            row.wickets,
            row.economy,
            format_average(row.average.unwrap_or(f64::INFINITY)),
        );
    }

    let fielding: Vec<FieldingEntry> =
        JsonlReader::for_entity(storage, EntityType::Fielding).read_all()?;
    let fielding = dedup_by_id(fielding, |e| e.id.as_str());

    println!("\n=== Fielding ({}) ===", filter.label());
    println!("{:<14} {:>4} {:>7} {:>8}", "Player", "Inns", "Catches", "Run-outs");
    for row in aggregate::fielding_stats(&fielding, &selection) {
        println!(
            "{:<14} {:>4} {:>7} {:>8}",
            row.player, row.innings, row.catches, row.run_outs
        );
    }

    println!("\n=== Player of the Match ({}) ===", filter.label());
    println!("{:<14} {:>6}", "Player", "Awards");
    for row in aggregate::potm_stats(&matches, &selection) {
        println!("{:<14} {:>6}", row.player, row.count);
    }

    Ok(())
}

fn validate_storage(storage: &StorageConfig) -> Result<()> {
    println!("=== Storage Report ({:?}) ===\n", storage.data_dir);

    for entity in EntityType::all() {
        let count = JsonlReader::<serde_json::Value>::new(storage.entity_path(*entity)).count()?;
        println!("{:<18} {:>6}", entity.filename(), count);
    }

    let players: Vec<Player> = JsonlReader::for_entity(storage, EntityType::Player).read_all()?;
    let days: Vec<MatchDay> = JsonlReader::for_entity(storage, EntityType::MatchDay).read_all()?;
    let matches: Vec<Match> = JsonlReader::for_entity(storage, EntityType::Match).read_all()?;

    let known_player = |name: &str| players.iter().any(|p| p.name == name);
    let known_day = |date: chrono::NaiveDate| days.iter().any(|d| d.date == date);

    let mut problems = 0u32;

    let batting: Vec<BattingEntry> =
        JsonlReader::for_entity(storage, EntityType::Batting).read_all()?;
    for e in &batting {
        if !known_player(&e.player) {
            println!("batting entry {} references unknown player {}", e.id, e.player);
            problems += 1;
        }
        if !known_day(e.date) {
            println!("batting entry {} references unknown match day {}", e.id, e.date);
            problems += 1;
        }
    }

    let bowling: Vec<BowlingEntry> =
        JsonlReader::for_entity(storage, EntityType::Bowling).read_all()?;
    for e in &bowling {
        if !known_player(&e.player) {
            println!("bowling entry {} references unknown player {}", e.id, e.player);
            problems += 1;
        }
        if !known_day(e.date) {
            println!("bowling entry {} references unknown match day {}", e.id, e.date);
            problems += 1;
        }
    }

    let fielding: Vec<FieldingEntry> =
        JsonlReader::for_entity(storage, EntityType::Fielding).read_all()?;
    for e in &fielding {
        if !known_player(&e.player) {
            println!("fielding entry {} references unknown player {}", e.id, e.player);
            problems += 1;
        }
    }

    let innings: Vec<Innings> = JsonlReader::for_entity(storage, EntityType::Innings).read_all()?;
    for i in &innings {
        match matches.iter().find(|m| m.id == i.match_id) {
            None => {
                println!("innings {} references unknown match {}", i.id, i.match_id);
                problems += 1;
            }
            Some(m) if !m.has_team(&i.team) => {
                println!("innings {} team {} did not play match {}", i.id, i.team, m.id);
                problems += 1;
            }
            _ => {}
        }
    }

    for m in &matches {
        let count = innings.iter().filter(|i| i.match_id == m.id).count();
        if count != 2 && count != 0 {
            println!("match {} has {} innings records (expected 2)", m.id, count);
            problems += 1;
        }
    }

    if problems == 0 {
        println!("\nNo referential problems found.");
    } else {
        println!("\n{} referential problem(s) found.", problems);
    }

    Ok(())
}
