use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, ScoreConfig, ScoreStore};
use tutor_core::model::{Points, TopicId};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { what: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidFlushMs { raw: String },
    InvalidPoints { raw: String },
    InvalidTopic { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { what } => write!(f, "missing {what}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidFlushMs { raw } => write!(f, "invalid --flush-ms value: {raw}"),
            ArgsError::InvalidPoints { raw } => {
                write!(f, "invalid points: {raw} (expected a non-negative integer)")
            }
            ArgsError::InvalidTopic { raw } => write!(f, "invalid topic id: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    scores: ScoreStore,
}

impl UiApp for DesktopApp {
    fn scores(&self) -> ScoreStore {
        self.scores.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui          [--db <sqlite_url>] [--flush-ms <ms>]");
    eprintln!("  cargo run -p app -- show        [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- award <points> [<topic>] [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- reset-topic <topic>      [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- reset-all                [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:tutor.sqlite3");
    eprintln!("  --flush-ms 300");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TUTOR_DB_URL, TUTOR_SCORE_FLUSH_MS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Ui,
    Show,
    Award { points: Points, topic: Option<TopicId> },
    ResetTopic(TopicId),
    ResetAll,
}

struct Args {
    db_url: String,
    config: ScoreConfig,
    positional: Vec<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("TUTOR_DB_URL").unwrap_or_else(|_| "sqlite:tutor.sqlite3".into());
        let mut config = ScoreConfig::from_env();
        let mut positional = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--flush-ms" => {
                    let value = require_value(args, "--flush-ms")?;
                    let ms: u64 = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidFlushMs { raw: value.clone() })?;
                    config = config.with_flush_delay(Duration::from_millis(ms));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        Ok(Self {
            db_url: normalize_sqlite_url(db_url),
            config,
            positional,
        })
    }
}

fn parse_command(name: Option<&str>, positional: &[String]) -> Result<Command, ArgsError> {
    let mut rest = positional.iter();
    let command = match name {
        None | Some("ui") => Command::Ui,
        Some("show") => Command::Show,
        Some("reset-all") => Command::ResetAll,
        Some("reset-topic") => {
            let raw = rest.next().ok_or(ArgsError::MissingArgument { what: "<topic>" })?;
            Command::ResetTopic(parse_topic(raw)?)
        }
        Some("award") => {
            let raw = rest.next().ok_or(ArgsError::MissingArgument { what: "<points>" })?;
            let points = raw
                .parse::<Points>()
                .map_err(|_| ArgsError::InvalidPoints { raw: raw.clone() })?;
            let topic = rest.next().map(|raw| parse_topic(raw)).transpose()?;
            Command::Award { points, topic }
        }
        Some(other) => return Err(ArgsError::UnknownArg(other.to_string())),
    };

    if let Some(extra) = rest.next() {
        return Err(ArgsError::UnknownArg(extra.clone()));
    }
    Ok(command)
}

fn parse_topic(raw: &str) -> Result<TopicId, ArgsError> {
    TopicId::new(raw).map_err(|_| ArgsError::InvalidTopic {
        raw: raw.to_string(),
    })
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn print_scores(scores: &ScoreStore) {
    let board = scores.board();
    println!("global: {}", board.global());
    if board.topics().is_empty() {
        println!("topics: (none)");
        return;
    }
    for (topic, points) in board.topics() {
        println!("  {topic}: {points}");
    }
}

/// Write immediately before exit. A failed write is logged, not reported as a
/// command failure.
async fn persist(scores: &ScoreStore) {
    if let Err(err) = scores.flush_now().await {
        tracing::warn!(error = %err, "scores were not saved");
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let name = match argv.first().map(String::as_str) {
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if !first.starts_with("--") => Some(argv.remove(0)),
        _ => None,
    };

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter)
        .and_then(|args| {
            let command = parse_command(name.as_deref(), &args.positional)?;
            Ok((args, command))
        })
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    let (args, command) = parsed;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    if let Err(err) = prepare_sqlite_file(&args.db_url) {
        tracing::warn!(db = %args.db_url, error = %err, "could not prepare score database file");
    }
    let services = AppServices::new_sqlite(&args.db_url, Clock::system(), args.config).await?;
    let scores = services.scores();
    tracing::debug!(db = %args.db_url, flush_delay = ?args.config.flush_delay, "services ready");

    match command {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { scores });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Grade 6 Math Tutor")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Show => {
            print_scores(&scores);
            Ok(())
        }
        Command::Award { points, topic } => {
            scores.add_points(points, topic.as_ref());
            persist(&scores).await;
            print_scores(&scores);
            Ok(())
        }
        Command::ResetTopic(topic) => {
            scores.reset_topic(&topic);
            persist(&scores).await;
            print_scores(&scores);
            Ok(())
        }
        Command::ResetAll => {
            scores.reset_all();
            persist(&scores).await;
            print_scores(&scores);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
