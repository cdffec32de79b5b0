use std::io::{self, BufRead, Write};

use futures_util::stream;
use rumor_core::{
    CommandParser, GameClock, GameConfig, InnContent, Narrator, PatronRegistry, Scheduler,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const CONFIG_ENV: &str = "RUMOR_MILL_CONFIG";
const DEFAULT_CONTENT: &str = include_str!("../content/rumor_mill.toml");

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .init();
}

/// Player-facing text goes to stdout; logs stay on stderr.
#[derive(Debug, Default)]
struct Console;

impl Narrator for Console {
    fn say(&mut self, line: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

fn load_config() -> GameConfig {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => match GameConfig::load(&path) {
            Ok(config) => {
                info!(%path, "config loaded");
                config
            }
            Err(err) => {
                warn!(%path, error = %err, "using default config");
                GameConfig::default()
            }
        },
        Err(_) => GameConfig::default(),
    }
}

/// Reads stdin on a dedicated thread so a pending read never holds up the
/// runtime on exit.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);

    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    rx
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = load_config();
    let content = match InnContent::from_toml_str(DEFAULT_CONTENT) {
        Ok(content) => content,
        Err(err) => {
            error!(error = %err, "built-in content is broken");
            return;
        }
    };

    let registry = PatronRegistry::from_config(&config);
    let mut inn = content.build(&config, config.rng());
    let roster = inn.roster().to_vec();
    let visits = registry.plan(&roster, inn.rng());

    let mut console = Console;
    console.say(inn.intro());

    let clock = GameClock::starting_at_hour(config.start_hour);
    let (mut scheduler, handle) =
        Scheduler::with_capacity(inn, clock, Box::new(Console), config.inbox_capacity);
    let report = registry.seed(&mut scheduler, &visits);
    info!(seeded = report.scheduled, "starting game at {clock}");

    let game = tokio::spawn(scheduler.run());

    let interrupt = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted");
            interrupt.cancel();
        }
    });

    let lines = stream::unfold(spawn_stdin_reader(), |mut rx| async move {
        rx.recv().await.map(|line| (line, rx))
    });
    let parser = CommandParser::default();
    let submitted = parser.feed(Box::pin(lines), &handle, &mut console).await;

    match game.await {
        Ok(scheduler) => info!(
            submitted,
            fired = scheduler.fired(),
            clock = %scheduler.clock(),
            rebukes = scheduler.world().rebukes(),
            "game over"
        ),
        Err(err) => error!(error = %err, "event loop panicked"),
    }
}
