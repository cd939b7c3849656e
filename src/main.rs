use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_games::config::{AppConfig, LoggingConfig, SeatConfig};
use grid_games::game::{Board, GameManager, GameOutcome, PlayerFactory, PlayerKind, Symbol};
use grid_games::games::{AnyBoard, BoardSettings, GameKind};
use grid_games::ui::{ConsoleUi, TerminalUi, Ui};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Two-player grid games against humans or the computer.
#[derive(Parser, Debug)]
#[command(name = "grid-games", version, about)]
struct Cli {
    /// Variant to play
    #[arg(short, long, value_enum)]
    game: Option<GameKind>,

    /// Kind of the first player
    #[arg(long, value_enum)]
    first: Option<PlayerKind>,

    /// Kind of the second player
    #[arg(long, value_enum)]
    second: Option<PlayerKind>,

    /// Seed for reproducible computer moves and obstacles
    #[arg(long)]
    seed: Option<u64>,

    /// Minimax search depth (1-10)
    #[arg(long)]
    depth: Option<u32>,

    /// Disable alpha-beta pruning
    #[arg(long)]
    no_pruning: bool,

    /// Word list for the word game
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Line-based console instead of the full-screen UI
    #[arg(long)]
    plain: bool,

    /// Configuration file
    #[arg(short, long, default_value = AppConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// List the variants and exit
    #[arg(long)]
    list: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Command-line flags win over the file.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(game) = self.game {
            config.session.game = game;
        }
        if let Some(kind) = self.first {
            config.players.first.kind = kind;
        }
        if let Some(kind) = self.second {
            config.players.second.kind = kind;
        }
        if self.seed.is_some() {
            config.session.seed = self.seed;
        }
        if self.depth.is_some() {
            config.ai.depth = self.depth;
        }
        if self.no_pruning {
            config.ai.pruning = false;
        }
        if let Some(path) = &self.dictionary {
            config.word.dictionary = path.clone();
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        for kind in GameKind::ALL {
            let name = kind
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default();
            println!("{name:<14} {:<28} {}", kind.title(), kind.rules());
        }
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    cli.apply(&mut config);
    config.validate().context("invalid settings")?;

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    init_tracing(&config.logging, cli.plain)?;

    let kind = config.session.game;
    let settings = BoardSettings {
        seed: config.session.seed.unwrap_or_else(rand::random),
        dictionary: config.word.dictionary.clone(),
    };
    let board = kind
        .build(&settings)
        .with_context(|| format!("cannot start {kind}"))?;
    let factory = PlayerFactory {
        computer: kind.computer_strategy(),
        depth: config.ai.depth_for(kind),
        pruning: config.ai.pruning,
        seed: config.session.seed,
    };
    info!(game = %kind, depth = factory.depth, seed = ?config.session.seed, "starting");

    let seats = config.players.seats();
    let outcome = match board {
        AnyBoard::Letters(board) => play(board, kind, &factory, &seats, cli.plain)?,
        AnyBoard::Numbers(board) => play(board, kind, &factory, &seats, cli.plain)?,
    };
    info!(?outcome, "done");
    Ok(())
}

fn play<S: Symbol>(
    board: Box<dyn Board<Symbol = S>>,
    kind: GameKind,
    factory: &PlayerFactory,
    seats: &[SeatConfig; 2],
    plain: bool,
) -> Result<GameOutcome> {
    if plain {
        let mut ui = ConsoleUi::stdio();
        Ui::<S>::show_message(&mut ui, &format!("{kind}: {}", kind.rules()))?;
        let mut manager = GameManager::setup(board, ui, factory, seats)?;
        return Ok(manager.run()?);
    }

    let ui = TerminalUi::enter(kind).context("cannot open the terminal UI")?;
    let mut manager = GameManager::setup(board, ui, factory, seats)?;
    let outcome = manager.run()?;
    let summary = outcome.describe(manager.players());
    // Restore the terminal before printing.
    drop(manager);
    println!("{summary}");
    Ok(outcome)
}

fn init_tracing(logging: &LoggingConfig, plain: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.filter))
        .context("invalid logging.filter")?;

    match (&logging.file, plain) {
        (Some(path), _) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        (None, true) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // The full-screen UI owns the terminal.
        (None, false) => {}
    }
    Ok(())
}
