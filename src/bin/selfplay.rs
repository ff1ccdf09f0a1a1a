use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use connect_four::ai::{Agent, MinimaxAgent, RandomAgent};
use connect_four::config::{AppConfig, MAX_SEARCH_DEPTH};
use connect_four::game::{Board, GameOutcome, GameState, Side, COLS, ROWS};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    Minimax,
    Random,
}

/// Play computer-vs-computer games without the terminal UI.
#[derive(Parser)]
#[command(name = "selfplay", about = "Run headless Connect Four games")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Agent playing Red
    #[arg(long, value_enum, default_value = "minimax")]
    red: AgentKind,

    /// Agent playing Yellow
    #[arg(long, value_enum, default_value = "minimax")]
    yellow: AgentKind,

    /// Search depth for Red (defaults to the configured depth)
    #[arg(long)]
    red_depth: Option<u32>,

    /// Search depth for Yellow (defaults to the configured depth)
    #[arg(long)]
    yellow_depth: Option<u32>,

    /// Seed for random agents; game `i` uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final board of every game
    #[arg(long)]
    show: bool,

    /// Start every game from the board in this file (`.`, `R`, `Y` rows)
    #[arg(long)]
    start: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,
}

#[derive(Default)]
struct Tally {
    red_wins: usize,
    yellow_wins: usize,
    draws: usize,
    total_moves: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let red_depth = cli.red_depth.unwrap_or(config.search.depth);
    let yellow_depth = cli.yellow_depth.unwrap_or(config.search.depth);
    for depth in [red_depth, yellow_depth] {
        if depth > MAX_SEARCH_DEPTH {
            bail!("depth {depth} exceeds the maximum of {MAX_SEARCH_DEPTH}");
        }
    }
    if cli.games == 0 {
        bail!("--games must be at least 1");
    }

    let start = match &cli.start {
        Some(path) => load_start(path)?,
        None => GameState::initial(),
    };

    let mut tally = Tally::default();
    for game in 0..cli.games {
        let seed = cli.seed.map(|s| s.wrapping_add(game as u64));
        let mut red = build_agent(cli.red, red_depth, seed);
        let mut yellow = build_agent(cli.yellow, yellow_depth, seed.map(|s| !s));

        let state = play_game(start, red.as_mut(), yellow.as_mut())?;
        let outcome = state
            .outcome()
            .context("finished game has no outcome")?;

        match outcome {
            GameOutcome::Winner(Side::Red) => tally.red_wins += 1,
            GameOutcome::Winner(Side::Yellow) => tally.yellow_wins += 1,
            GameOutcome::Draw => tally.draws += 1,
        }
        tally.total_moves += state.move_count();

        let result = match outcome {
            GameOutcome::Winner(side) => format!("{} wins", side.name()),
            GameOutcome::Draw => "draw".to_string(),
        };
        println!(
            "game {:>3}: {} ({} {} vs {} {}) in {} moves",
            game + 1,
            result,
            red.name(),
            Side::Red.name(),
            yellow.name(),
            Side::Yellow.name(),
            state.move_count()
        );
        if cli.show {
            println!("{}\n", state.board());
        }
    }

    println!(
        "\nRed {}  Yellow {}  Draws {}  |  avg length {:.1} moves",
        tally.red_wins,
        tally.yellow_wins,
        tally.draws,
        tally.total_moves as f64 / cli.games as f64
    );
    Ok(())
}

fn build_agent(kind: AgentKind, depth: u32, seed: Option<u64>) -> Box<dyn Agent> {
    match kind {
        AgentKind::Minimax => Box::new(MinimaxAgent::new(depth)),
        AgentKind::Random => match seed {
            Some(seed) => Box::new(RandomAgent::with_seed(seed)),
            None => Box::new(RandomAgent::new()),
        },
    }
}

fn load_start(path: &Path) -> Result<GameState> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading start board {}", path.display()))?;
    let board: Board = text
        .parse()
        .with_context(|| format!("parsing start board {}", path.display()))?;
    let state = GameState::from_board(board, side_to_move(&board)?);
    if state.is_terminal() {
        bail!("start board {} is already decided", path.display());
    }
    Ok(state)
}

/// Red moves first, so the side to move follows from the disc counts.
fn side_to_move(board: &Board) -> Result<Side> {
    let (mut red, mut yellow) = (0usize, 0usize);
    for row in 0..ROWS {
        for col in 0..COLS {
            match board.get(row, col).side() {
                Some(Side::Red) => red += 1,
                Some(Side::Yellow) => yellow += 1,
                None => {}
            }
        }
    }
    match red.checked_sub(yellow) {
        Some(0) => Ok(Side::Red),
        Some(1) => Ok(Side::Yellow),
        _ => bail!("board has {red} red and {yellow} yellow discs"),
    }
}

fn play_game<'a>(
    start: GameState,
    red: &'a mut dyn Agent,
    yellow: &'a mut dyn Agent,
) -> Result<GameState> {
    let mut state = start;

    while !state.is_terminal() {
        let side = state.current_side();
        let agent = match side {
            Side::Red => &mut *red,
            Side::Yellow => &mut *yellow,
        };
        let Some(column) = agent.select_action(&state) else {
            bail!("{} found no move on a live board", agent.name());
        };
        state
            .apply_move(column)
            .with_context(|| format!("{} played column {column}", agent.name()))?;
    }

    log::info!(
        "game finished after {} moves: {:?}",
        state.move_count(),
        state.outcome()
    );
    Ok(state)
}
