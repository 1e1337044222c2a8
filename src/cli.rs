use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use crate::cards::{parse_card, parse_cards, Card};
use crate::config::EngineConfig;
use crate::display::{
    card_display, cards_display, estimate_table, print_error, section, state_summary,
    trick_display,
};
use crate::engine::MonteCarloEngine;
use crate::error::{BriscolaError, BriscolaResult};
use crate::evaluator::resolve_trick;
use crate::game_state::{CardSet, GameState, Side};
use crate::logging::init_logging;
use crate::wire::{encode_response, parse_state};

#[derive(Parser)]
#[command(
    name = "briscola",
    version = "1.0.0",
    about = "Monte Carlo card advisor for Briscola."
)]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EngineArgs {
    /// Engine config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Number of simulated games
    #[arg(short = 'n', long, global = true)]
    samples: Option<usize>,
    /// RNG seed for reproducible estimates
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Spread simulations over all cores
    #[arg(long, global = true)]
    parallel: bool,
}

impl EngineArgs {
    fn resolve(&self) -> BriscolaResult<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_path(path)?,
            None => EngineConfig::default(),
        };
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.parallel {
            config.parallel = true;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args)]
struct PositionArgs {
    /// Your three cards, by id or notation (e.g., 0,10,20 or AD,AC,AS)
    #[arg(long)]
    hand: String,
    /// Trump card
    #[arg(short, long)]
    trump: String,
    /// Cards already played (0-based ids or notation)
    #[arg(short, long, default_value = "")]
    spent: String,
    /// Current score as "yours,theirs"
    #[arg(short, long, default_value = "0,0")]
    points: String,
    /// The opponent leads the next trick
    #[arg(long)]
    opponent_leads: bool,
}

impl PositionArgs {
    fn to_state(&self) -> BriscolaResult<GameState> {
        let hand = parse_cards(&self.hand)?;
        let trump = parse_card(&self.trump)?;
        let spent: CardSet = parse_cards(&self.spent)?.into_iter().collect();
        let points = parse_points(&self.points)?;
        let first = if self.opponent_leads {
            Side::Opponent
        } else {
            Side::Player
        };
        GameState::new(points, &hand, spent, first, trump)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a JSON decision query (file or stdin) with {"ps":[...]}
    Solve {
        /// Request file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Estimate win probabilities for each card in hand
    Analyze {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Resolve a single trick
    Trick {
        /// Card played first
        leader: String,
        /// Card played second
        follower: String,
        /// Trump card
        #[arg(short, long)]
        trump: String,
    },
    /// Show the unseen deck for a position
    Deck {
        #[command(flatten)]
        position: PositionArgs,
    },
}

fn parse_points(s: &str) -> BriscolaResult<(u32, u32)> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let parse = |p: &str| {
        p.parse::<u32>()
            .map_err(|_| BriscolaError::MalformedInput(format!("invalid points: {}", s)))
    };
    match parts.as_slice() {
        [own, opp] => Ok((parse(*own)?, parse(*opp)?)),
        _ => Err(BriscolaError::MalformedInput(format!(
            "points must be \"yours,theirs\", got {}",
            s
        ))),
    }
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    init_logging(cli.verbose);
    let result = match cli.command {
        Commands::Solve { file } => cli.engine.resolve().and_then(|c| cmd_solve(file, c)),
        Commands::Analyze { position } => {
            cli.engine.resolve().and_then(|c| cmd_analyze(&position, c))
        }
        Commands::Trick {
            leader,
            follower,
            trump,
        } => cmd_trick(&leader, &follower, &trump),
        Commands::Deck { position } => cmd_deck(&position),
    };
    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn cmd_solve(file: Option<PathBuf>, config: EngineConfig) -> BriscolaResult<()> {
    let body = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let state = parse_state(&body)?;
    debug!(?state, "decoded request");
    let estimate = MonteCarloEngine::new(config)?.estimate(&state)?;
    println!("{}", encode_response(&estimate)?);
    Ok(())
}

fn cmd_analyze(position: &PositionArgs, config: EngineConfig) -> BriscolaResult<()> {
    println!("{}", analyze_report(position, config)?);
    Ok(())
}

fn analyze_report(position: &PositionArgs, config: EngineConfig) -> BriscolaResult<String> {
    let state = position.to_state()?;
    let samples = config.samples;
    let estimate = MonteCarloEngine::new(config)?.estimate(&state)?;

    let mut out = state_summary(&state);
    if estimate.terminal {
        out.push_str(&section(
            "No decision left",
            "Too few tricks remain to simulate; play any card.",
        ));
        return Ok(out);
    }
    out.push('\n');
    out.push_str(&estimate_table(&state, &estimate));
    if let Some(best) = estimate.best_slot() {
        out.push_str(&section(
            "Suggested play",
            &format!(
                "{} (slot {}) over {} simulated games",
                card_display(state.hand()[best]),
                best,
                samples
            ),
        ));
    }
    Ok(out)
}

fn cmd_trick(leader: &str, follower: &str, trump: &str) -> BriscolaResult<()> {
    println!("{}", trick_report(leader, follower, trump)?);
    Ok(())
}

fn trick_report(leader: &str, follower: &str, trump: &str) -> BriscolaResult<String> {
    let leader: Card = parse_card(leader)?;
    let follower: Card = parse_card(follower)?;
    let trump: Card = parse_card(trump)?;
    if leader == follower {
        return Err(BriscolaError::MalformedInput(
            "leader and follower must be different cards".to_string(),
        ));
    }
    let outcome = resolve_trick(leader, follower, trump);
    Ok(trick_display(leader, follower, &outcome))
}

fn cmd_deck(position: &PositionArgs) -> BriscolaResult<()> {
    println!("{}", deck_report(position)?);
    Ok(())
}

fn deck_report(position: &PositionArgs) -> BriscolaResult<String> {
    let state = position.to_state()?;
    let deck = state.deck_cards();
    let mut out = state_summary(&state);
    out.push_str(&section(
        &format!("Unseen deck ({} cards, trump last)", deck.len()),
        &cards_display(&deck),
    ));
    out.push_str(&format!(
        "\n  {} {}",
        "Tricks to simulate:".bold(),
        state.n_hands_left()
    ));
    Ok(out)
}
