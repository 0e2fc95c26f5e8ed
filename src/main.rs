// main.rs - Aeroplane Chess arena: pits two agents against each other
use clap::Parser;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::error::Error;
use std::path::PathBuf;

use aeroplane_chess::arena::{play_match, MatchConfig, Seat};
use aeroplane_chess::game::board::Color;
use aeroplane_chess::logging::setup_logging;
use aeroplane_chess::recording::{MatchRecord, ResultsWriter};
use aeroplane_chess::{create_agent, AgentConfig, AgentKind};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentKindCli {
    Random,
    Expectimax,
    Mcts,
    Rl,
}

impl From<AgentKindCli> for AgentKind {
    fn from(cli: AgentKindCli) -> Self {
        match cli {
            AgentKindCli::Random => AgentKind::Random,
            AgentKindCli::Expectimax => AgentKind::Expectimax,
            AgentKindCli::Mcts => AgentKind::Mcts,
            AgentKindCli::Rl => AgentKind::Rl,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "aeroplane_chess", about = "Play Aeroplane Chess matches between AI agents")]
struct Config {
    /// Agent playing Blue (moves first)
    #[arg(long, value_enum, default_value = "expectimax")]
    blue: AgentKindCli,

    /// Agent playing Green
    #[arg(long, value_enum, default_value = "random")]
    green: AgentKindCli,

    /// Number of games to play
    #[arg(short = 'g', long, default_value_t = 10)]
    games: usize,

    /// RNG seed for dice and agents
    #[arg(short = 'r', long, default_value_t = 2025)]
    seed: u64,

    /// Die rolls before an unfinished game is declared a draw
    #[arg(long, default_value_t = 2000)]
    max_turns: usize,

    /// JSON file overriding agent hyperparameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV path to append match results
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the board after every move
    #[arg(long, default_value_t = false)]
    show_board: bool,

    /// Write rotating log files to this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Config::parse();
    let _logger = setup_logging(args.log_dir.as_deref())?;

    if args.games == 0 || args.max_turns == 0 {
        return Err("Both --games and --max-turns must be at least 1.".into());
    }

    let agent_config = match &args.config {
        Some(path) => AgentConfig::from_json_file(path)?,
        None => AgentConfig::default(),
    };

    let kinds = (AgentKind::from(args.blue), AgentKind::from(args.green));
    log::info!("✈️  Aeroplane Chess: {} (B) vs {} (G)", kinds.0, kinds.1);
    log::info!("   Games: {}, Seed: {}, Max turns: {}", args.games, args.seed, args.max_turns);

    let mut rng = StdRng::seed_from_u64(args.seed);

    // Seats live across games so learning agents keep their value tables.
    let mut seats = vec![
        Seat::new(create_agent(kinds.0, Color::Blue, &agent_config, rng.random())),
        Seat::new(create_agent(kinds.1, Color::Green, &agent_config, rng.random())),
    ];
    let match_config = MatchConfig {
        max_turns: args.max_turns,
        show_board: args.show_board,
        weights: agent_config.evaluation.clone(),
    };

    let mut records = Vec::with_capacity(args.games);
    let (mut blue_wins, mut green_wins, mut draws) = (0usize, 0usize, 0usize);
    let mut total_turns = 0usize;

    for game_idx in 0..args.games {
        let game_seed: u64 = rng.random();
        let mut game_rng = StdRng::seed_from_u64(game_seed);
        let outcome = play_match(&mut seats, &match_config, &mut game_rng)?;

        match outcome.winner {
            Some(Color::Blue) => blue_wins += 1,
            Some(_) => green_wins += 1,
            None => draws += 1,
        }
        total_turns += outcome.turns;

        log::info!(
            "Game {:3}/{} | winner: {} | turns: {} | B:{:.1}% G:{:.1}%",
            game_idx + 1,
            args.games,
            outcome.winner.map_or_else(|| "draw".to_string(), |c| c.to_string()),
            outcome.turns,
            100.0 * blue_wins as f64 / (game_idx + 1) as f64,
            100.0 * green_wins as f64 / (game_idx + 1) as f64,
        );
        records.push(MatchRecord::from_outcome(game_idx, game_seed, kinds, &outcome));
    }

    println!("\n{}", "=".repeat(60));
    println!("===== Arena Results =====");
    println!("Games played       : {}", args.games);
    println!("Blue  ({:<10}) : {} wins ({:.1}%)", kinds.0.to_string(), blue_wins, 100.0 * blue_wins as f64 / args.games as f64);
    println!("Green ({:<10}) : {} wins ({:.1}%)", kinds.1.to_string(), green_wins, 100.0 * green_wins as f64 / args.games as f64);
    println!("Draws              : {}", draws);
    println!("Mean turns / game  : {:.1}", total_turns as f64 / args.games as f64);
    for seat in &seats {
        println!(
            "{} decision latency : mean {:?}, max {:?} over {} decisions",
            seat.color(),
            seat.latency.mean(),
            seat.latency.max,
            seat.latency.decisions
        );
    }
    println!("{}", "=".repeat(60));

    if let Some(path) = &args.output {
        let writer = ResultsWriter::new(path);
        writer.append(&records)?;
        log::info!("✅ Results appended to {}", path.display());
    }

    Ok(())
}
