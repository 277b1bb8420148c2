use crate::bot::{Bot, Difficulty};
use crate::console::ConsoleHost;
use crate::error::GameError;
use crate::game::options::DEFAULT_INTUITION_ACCURACY;
use crate::game::{GameOptions, Lobby};
use crate::session::{Seat, Session};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::RngCore;
use std::io::{self, BufRead, Write};

mod bot;
mod console;
mod error;
mod game;
mod session;

/// Names given to the computer-controlled players in single-player mode.
const BOT_NAMES: [&str; 9] = [
    "john", "bob", "robin", "elizabeth", "alice", "danny", "alphonso", "sedrick", "darius",
];

#[derive(Parser)]
#[command(name = "mafia-host", about = "Host a game of Mafia at the console")]
struct Cli {
    /// Seed for role dealing, tie-breaks and hints; random if omitted
    #[arg(long, env = "MAFIA_SEED", global = true)]
    seed: Option<u64>,
    /// Probability that a villager's intuition hint is correct
    #[arg(long, env = "MAFIA_INTUITION_ACCURACY", default_value_t = DEFAULT_INTUITION_ACCURACY, global = true)]
    intuition_accuracy: f64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Every seat is a human, passing one device around
    Hotseat {
        /// Player names; prompted for if omitted
        names: Vec<String>,
    },
    /// Play against computer-controlled players
    Solo {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, value_enum, default_value_t = Difficulty::Normal)]
        difficulty: Difficulty,
        /// Total number of players, including you
        #[arg(short, long, default_value_t = 10)]
        players: usize,
    },
}

fn main() {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{:#}", err);
        eprintln!("error: {:#}", err);
        // Bad setup exits with 2, anything that goes wrong mid-game with 1
        let setup = matches!(err.downcast_ref::<GameError>(), Some(e) if e.is_configuration());
        std::process::exit(if setup { 2 } else { 1 });
    }
}

fn run(cli: Cli) -> Result<()> {
    let opts = GameOptions { intuition_accuracy: cli.intuition_accuracy };
    let mut rng = rand::thread_rng();
    let seed = cli.seed.unwrap_or_else(|| rng.next_u64());
    log::info!("starting with seed {}", seed);

    let stdin = io::stdin();
    match cli.command {
        Commands::Hotseat { names } => {
            let mut host = ConsoleHost::new(stdin.lock(), io::stdout(), true);
            let lobby = if names.is_empty() {
                fill_lobby(&mut host, opts)?
            } else {
                let mut lobby = Lobby::new(opts, names.len())?;
                for name in names.iter() {
                    lobby.add_player(name)?;
                }
                lobby
            };
            let seats = vec![Seat::Human; lobby.num_players()];
            Session::new(lobby.start(seed)?, seats, host)?.run()
        }
        Commands::Solo { name, difficulty, players } => {
            let host = ConsoleHost::new(stdin.lock(), io::stdout(), false);
            let mut lobby = Lobby::new(opts, players)?;
            lobby.add_player(&name)?;
            let mut fallback = 1..;
            while !lobby.is_full() {
                let bot_name = match BOT_NAMES.get(lobby.players().len() - 1) {
                    Some(name) => name.to_string(),
                    None => format!("bot{}", fallback.next().unwrap_or_default()),
                };
                if lobby.add_player(&bot_name).is_err() {
                    lobby.add_player(&format!("bot{}", fallback.next().unwrap_or_default()))?;
                }
            }
            let seats = (0..players)
                .map(|seat| match seat {
                    0 => Seat::Human,
                    _ => Seat::Bot(Bot::new(seat, difficulty, seed.wrapping_add(seat as u64))),
                })
                .collect();
            Session::new(lobby.start(seed)?, seats, host)?.run()
        }
    }
}

/// Asks for the number of players and their names until the lobby is full.
fn fill_lobby<R: BufRead, W: Write>(host: &mut ConsoleHost<R, W>, opts: GameOptions) -> Result<Lobby> {
    let mut lobby = loop {
        let answer = host.ask("Enter number of players:")?;
        let count = answer.parse::<usize>().context("not a number");
        match count.and_then(|n| Lobby::new(opts, n).map_err(Into::into)) {
            Ok(lobby) => break lobby,
            Err(err) => eprintln!("{:#}", err),
        }
    };
    while !lobby.is_full() {
        let name = host.ask(&format!("Player {} name:", lobby.players().len() + 1))?;
        if let Err(err) = lobby.add_player(&name) {
            eprintln!("{}", err);
        }
    }
    Ok(lobby)
}
