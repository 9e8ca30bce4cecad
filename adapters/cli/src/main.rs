#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs an Escape Room game on stdin and stdout.

mod assets;
mod config;
mod render;
mod report;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::mpsc::Sender,
    thread,
};

use anyhow::Result;
use clap::Parser;
use escape_room_system_command_input::{command_channel, next_input, Vocabulary};
use escape_room_system_session::{Phase, Session};
use escape_room_world::query;

use crate::config::{BoardSection, FileConfig};

/// Escape Room - find the exit of a trapped maze
#[derive(Parser, Debug)]
#[command(name = "escape-room")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with a [board] table of walls, traps, prizes and seed
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of walls on generated boards (default: 20)
    #[arg(long)]
    walls: Option<u32>,

    /// Number of traps on generated boards (default: 8)
    #[arg(long)]
    traps: Option<u32>,

    /// Number of prizes on generated boards (default: 3)
    #[arg(long)]
    prizes: Option<u32>,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the board after every command
    #[arg(long)]
    render: bool,

    /// Directory holding grid.png, coin.png and player.png
    #[arg(long, default_value = "assets")]
    assets_dir: PathBuf,
}

impl Args {
    fn board_flags(&self) -> BoardSection {
        BoardSection {
            walls: self.walls,
            traps: self.traps,
            prizes: self.prizes,
            seed: self.seed,
        }
    }
}

/// Entry point for the Escape Room command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = config::resolve(&file, args.board_flags(), rand::random::<u64>);
    log::info!(
        "starting with {} walls, {} traps, {} prizes, seed {}",
        config.walls(),
        config.traps(),
        config.prizes(),
        config.rng_seed()
    );

    let missing = assets::probe(&args.assets_dir);
    if !missing.is_empty() {
        log::info!("{} asset(s) missing, board art disabled", missing.len());
    }

    let mut session = Session::new(config);
    let (sender, mut source) = command_channel();
    let _reader = thread::spawn(move || forward_stdin(sender));

    println!("{}", query::welcome_banner(session.world()));
    println!("Traps on this board: {}", query::total_traps(session.world()));
    if args.render {
        print!("{}", render::render(&query::board_view(session.world())));
    }

    let mut notices = Vec::new();
    loop {
        let vocabulary = match session.phase() {
            Phase::AwaitingCommand => Vocabulary::Commands,
            Phase::AwaitingDetrapDecision => Vocabulary::Confirmation,
            Phase::Finished => break,
        };
        let prompt = report::prompt(vocabulary);
        show_prompt(&prompt);

        let input = next_input(&mut source, vocabulary, |_| {
            println!("{}", report::RETRY);
            show_prompt(&prompt);
        });
        match input {
            Some(input) => session.handle(input, &mut notices),
            None => {
                println!();
                session.end_of_input(&mut notices);
            }
        }

        for notice in notices.drain(..) {
            if let Some(text) = report::describe(&notice) {
                println!("{text}");
            }
        }
        if args.render && session.phase() != Phase::Finished {
            print!("{}", render::render(&query::board_view(session.world())));
        }
    }

    Ok(())
}

fn show_prompt(prompt: &str) {
    print!("{prompt}");
    if let Err(error) = io::stdout().flush() {
        log::warn!("failed to flush prompt: {error}");
    }
}

/// Forwards stdin lines into the command channel until either side closes.
fn forward_stdin(sender: Sender<String>) {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                log::warn!("stopped reading stdin: {error}");
                break;
            }
        };
        if sender.send(line).is_err() {
            break;
        }
    }
}
