use anyhow::Result;
use clap::Parser;
use tracing::info;

use std::io::{stdin, stdout, Write};

use connect4_minimax::*;

mod config;
use config::*;

mod display;
use display::*;

mod simulation;

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Play(args) => play(&args),
        Command::Simulate(args) => simulate(&args),
    }
}

fn play(args: &PlayArgs) -> Result<()> {
    let (human, ai) = if args.ai_first {
        (Piece::Two, Piece::One)
    } else {
        (Piece::One, Piece::Two)
    };
    let mut agent = MinimaxAgent::with_config(ai, args.search_config()?);
    let mut grid = Grid::new();
    let mut to_move = Piece::One;

    let stdin = stdin();

    println!("Welcome to Connect 4\n");
    println!(
        "You play {}, enter a column from 1 to {} or 'q' to quit\n",
        piece_name(human),
        WIDTH
    );

    // game loop
    while !grid.is_over() {
        draw(&grid)?;

        let column = if to_move == ai {
            println!("AI is thinking...");
            stdout().flush()?;

            let column = agent.choose_move(&grid)?;
            println!("AI plays column {}", column);
            column

        // human player
        } else {
            print!("Move input > ");
            stdout().flush()?;
            let mut input_str = String::new();
            if stdin.read_line(&mut input_str)? == 0 {
                return Ok(());
            }

            let input = input_str.trim();
            if input.eq_ignore_ascii_case("q") {
                println!("Bye!");
                return Ok(());
            }
            match input.parse::<usize>() {
                Err(_) => {
                    println!("Invalid number: {}", input);
                    continue;
                }
                Ok(column) => column,
            }
        };

        if let Err(err) = grid.drop(column, to_move) {
            println!("{}", err);
            // try the move again
            continue;
        }
        to_move = to_move.opponent();
    }

    // end states
    draw(&grid)?;
    match grid.winner() {
        Some(piece) if piece == human => println!("You win!"),
        Some(piece) => println!("{} wins!", piece_name(piece)),
        None => println!("It's a tie!"),
    }
    println!("The game lasted {} moves", grid.move_count());
    Ok(())
}

fn simulate(args: &SimulateArgs) -> Result<()> {
    let config = args.search_config()?;
    info!(games = args.games, depth = config.depth(), pruning = config.pruning(), "starting simulation");

    let summary = simulation::run(args.games, config, args.seed)?;

    println!("Games played:  {}", summary.games);
    println!("Minimax wins:  {}", summary.minimax_wins);
    println!("Greedy wins:   {}", summary.greedy_wins);
    println!("Ties:          {}", summary.ties);
    println!("Average moves: {:.2}", summary.average_moves());
    Ok(())
}
