//! Two-player console chess.
//!
//! Reads four-character move tokens (e.g. `e2e4`) from stdin, one per turn,
//! renders the board after every committed move, and stops on checkmate or
//! the `quit` sentinel. Engine diagnostics go to stderr via `RUST_LOG`.

mod render;

use gambit_core::{Color, Move, Promotion, Square};
use gambit_engine::{Game, PromotionChooser};
use render::render;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Promotion chooser that prompts on the console and re-prompts until the
/// answer names one of the four legal kinds.
struct ConsolePromotion;

impl PromotionChooser for ConsolePromotion {
    fn choose(&mut self, _color: Color, _square: Square) -> Promotion {
        let stdin = io::stdin();
        loop {
            print!("Pawn promotion! Choose piece (Q=Queen, R=Rook, B=Bishop, N=Knight): ");
            let _ = io::stdout().flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => {
                    // Input is gone; say so instead of spinning on EOF.
                    println!("\nInput closed; promoting to Queen.");
                    return Promotion::Queen;
                }
                Ok(_) => {}
                Err(err) => {
                    eprintln!("Failed to read input: {err}");
                    continue;
                }
            }

            if let Some(choice) = line.trim().chars().next().and_then(Promotion::from_char) {
                return choice;
            }
            println!("Invalid choice. Please enter Q, R, B, or N.");
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut game = Game::new(ConsolePromotion);
    println!("{}", render(game.board()));

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        if let Some(color) = game.in_check() {
            println!("{color} is in check!");
        }
        print!("{} to move (e.g., e2e4): ", game.side_to_move());
        let _ = io::stdout().flush();

        input.clear();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("Failed to read input: {err}");
                break;
            }
        }
        let token = input.trim();
        if token.is_empty() {
            continue;
        }
        if token == "quit" {
            break;
        }

        let mv = match Move::from_token(token) {
            Ok(mv) => mv,
            Err(err) => {
                println!("Invalid move: {err}. Try again.");
                continue;
            }
        };

        match game.submit_move(mv) {
            Ok(()) => {
                println!("{}", render(game.board()));
                if let Some(loser) = game.in_checkmate() {
                    println!("Checkmate! {loser} loses; {} wins!", loser.opposite());
                    println!("Game over. Thanks for playing!");
                    break;
                }
            }
            Err(err) => println!("Invalid move: {err}. Try again."),
        }
    }
}
