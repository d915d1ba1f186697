//! Two players, one terminal

use std::io::{self, BufRead, Write};

use chess_duel_core::{Game, GameStatus, Square};

fn main() {
    println!("Chess Duel - hot seat");
    println!("=====================");
    println!("Enter moves as \"e2 e4\", or \"quit\" to leave.");
    println!();

    let mut game = Game::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", game.board());
        println!();

        match game.status() {
            GameStatus::Checkmate => {
                println!("Checkmate! {} wins.", game.turn().opposite());
                break;
            }
            GameStatus::Stalemate => {
                println!("Stalemate.");
                break;
            }
            GameStatus::Check => println!("CHECK!"),
            GameStatus::Ongoing => {}
        }

        print!("{} to move> ", game.turn());
        if io::stdout().flush().is_err() {
            break;
        }

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let line = line.trim();
        if line == "quit" {
            break;
        }

        let squares: Vec<Result<Square, _>> = line.split_whitespace().map(str::parse).collect();
        let (from, to) = match squares.as_slice() {
            [Ok(from), Ok(to)] => (*from, *to),
            _ => {
                println!("[ERROR] Expected two squares, e.g. \"e2 e4\"");
                continue;
            }
        };

        match game.play(from, to) {
            Ok(committed) => {
                println!("   {}", committed.record);
                if committed.promoted {
                    println!("   Promoted to queen");
                }
            }
            Err(e) => println!("[ERROR] {}", e),
        }
        println!();
    }

    println!("Moves played: {}", game.history().len());
}
