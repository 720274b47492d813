// Simple command-line application to play chess
//
// Enter moves as pairs of squares, like `e2e4`. Other commands are `undo`, `reset` and `quit`.
// Run with `RUST_LOG=debug` to see what the engine is doing.

use plainchess::{board::PrettyStyle, Color, Game, Move};
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::init();

    let mut stdin = io::stdin().lock();
    let mut game = Game::new();

    loop {
        println!("{}", game.pretty(PrettyStyle::Ascii));
        if let Some(outcome) = game.outcome() {
            println!("Game finished: {}", outcome);
            println!("Type `reset` to play again or `quit` to exit.");
        } else {
            let side = match game.side() {
                Color::White => "White",
                Color::Black => "Black",
            };
            if game.is_check(game.side()) {
                println!("{} is in check!", side);
            }
            print!("{} move ({}): ", side, game.len() / 2 + 1);
        }
        io::stdout().flush().unwrap();

        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        match s.trim() {
            "quit" => break,
            "reset" => game.reset(),
            "undo" => {
                if !game.undo_move() {
                    println!("Nothing to undo");
                }
            }
            s => {
                let mv: Move = match s.parse() {
                    Ok(mv) => mv,
                    Err(e) => {
                        println!("Bad move: {}", e);
                        println!();
                        continue;
                    }
                };
                // Ask for the reason first, `make_move()` only tells whether it succeeded
                if let Err(e) = game.validate(mv.src(), mv.dst()) {
                    println!("Illegal move: {}", e);
                } else if !game.make_move(mv.src(), mv.dst()) {
                    println!("Game is over");
                }
            }
        }

        println!();
    }
}
