mod app;
mod error;
mod game;
mod input;
mod logging;
mod options;
mod snake;
mod term;

use std::{io::stderr, process::exit};

use log::info;

use crate::app::{Outcome, SnakeGame};
use crate::logging::HeldWriter;
use crate::options::{GameOverStyle, Options};

fn main() {
    // The game still runs without a logger; its lines are simply dropped
    let log = logging::init().unwrap_or_else(|err| {
        eprintln!("snake: logging disabled: {}", err);
        HeldWriter::new(stderr())
    });

    let options = Options::default();
    info!("Starting with {:?}", options);

    // Ctrl-C and game over both end up here with the terminal already restored
    match SnakeGame::new(options, log).and_then(|mut game| game.run()) {
        Ok(Outcome::Lost { score }) => {
            info!("Final score: {}", score);
            if options.game_over_style == GameOverStyle::ConsoleLog {
                println!("You loose !");
            }
        }
        Ok(Outcome::Quit) => {}
        Err(err) => {
            eprintln!("snake: {}", err);
            exit(1);
        }
    }
}
