use std::{io::Stderr, sync::mpsc::{self, Receiver, RecvTimeoutError}, thread::sleep, time::{Duration, Instant}};

use log::{info, warn};

use crate::error::Result;
use crate::game::Game;
use crate::input::{self, Command, KeyMap};
use crate::logging::HeldWriter;
use crate::options::{GameOverStyle, Options, GAME_OVER_HOLD, TICK_PERIOD};
use crate::snake::Direction;
use crate::term::TermManager;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The snake left the grid
    Lost { score: usize },
    /// The player pressed Ctrl-C
    Quit,
}

pub struct SnakeGame {
    options: Options,
    term: TermManager,
    log: HeldWriter<Stderr>,
}

impl SnakeGame {
    pub fn new(options: Options, log: HeldWriter<Stderr>) -> Result<Self> {
        Ok(SnakeGame { options, term: TermManager::new()?, log })
    }

    /// Takes over the terminal, plays one game and hands the terminal back,
    /// whatever way the game ended. Log lines written in between reach stderr
    /// only after that.
    pub fn run(&mut self) -> Result<Outcome> {
        self.log.hold();

        let res = match self.term.setup() {
            Ok(()) => self.play(),
            Err(err) => Err(err.into()),
        };
        self.release_terminal();

        if let Ok(Outcome::Quit) = res {
            let (w, h) = self.term.get_terminal_size();
            info!("Screen size: {} x {}", w, h);
        }

        res
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self) -> Result<Outcome> {
        let (w, h) = self.term.get_terminal_size();
        let mut game = Game::new(w as i32, h as i32)?;
        info!("New {}x{} game, food at {:?}", game.width(), game.height(), game.food());

        let (tx, rx) = mpsc::channel();
        input::spawn_listener(KeyMap::new(self.options.extended_keymap), tx);

        let show_loss = self.options.game_over_style == GameOverStyle::InGridMessage;
        let prevent_reversal = self.options.prevent_reversal;

        loop {
            game.tick()?;
            self.term.render(&game, show_loss)?;

            let quit = wait_for_commands(&rx, TICK_PERIOD, |dir| {
                game.steer(dir, prevent_reversal);
            });
            if quit {
                return Ok(Outcome::Quit);
            }

            if game.is_over() {
                info!("Game over: score {}, head at {:?} going {:?}", game.score(), game.snake().head(), game.direction());
                if show_loss && wait_for_commands(&rx, GAME_OVER_HOLD, |_| {}) {
                    return Ok(Outcome::Quit);
                }
                return Ok(Outcome::Lost { score: game.score() });
            }
        }
    }

    fn release_terminal(&mut self) {
        let restored = self.term.restore();
        if let Err(err) = self.log.release() {
            eprintln!("snake: could not write log: {}", err);
        }
        if let Err(err) = restored {
            warn!("Could not restore the terminal: {}", err);
        }
    }
}

/// Lets `period` pass, handing every turn that arrives meanwhile to `steer`
/// in order. Returns true as soon as the player quits.
fn wait_for_commands<F>(rx: &Receiver<Command>, period: Duration, mut steer: F) -> bool
where
    F: FnMut(Direction),
{
    let deadline = Instant::now() + period;

    loop {
        let now = Instant::now();
        if now >= deadline {
            return false;
        }

        match rx.recv_timeout(deadline - now) {
            Ok(Command::Quit) => return true,
            Ok(Command::Steer(dir)) => steer(dir),
            Err(RecvTimeoutError::Timeout) => return false,
            Err(RecvTimeoutError::Disconnected) => {
                sleep(deadline - now);
                return false;
            }
        }
    }
}
