//! Fixed configuration: behaviour switches plus timing, glyph and colour constants.
use std::time::Duration;

use crossterm::style::Color;

/// Time between two game ticks
pub const TICK_PERIOD: Duration = Duration::from_millis(80);

/// How long the final frame stays up when the loss message is drawn in the grid
pub const GAME_OVER_HOLD: Duration = Duration::from_secs(2);

/// Upper bound on random draws when looking for a free food cell
pub const MAX_FOOD_ATTEMPTS: usize = 10_000;

pub const SNAKE_BODY_CHAR: char = '.';
pub const SNAKE_COLOR: Color = Color::AnsiValue(105);
pub const FOOD_CHAR: char = 'o';
pub const FOOD_COLOR: Color = Color::AnsiValue(126);

pub const LOSS_MESSAGE: &str = "You loose";
pub const LOSS_MESSAGE_AT: (u16, u16) = (10, 10);
pub const LOSS_MESSAGE_COLOR: Color = Color::Red;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOverStyle {
    /// Restore the terminal, then print the loss line on stdout
    ConsoleLog,
    /// Draw the loss message inside the last frame
    InGridMessage,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Accept h/j/k/l in addition to the arrow keys
    pub extended_keymap: bool,
    /// Ignore a turn straight back into the snake's neck
    pub prevent_reversal: bool,
    pub game_over_style: GameOverStyle,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            extended_keymap: true,
            prevent_reversal: true,
            game_over_style: GameOverStyle::ConsoleLog,
        }
    }
}
