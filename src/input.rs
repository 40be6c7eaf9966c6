use std::{iter, sync::mpsc::Sender, thread::{self, JoinHandle}};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use log::{error, info};

use crate::snake::Direction::{*, self};

/// What the input thread hands over to the game loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
}

#[derive(Copy, Clone, Debug)]
pub struct KeyMap {
    extended: bool,
}

impl KeyMap {
    /// Arrow keys always steer; `extended` adds h/j/k/l.
    pub fn new(extended: bool) -> Self {
        KeyMap { extended }
    }

    pub fn command_for(&self, key: &KeyEvent) -> Option<Command> {
        if is_ctrl_c(key) {
            return Some(Command::Quit);
        }

        let direction = match key.code {
            KeyCode::Up => Up,
            KeyCode::Down => Down,
            KeyCode::Left => Left,
            KeyCode::Right => Right,
            KeyCode::Char('k') if self.extended => Up,
            KeyCode::Char('j') if self.extended => Down,
            KeyCode::Char('h') if self.extended => Left,
            KeyCode::Char('l') if self.extended => Right,
            _ => return None,
        };

        Some(Command::Steer(direction))
    }
}

/// Pulls events until the source runs dry, the receiver hangs up or the
/// player quits. Blocks whenever the source does.
pub fn listen<I>(events: I, keymap: KeyMap, tx: Sender<Command>) -> crossterm::Result<()>
where
    I: IntoIterator<Item = crossterm::Result<Event>>,
{
    for event in events {
        let key = match event? {
            Event::Key(key) => key,
            _ => continue,
        };

        if let Some(command) = keymap.command_for(&key) {
            if tx.send(command).is_err() {
                break;
            }

            if command == Command::Quit {
                break;
            }
        }
    }

    Ok(())
}

pub fn spawn_listener(keymap: KeyMap, tx: Sender<Command>) -> JoinHandle<()> {
    thread::spawn(move || {
        match listen(iter::repeat_with(event::read), keymap, tx) {
            Ok(()) => info!("Input listener finished"),
            Err(err) => error!("Input listener stopped: {}", err),
        }
    })
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
