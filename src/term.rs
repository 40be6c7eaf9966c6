use std::io::{Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::game::Game;
use crate::options::*;
use crate::snake::Point;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    pub col: u16,
    pub row: u16,
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

/// Everything one frame puts on screen, in drawing order. Later cells win.
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    /// Snake, food and, once the game is over and `show_loss` is set, the
    /// loss message. Cells outside a `width` x `height` screen are left out.
    pub fn of(game: &Game, show_loss: bool, width: u16, height: u16) -> Self {
        let mut frame = Frame { width, height, cells: vec![] };

        for segment in game.snake().body() {
            frame.put(*segment, SNAKE_BODY_CHAR, SNAKE_COLOR, SNAKE_COLOR);
        }
        frame.put(game.food(), FOOD_CHAR, FOOD_COLOR, FOOD_COLOR);

        if show_loss && game.is_over() {
            let (x, y) = LOSS_MESSAGE_AT;
            for (i, ch) in LOSS_MESSAGE.chars().enumerate() {
                let pos = Point::new(x as i32 + i as i32, y as i32);
                frame.put(pos, ch, LOSS_MESSAGE_COLOR, Color::Reset);
            }
        }

        frame
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn put(&mut self, pos: Point, ch: char, fg: Color, bg: Color) {
        if let Some((col, row)) = to_cell(pos, self.width, self.height) {
            self.cells.push(Cell { col, row, ch, fg, bg });
        }
    }
}

pub struct TermManager<W: Write = Stdout> {
    width: u16,
    height: u16,
    out: W,
}

impl TermManager<Stdout> {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager::with_writer(stdout(), width, height))
    }
}

impl<W: Write> TermManager<W> {
    pub fn with_writer(out: W, width: u16, height: u16) -> Self {
        TermManager { width, height, out }
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.out, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.out, cursor::Hide, cursor::DisableBlinking)
    }

    /// Runs every step even when an earlier one fails; reports the first failure.
    pub fn restore(&mut self) -> crossterm::Result<()> {
        let raw = terminal::disable_raw_mode();
        let cursor = execute!(self.out, style::ResetColor, cursor::Show, cursor::EnableBlinking);
        let screen = execute!(self.out, LeaveAlternateScreen);
        raw.and(cursor).and(screen)
    }

    pub fn get_terminal_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn render(&mut self, game: &Game, show_loss: bool) -> crossterm::Result<()> {
        let frame = Frame::of(game, show_loss, self.width, self.height);

        self.clear()?;
        for cell in frame.cells() {
            self.print_cell(cell)?;
        }
        self.flush()
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        queue!(self.out, style::ResetColor, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.out.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_cell(&mut self, cell: &Cell) -> crossterm::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(cell.col, cell.row),
            style::SetForegroundColor(cell.fg),
            style::SetBackgroundColor(cell.bg),
            style::Print(cell.ch),
            style::ResetColor
        )
    }
}

fn to_cell(pos: Point, width: u16, height: u16) -> Option<(u16, u16)> {
    if pos.x < 0 || pos.y < 0 || pos.x >= width as i32 || pos.y >= height as i32 {
        return None;
    }

    Some((pos.x as u16, pos.y as u16))
}
