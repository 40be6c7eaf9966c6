use std::collections::VecDeque;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// A grid cell. Coordinates are signed: the head may leave the grid on the
/// tick that ends the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    pub fn step(self, direction: Direction) -> Point {
        let (dx, dy) = direction.offset();
        Point { x: self.x + dx, y: self.y + dy }
    }
}

/// Body segments, head first.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
}

impl Snake {
    /// Panics if `body` is empty.
    pub fn new(body: impl IntoIterator<Item = Point>) -> Self {
        let body: VecDeque<Point> = body.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body }
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    // Always grows the body by one; the caller pops the tail when nothing was eaten.
    // No bounds checks here.
    pub fn move_towards(&mut self, direction: Direction) {
        let new_head = self.head().step(direction);
        self.body.push_front(new_head);
    }

    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    pub fn is_colliding_with(&self, p: Point) -> bool {
        self.body.contains(&p)
    }
}
