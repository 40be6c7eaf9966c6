use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),

    #[error("grid of {width}x{height} cells is too small to play on")]
    GridTooSmall { width: i32, height: i32 },

    #[error("no free cell for food on a {width}x{height} grid")]
    NoSpaceForFood { width: i32, height: i32 },
}

pub type Result<T> = std::result::Result<T, SnakeError>;
