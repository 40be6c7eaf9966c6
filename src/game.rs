use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{Result, SnakeError};
use crate::options::MAX_FOOD_ATTEMPTS;
use crate::snake::{Direction, Point, Snake};

const INITIAL_BODY: [Point; 3] = [Point::new(10, 10), Point::new(11, 10), Point::new(12, 10)];
const INITIAL_DIRECTION: Direction = Direction::Right;

/// Simulation state. `over` only ever goes from false to true; once set,
/// `tick` leaves everything untouched.
pub struct Game {
    width: i32,
    height: i32,
    snake: Snake,
    food: Point,
    direction: Direction,
    over: bool,
    rng: StdRng,
}

impl Game {
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::new_with_rng(width, height, StdRng::from_entropy())
    }

    pub fn new_with_rng(width: i32, height: i32, rng: StdRng) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(SnakeError::GridTooSmall { width, height });
        }

        let mut game = Game {
            width,
            height,
            snake: Snake::new(INITIAL_BODY.iter().copied()),
            food: Point::new(0, 0),
            direction: INITIAL_DIRECTION,
            over: false,
            rng,
        };
        game.place_food()?;

        Ok(game)
    }

    pub fn tick(&mut self) -> Result<()> {
        if self.over {
            return Ok(());
        }

        self.snake.move_towards(self.direction);

        if self.snake.is_colliding_with(self.food) {
            self.place_food()?;
        } else {
            self.snake.pop_tail();
        }

        self.check_over();
        Ok(())
    }

    /// Commits `intent` as the next direction. With `prevent_reversal`, a turn
    /// straight back against the current direction is dropped. Returns whether
    /// the direction was taken.
    pub fn steer(&mut self, intent: Direction, prevent_reversal: bool) -> bool {
        if prevent_reversal && intent == self.direction.opposite() {
            info!("Ignoring reversal from {:?} to {:?}", self.direction, intent);
            return false;
        }

        self.direction = intent;
        true
    }

    // Sampling runs one cell past the left and top edges: x in [1, width], y in [2, height + 1].
    fn place_food(&mut self) -> Result<()> {
        for _ in 0..MAX_FOOD_ATTEMPTS {
            let candidate = Point::new(
                self.rng.gen_range(1..=self.width),
                self.rng.gen_range(2..=self.height + 1),
            );

            if !self.snake.is_colliding_with(candidate) {
                self.food = candidate;
                return Ok(());
            }
        }

        Err(SnakeError::NoSpaceForFood { width: self.width, height: self.height })
    }

    // Walls only; running into the body is allowed.
    fn check_over(&mut self) {
        let head = self.snake.head();
        if head.x < 0 || head.x > self.width - 1 || head.y < 0 || head.y > self.height - 1 {
            self.over = true;
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(INITIAL_BODY.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn seeded(width: i32, height: i32) -> Game {
        Game::new_with_rng(width, height, StdRng::seed_from_u64(RNG_SEED)).unwrap()
    }

    fn body(game: &Game) -> Vec<Point> {
        game.snake.body().iter().copied().collect()
    }

    #[test]
    fn new_game_layout() {
        let game = seeded(20, 20);
        assert_eq!(body(&game), INITIAL_BODY.to_vec());
        assert_eq!(game.direction(), Right);
        assert!(!game.is_over());
        assert!(!game.snake.is_colliding_with(game.food()));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn rejects_empty_grid() {
        let res = Game::new_with_rng(0, 20, StdRng::seed_from_u64(RNG_SEED));
        assert!(matches!(res, Err(SnakeError::GridTooSmall { width: 0, height: 20 })));
    }

    #[test]
    fn plain_tick_moves_without_growing() {
        let mut game = seeded(20, 20);
        game.food = Point::new(1, 2);
        game.tick().unwrap();

        // The new head is computed from body[0], which starts at (10, 10).
        assert_eq!(body(&game), vec![Point::new(11, 10), Point::new(10, 10), Point::new(11, 10)]);
        assert_eq!(game.food(), Point::new(1, 2));
        assert!(!game.is_over());
    }

    #[test]
    fn eating_grows_and_replaces_food() {
        let mut game = seeded(20, 20);
        game.steer(Up, true);
        game.food = Point::new(10, 9);
        game.tick().unwrap();

        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.snake.head(), Point::new(10, 9));
        assert_ne!(game.food(), Point::new(10, 9));
        assert!(!game.snake.is_colliding_with(game.food()));
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn food_never_lands_on_snake() {
        let mut game = seeded(4, 3);
        // Cover most of the sampled area: x in [1, 4], y in [2, 4]
        game.snake = Snake::new(
            (1..=4).flat_map(|x| (2..=4).map(move |y| Point::new(x, y)))
                .filter(|p| *p != Point::new(3, 3)),
        );
        for _ in 0..20 {
            game.place_food().unwrap();
            assert_eq!(game.food(), Point::new(3, 3));
        }
    }

    #[test]
    fn food_stays_in_sampling_window() {
        let mut game = seeded(6, 4);
        for _ in 0..200 {
            game.place_food().unwrap();
            let food = game.food();
            assert!((1..=6).contains(&food.x));
            assert!((2..=5).contains(&food.y));
        }
    }

    #[test]
    fn full_sampling_window_is_an_error() {
        let mut game = seeded(2, 1);
        game.snake = Snake::new(vec![Point::new(1, 2), Point::new(2, 2)]);
        let res = game.place_food();
        assert!(matches!(res, Err(SnakeError::NoSpaceForFood { width: 2, height: 1 })));
    }

    #[test]
    fn check_over_boundaries_are_inclusive() {
        let mut game = seeded(20, 20);
        for p in [Point::new(0, 0), Point::new(19, 19), Point::new(0, 19), Point::new(19, 0)].iter() {
            game.snake = Snake::new(vec![*p]);
            game.check_over();
            assert!(!game.is_over(), "{:?} should be inside", p);
        }

        for p in [Point::new(-1, 5), Point::new(20, 5), Point::new(5, -1), Point::new(5, 20)].iter() {
            let mut game = seeded(20, 20);
            game.snake = Snake::new(vec![*p]);
            game.check_over();
            assert!(game.is_over(), "{:?} should be outside", p);
        }
    }

    #[test]
    fn wall_hit_ends_game_on_exact_tick() {
        let mut game = seeded(5, 20);
        game.snake = Snake::new(vec![Point::new(2, 15), Point::new(1, 15), Point::new(0, 15)]);
        game.food = Point::new(1, 2);

        let mut ticks = 0;
        while !game.is_over() {
            assert!(game.snake.head().x <= 4);
            game.tick().unwrap();
            ticks += 1;
        }

        assert_eq!(ticks, 3);
        assert_eq!(game.snake.head(), Point::new(5, 15));
        game.tick().unwrap();
        assert!(game.is_over());
    }

    #[test]
    fn tick_is_idempotent_once_over() {
        let mut game = seeded(20, 20);
        game.snake = Snake::new(vec![Point::new(19, 4), Point::new(18, 4)]);
        game.food = Point::new(1, 2);
        game.tick().unwrap();
        assert!(game.is_over());

        let snapshot = (body(&game), game.food(), game.direction());
        for _ in 0..5 {
            game.tick().unwrap();
        }

        assert_eq!(body(&game), snapshot.0);
        assert_eq!(game.food(), snapshot.1);
        assert_eq!(game.direction(), snapshot.2);
        assert!(game.is_over());
    }

    #[test]
    fn self_collision_is_not_fatal() {
        let mut game = seeded(20, 20);
        game.food = Point::new(1, 2);
        // Moving right from (10, 10) lands on the second segment.
        game.tick().unwrap();
        assert!(!game.is_over());
    }

    #[test]
    fn reversal_is_rejected_only_when_guarded() {
        let mut game = seeded(20, 20);
        assert!(!game.steer(Left, true));
        assert_eq!(game.direction(), Right);

        assert!(game.steer(Up, true));
        assert_eq!(game.direction(), Up);

        assert!(!game.steer(Down, true));
        assert_eq!(game.direction(), Up);

        assert!(game.steer(Down, false));
        assert_eq!(game.direction(), Down);
    }
}
