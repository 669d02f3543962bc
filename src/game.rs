use std::time::Duration;

use log::info;
use rand::Rng;

use crate::board::{Board, Cell};
use crate::collision::{self, Outcome};
use crate::config::{Settings, START_CLEARANCE};
use crate::error::GameError;
use crate::food::FoodSpawner;
use crate::geometry::{Direction, Pos, PosDelta};
use crate::snake::{Snake, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Won,
    Lost,
    Forfeited,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Running)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

#[derive(Debug)]
pub struct Game<R> {
    settings: Settings,
    board: Board,
    snake: Snake,
    food: FoodSpawner,
    rng: R,
    direction: Direction,
    state: GameState,
    eaten: u32,
    delay: Duration,
}

impl<R: Rng> Game<R> {
    pub fn new(settings: Settings, mut rng: R) -> Result<Self, GameError> {
        settings.validate()?;

        let snake = Snake::new(
            settings.start,
            settings.initial_length,
            settings.direction,
            settings.max_length,
            settings.size,
        );
        // No obstacle on the snake or in the first few cells it will cross
        let ahead: PosDelta = settings.direction.into();
        let keep_clear: Vec<Pos> = snake
            .segments()
            .copied()
            .chain((1..=START_CLEARANCE as i32).filter_map(|i| {
                settings.start.checked_offset(ahead, i, settings.size)
            }))
            .collect();
        let mut board = Board::initialize(
            settings.size,
            settings.obstacle_count,
            settings.obstacle_size,
            &keep_clear,
            &mut rng,
        )?;
        board.stamp_snake(&snake);

        let mut food = FoodSpawner::default();
        let apple = food.spawn(&mut board, &mut rng)?;

        info!(
            "New game: {}x{} board, snake of {} at {:?}, {} obstacle cell(s), first apple at {:?}",
            settings.size.width,
            settings.size.height,
            snake.len(),
            snake.head(),
            board.count(Cell::Obstacle),
            apple
        );

        Ok(Game {
            direction: settings.direction,
            delay: settings.initial_delay,
            settings,
            board,
            snake,
            food,
            rng,
            state: GameState::Running,
            eaten: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn eaten(&self) -> u32 {
        self.eaten
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn steer(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.direction = direction;
        }
    }

    pub fn tick(&mut self, command: Option<Command>) -> Result<GameState, GameError> {
        if self.state.is_over() {
            return Ok(self.state);
        }

        if self.eaten >= self.settings.win_threshold {
            self.finish(GameState::Won);
            return Ok(self.state);
        }

        match command {
            Some(Command::Quit) => {
                self.finish(GameState::Forfeited);
                return Ok(self.state);
            }
            Some(Command::Turn(direction)) => self.steer(direction),
            None => {}
        }

        let new_head = self.snake.next_head(self.direction, self.settings.size);
        let outcome = collision::classify(&self.board, &self.snake, new_head);
        if outcome.is_fatal() {
            info!("{:?} at {:?}", outcome, new_head);
            self.finish(GameState::Lost);
            return Ok(self.state);
        }

        let step = self.snake.advance(self.direction, self.settings.size);
        if outcome == Outcome::Eat {
            self.eat(step)?;
        } else {
            self.redraw_snake(step, false);
        }

        Ok(self.state)
    }

    fn eat(&mut self, step: Step) -> Result<(), GameError> {
        self.food.consume(&mut self.board);
        let kept_tail = self.snake.grow();
        self.redraw_snake(step, kept_tail);

        self.eaten += 1;
        self.delay = self
            .delay
            .saturating_sub(self.settings.delay_decrement)
            .max(self.settings.min_delay);
        info!(
            "Apple {} of {} eaten at {:?}, snake length {}, delay now {:?}",
            self.eaten,
            self.settings.win_threshold,
            step.new_head,
            self.snake.len(),
            self.delay
        );

        // The winning apple is not replaced
        if self.eaten < self.settings.win_threshold {
            self.food.spawn(&mut self.board, &mut self.rng)?;
        }
        Ok(())
    }

    fn redraw_snake(&mut self, step: Step, kept_tail: bool) {
        self.board.set_cell(step.old_head, Cell::Body);
        if let Some(tail) = step.vacated {
            if !kept_tail {
                self.board.set_cell(tail, Cell::Empty);
            }
        }
        self.board.set_cell(step.new_head, Cell::Head);
    }

    fn finish(&mut self, state: GameState) {
        info!(
            "Game finished: {:?} with {} apple(s), snake length {}",
            state,
            self.eaten,
            self.snake.len()
        );
        self.state = state;
    }
}
