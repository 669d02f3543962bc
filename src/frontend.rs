use std::io;
use std::thread;
use std::time::Duration;

use log::info;
use rand::Rng;

use crate::board::Board;
use crate::game::{Command, Game, GameState};

#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub board: &'a Board,
    pub state: GameState,
    pub eaten: u32,
    pub target: u32,
    pub length: usize,
    pub delay: Duration,
}

impl<'a> Scene<'a> {
    pub fn of<R: Rng>(game: &'a Game<R>) -> Self {
        Scene {
            board: game.board(),
            state: game.state(),
            eaten: game.eaten(),
            target: game.settings().win_threshold,
            length: game.snake().len(),
            delay: game.delay(),
        }
    }
}

pub trait Screen {
    fn draw(&mut self, scene: &Scene<'_>) -> io::Result<()>;
}

pub trait Controls {
    // Returns at once, with the pending command if a key was waiting.
    fn poll(&mut self) -> io::Result<Option<Command>>;
}

pub fn run<R: Rng>(
    game: &mut Game<R>,
    controls: &mut impl Controls,
    screen: &mut impl Screen,
) -> anyhow::Result<GameState> {
    screen.draw(&Scene::of(game))?;

    loop {
        // The opening frame stays up for a full tick before anything moves
        thread::sleep(game.delay());

        let command = controls.poll()?;
        let state = game.tick(command)?;
        screen.draw(&Scene::of(game))?;

        if state.is_over() {
            info!(
                "Leaving game loop in state {:?}, heading {:?}",
                state,
                game.direction()
            );
            return Ok(state);
        }
    }
}
