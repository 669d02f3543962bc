mod board;
mod collision;
mod config;
mod error;
mod food;
mod frontend;
mod game;
mod geometry;
mod snake;
mod terminal;

use std::fs::File;

use anyhow::Context;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simplelog::{Config, LevelFilter, WriteLogger};

use config::{Settings, LOG_FILE};
use game::{Game, GameState};
use terminal::{CrosstermControls, RatatuiScreen, TerminalGuard};

fn main() -> anyhow::Result<()> {
    // Set up logging before anything else
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(LOG_FILE).context("creating log file")?,
    )
    .context("initializing logger")?;

    info!("Starting serpent");

    let settings = Settings::default();
    let mut game =
        Game::new(settings.clone(), StdRng::from_entropy()).context("setting up the board")?;

    let state = {
        // Dropping the guard restores the terminal on every way out of this block
        let _guard = TerminalGuard::acquire().context("switching the terminal to raw mode")?;
        let mut screen = RatatuiScreen::new().context("opening the terminal screen")?;
        let mut controls = CrosstermControls::new(settings.keys);
        frontend::run(&mut game, &mut controls, &mut screen)?
    };

    println!("{}", outcome_message(state, game.eaten()));
    info!("Exiting after {:?}", state);

    Ok(())
}

fn outcome_message(state: GameState, eaten: u32) -> String {
    match state {
        GameState::Won => format!("You won by eating {} apples. Congratulations!", eaten),
        GameState::Lost => format!("Collision detected after {} apple(s). You lost.", eaten),
        GameState::Forfeited => "You forfeited. Too bad!".to_string(),
        GameState::Running => "Game interrupted.".to_string(),
    }
}
