use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::board::Cell;
use crate::config::KeyBindings;
use crate::frontend::{Controls, Scene, Screen};
use crate::game::{Command, GameState};
use crate::geometry::Direction;

pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, cursor::Hide) {
            // Best effort, the setup error is what gets returned
            let _ = restore();
            return Err(e);
        }
        info!("Terminal switched to raw mode");
        Ok(TerminalGuard { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        match restore() {
            Ok(()) => info!("Terminal restored"),
            Err(e) => error!("Error restoring terminal: {}", e),
        }
    }
}

fn restore() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
    raw
}

pub struct CrosstermControls {
    keys: KeyBindings,
}

impl CrosstermControls {
    pub fn new(keys: KeyBindings) -> Self {
        CrosstermControls { keys }
    }

    fn translate(&self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char(c) => self.keys.command_for(c.to_ascii_lowercase()),
            KeyCode::Up => Some(Command::Turn(Direction::Up)),
            KeyCode::Down => Some(Command::Turn(Direction::Down)),
            KeyCode::Left => Some(Command::Turn(Direction::Left)),
            KeyCode::Right => Some(Command::Turn(Direction::Right)),
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        }
    }
}

impl Controls for CrosstermControls {
    fn poll(&mut self) -> io::Result<Option<Command>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.translate(key)),
            _ => Ok(None),
        }
    }
}

pub struct RatatuiScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl RatatuiScreen {
    pub fn new() -> io::Result<Self> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        Ok(RatatuiScreen { terminal })
    }
}

impl Screen for RatatuiScreen {
    fn draw(&mut self, scene: &Scene<'_>) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame, scene))?;
        Ok(())
    }
}

fn render(frame: &mut Frame, scene: &Scene<'_>) {
    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status
            Constraint::Min(0),    // Board
        ])
        .split(frame.area());

    let title = match scene.state {
        GameState::Running => "Playing",
        GameState::Won => "You won!",
        GameState::Lost => "Game over",
        GameState::Forfeited => "Forfeited",
    };
    let status = format!(
        "SERPENT    Apples: {}/{}    Length: {}    Delay: {} ms",
        scene.eaten,
        scene.target,
        scene.length,
        scene.delay.as_millis()
    );
    frame.render_widget(
        Paragraph::new(status)
            .alignment(Alignment::Left)
            .block(Block::default().title(title).borders(Borders::ALL)),
        layout[0],
    );
    frame.render_widget(scene, layout[1]);
}

impl Widget for &Scene<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (pos, cell) in self.board.cells() {
            if pos.x >= area.width || pos.y >= area.height {
                continue;
            }
            let Some(target) = buf.cell_mut((area.x + pos.x, area.y + pos.y)) else {
                continue;
            };

            match cell {
                Cell::Empty | Cell::Exit => {
                    target.set_symbol(" ");
                }
                Cell::Wall => {
                    target.set_symbol("#").set_fg(Color::Gray);
                }
                Cell::Obstacle => {
                    target.set_symbol("#").set_fg(Color::DarkGray);
                }
                Cell::Food => {
                    target.set_symbol("●").set_fg(Color::LightRed);
                }
                Cell::Body => {
                    target.set_symbol("X").set_fg(Color::Green);
                }
                Cell::Head => {
                    let color = if self.state == GameState::Lost {
                        Color::Red
                    } else {
                        Color::Yellow
                    };
                    target.set_symbol("O").set_fg(color);
                }
            }
        }
    }
}
