use crate::board::{Board, Cell};
use crate::geometry::Pos;
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Eat,
    Wall,
    SelfHit,
}

impl Outcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Outcome::Wall | Outcome::SelfHit)
    }
}

// What the head runs into if `snake`, still in place, moves it to `new_head`.
pub fn classify(board: &Board, snake: &Snake, new_head: Pos) -> Outcome {
    // Walls beat the body, the body beats food
    let cell = board.cell_at(new_head);
    if cell.is_solid() {
        Outcome::Wall
    } else if snake.self_collides(new_head) {
        Outcome::SelfHit
    } else if cell == Cell::Food {
        Outcome::Eat
    } else {
        Outcome::Continue
    }
}
