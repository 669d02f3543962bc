use log::error;
use rand::Rng;

use crate::board::{Board, Cell};
use crate::config::FOOD_PLACEMENT_ATTEMPTS;
use crate::error::GameError;
use crate::geometry::{Pos, Size};

#[derive(Debug, Clone)]
pub struct FoodSpawner {
    position: Option<Pos>,
    max_attempts: u32,
}

impl Default for FoodSpawner {
    fn default() -> Self {
        Self::new(FOOD_PLACEMENT_ATTEMPTS)
    }
}

impl FoodSpawner {
    pub fn new(max_attempts: u32) -> Self {
        FoodSpawner {
            position: None,
            max_attempts,
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> Option<Pos> {
        self.position
    }

    pub fn spawn(&mut self, board: &mut Board, rng: &mut impl Rng) -> Result<Pos, GameError> {
        let Size { width, height } = board.size();

        for _ in 0..self.max_attempts {
            let pos = Pos {
                x: rng.gen_range(1..width - 1),
                y: rng.gen_range(1..height - 1),
            };
            if board.cell_at(pos) == Cell::Empty {
                board.set_cell(pos, Cell::Food);
                self.position = Some(pos);
                return Ok(pos);
            }
        }

        error!("No empty cell found for an apple in {} attempts", self.max_attempts);
        Err(GameError::BoardFull {
            attempts: self.max_attempts,
        })
    }

    pub fn consume(&mut self, board: &mut Board) -> Option<Pos> {
        let pos = self.position.take()?;
        if board.cell_at(pos) == Cell::Food {
            board.set_cell(pos, Cell::Empty);
        }
        Some(pos)
    }

    #[cfg(test)]
    pub fn place(&mut self, board: &mut Board, pos: Pos) {
        self.consume(board);
        board.set_cell(pos, Cell::Food);
        self.position = Some(pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOARD: Size = Size {
        width: 12,
        height: 8,
    };

    #[test]
    fn test_spawn_lands_on_empty_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new(BOARD);
        // Fill everything but two cells
        for (pos, _) in Board::new(BOARD).cells() {
            board.set_cell(pos, Cell::Obstacle);
        }
        board.set_cell(Pos::new(3, 3), Cell::Empty);
        board.set_cell(Pos::new(9, 5), Cell::Empty);

        let mut spawner = FoodSpawner::default();
        let pos = spawner.spawn(&mut board, &mut rng).unwrap();

        assert!(pos == Pos::new(3, 3) || pos == Pos::new(9, 5));
        assert_eq!(board.cell_at(pos), Cell::Food);
        assert_eq!(spawner.position(), Some(pos));
        assert_eq!(board.count(Cell::Food), 1);
    }

    #[test]
    fn test_full_board_fails() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new(BOARD);
        for (pos, _) in Board::new(BOARD).cells() {
            board.set_cell(pos, Cell::Body);
        }

        let mut spawner = FoodSpawner::new(500);
        assert_eq!(
            spawner.spawn(&mut board, &mut rng),
            Err(GameError::BoardFull { attempts: 500 })
        );
        assert_eq!(spawner.position(), None);
    }

    #[test]
    fn test_consume_clears_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::new(BOARD);
        let mut spawner = FoodSpawner::default();
        let pos = spawner.spawn(&mut board, &mut rng).unwrap();

        assert_eq!(spawner.consume(&mut board), Some(pos));
        assert_eq!(board.cell_at(pos), Cell::Empty);
        assert_eq!(spawner.consume(&mut board), None);
    }

    #[test]
    fn test_repeated_spawns_never_overwrite() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut board = Board::new(BOARD);
        board.set_cell(Pos::new(2, 2), Cell::Head);
        let mut spawner = FoodSpawner::default();

        for _ in 0..30 {
            spawner.consume(&mut board);
            let pos = spawner.spawn(&mut board, &mut rng).unwrap();
            assert_eq!(board.count(Cell::Food), 1);
            assert_ne!(pos, Pos::new(2, 2));
        }
        assert_eq!(board.cell_at(Pos::new(2, 2)), Cell::Head);
    }
}
