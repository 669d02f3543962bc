use log::{debug, error};
use rand::Rng;

use crate::config::OBSTACLE_PLACEMENT_ATTEMPTS;
use crate::error::GameError;
use crate::geometry::{Pos, Size};
use crate::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Exit,
    Obstacle,
    Food,
    Body,
    Head,
}

impl Cell {
    pub fn is_solid(&self) -> bool {
        matches!(self, Cell::Wall | Cell::Obstacle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementRejection {
    // Past the board edge or within one cell of the border
    OutOfBounds,
    Reserved,
    OverlapsObstacle,
}

#[derive(Debug, Clone)]
pub struct Board {
    size: Size,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(size: Size) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size.area()],
        }
    }

    // Borders, one exit per side, then `obstacle_count` square blocks that
    // stay off every cell in `keep_clear`.
    pub fn initialize(
        size: Size,
        obstacle_count: usize,
        obstacle_size: u16,
        keep_clear: &[Pos],
        rng: &mut impl Rng,
    ) -> Result<Self, GameError> {
        let mut board = Board::new(size);
        board.stamp_borders();
        board.carve_exits();
        board.place_obstacles(obstacle_count, obstacle_size, keep_clear, rng)?;
        Ok(board)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    // Anything off the grid reads as wall.
    pub fn cell_at(&self, pos: Pos) -> Cell {
        if !self.size.contains(pos) {
            return Cell::Wall;
        }
        self.cells[self.size.index_of(pos)]
    }

    pub fn set_cell(&mut self, pos: Pos, cell: Cell) {
        if self.size.contains(pos) {
            let index = self.size.index_of(pos);
            self.cells[index] = cell;
        }
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        let width = self.size.width as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let pos = Pos {
                x: (i % width) as u16,
                y: (i / width) as u16,
            };
            (pos, *cell)
        })
    }

    fn stamp_borders(&mut self) {
        let Size { width, height } = self.size;
        for x in 0..width {
            self.set_cell(Pos { x, y: 0 }, Cell::Wall);
            self.set_cell(Pos { x, y: height - 1 }, Cell::Wall);
        }
        for y in 0..height {
            self.set_cell(Pos { x: 0, y }, Cell::Wall);
            self.set_cell(Pos { x: width - 1, y }, Cell::Wall);
        }
    }

    fn carve_exits(&mut self) {
        for gap in self.size.exit_gaps() {
            self.set_cell(gap, Cell::Exit);
        }
    }

    pub fn place_obstacles(
        &mut self,
        count: usize,
        side: u16,
        keep_clear: &[Pos],
        rng: &mut impl Rng,
    ) -> Result<(), GameError> {
        let Size { width, height } = self.size;

        for n in 0..count {
            let mut attempts = 0;
            loop {
                if attempts == OBSTACLE_PLACEMENT_ATTEMPTS {
                    error!("Gave up placing obstacle {} after {} attempts", n, attempts);
                    return Err(GameError::ObstaclePlacement { attempts });
                }
                attempts += 1;

                let top_left = Pos {
                    x: rng.gen_range(1..width - 1),
                    y: rng.gen_range(1..height - 1),
                };
                match self.place_obstacle(top_left, side, keep_clear) {
                    Ok(()) => {
                        debug!(
                            "Obstacle {} at {:?} after {} attempt(s)",
                            n, top_left, attempts
                        );
                        break;
                    }
                    Err(reason) => debug!("Obstacle at {:?} rejected: {:?}", top_left, reason),
                }
            }
        }

        Ok(())
    }

    pub fn place_obstacle(
        &mut self,
        top_left: Pos,
        side: u16,
        keep_clear: &[Pos],
    ) -> Result<(), PlacementRejection> {
        let Size { width, height } = self.size;
        let fits = side > 0
            && top_left.x >= 2
            && top_left.y >= 2
            && top_left.x as u32 + side as u32 <= width as u32 - 2
            && top_left.y as u32 + side as u32 <= height as u32 - 2;
        if !fits {
            return Err(PlacementRejection::OutOfBounds);
        }

        let block: Vec<Pos> = (0..side)
            .flat_map(|dy| {
                (0..side).map(move |dx| Pos {
                    x: top_left.x + dx,
                    y: top_left.y + dy,
                })
            })
            .collect();

        if block.iter().any(|pos| keep_clear.contains(pos)) {
            return Err(PlacementRejection::Reserved);
        }
        if block.iter().any(|pos| self.cell_at(*pos) == Cell::Obstacle) {
            return Err(PlacementRejection::OverlapsObstacle);
        }

        for pos in block {
            self.set_cell(pos, Cell::Obstacle);
        }
        Ok(())
    }

    pub fn stamp_snake(&mut self, snake: &Snake) {
        for (i, pos) in snake.segments().enumerate() {
            let cell = if i == 0 { Cell::Head } else { Cell::Body };
            self.set_cell(*pos, cell);
        }
    }
}
