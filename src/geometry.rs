#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }

    // The single-cell gaps at the midpoint of each border edge:
    // top, bottom, left, right.
    pub fn exit_gaps(&self) -> [Pos; 4] {
        let mid_x = self.width / 2;
        let mid_y = self.height / 2;
        [
            Pos { x: mid_x, y: 0 },
            Pos { x: mid_x, y: self.height - 1 },
            Pos { x: 0, y: mid_y },
            Pos { x: self.width - 1, y: mid_y },
        ]
    }

    pub fn through_exit(&self, pos: Pos) -> Option<Pos> {
        let [top, bottom, left, right] = self.exit_gaps();
        if pos == top {
            Some(Pos { x: pos.x, y: self.height - 2 })
        } else if pos == bottom {
            Some(Pos { x: pos.x, y: 1 })
        } else if pos == left {
            Some(Pos { x: self.width - 2, y: pos.y })
        } else if pos == right {
            Some(Pos { x: 1, y: pos.y })
        } else {
            None
        }
    }

    pub fn index_of(&self, pos: Pos) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// Board coordinate: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: u16,
    pub y: u16,
}

impl Pos {
    pub const fn new(x: u16, y: u16) -> Self {
        Pos { x, y }
    }

    pub fn wrapped_add(&self, delta: PosDelta, size: Size) -> Pos {
        let new_x = (self.x as i32 + delta.x).rem_euclid(size.width as i32) as u16;
        let new_y = (self.y as i32 + delta.y).rem_euclid(size.height as i32) as u16;
        Pos { x: new_x, y: new_y }
    }

    pub fn checked_offset(&self, delta: PosDelta, steps: i32, size: Size) -> Option<Pos> {
        let x = self.x as i32 + delta.x * steps;
        let y = self.y as i32 + delta.y * steps;
        if x < 0 || y < 0 || x >= size.width as i32 || y >= size.height as i32 {
            return None;
        }
        Some(Pos {
            x: x as u16,
            y: y as u16,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosDelta {
    pub x: i32,
    pub y: i32,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => PosDelta { x: 0, y: -1 },
            Direction::Down => PosDelta { x: 0, y: 1 },
            Direction::Left => PosDelta { x: -1, y: 0 },
            Direction::Right => PosDelta { x: 1, y: 0 },
        }
    }
}
