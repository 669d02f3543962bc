use std::collections::VecDeque;

use log::warn;

use crate::geometry::{Direction, Pos, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub new_head: Pos,
    pub old_head: Pos,
    // Cell the tail left, if the tail moved.
    pub vacated: Option<Pos>,
}

// Segments front to back: index 0 is the head, the last one the tail.
#[derive(Debug, Clone)]
pub struct Snake {
    segments: VecDeque<Pos>,
    max_length: usize,
    pending_growth: bool,
    vacated: Option<Pos>,
}

impl Snake {
    pub fn new(head: Pos, length: u16, direction: Direction, max_length: usize, size: Size) -> Self {
        let behind = direction.opposite().into();
        let mut segments = VecDeque::with_capacity(max_length);
        let mut pos = head;
        for _ in 0..length {
            segments.push_back(pos);
            pos = pos.wrapped_add(behind, size);
        }

        Snake {
            segments,
            max_length,
            pending_growth: false,
            vacated: None,
        }
    }

    #[cfg(test)]
    pub fn from_segments(segments: impl IntoIterator<Item = Pos>) -> Self {
        Snake {
            segments: segments.into_iter().collect(),
            max_length: crate::config::MAX_SNAKE_LENGTH,
            pending_growth: false,
            vacated: None,
        }
    }

    pub fn head(&self) -> Pos {
        self.segments[0]
    }

    pub fn segments(&self) -> impl Iterator<Item = &Pos> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    // Leaving through an exit gap lands just inside the opposite edge
    pub fn next_head(&self, direction: Direction, size: Size) -> Pos {
        let new_head = self.head().wrapped_add(direction.into(), size);
        size.through_exit(new_head).unwrap_or(new_head)
    }

    pub fn advance(&mut self, direction: Direction, size: Size) -> Step {
        let old_head = self.head();
        let new_head = self.next_head(direction, size);

        self.segments.push_front(new_head);
        let vacated = if self.pending_growth {
            self.pending_growth = false;
            None
        } else {
            self.segments.pop_back()
        };
        self.vacated = vacated;

        Step {
            new_head,
            old_head,
            vacated,
        }
    }

    // Adds one segment. Re-attaches the tail the last `advance` left behind,
    // or keeps the tail on the next `advance` if nothing was vacated.
    // Returns whether the tail was re-attached right away.
    pub fn grow(&mut self) -> bool {
        if self.segments.len() >= self.max_length {
            warn!("Snake already at maximum length {}", self.max_length);
            return false;
        }

        match self.vacated.take() {
            Some(tail) => {
                self.segments.push_back(tail);
                true
            }
            None => {
                self.pending_growth = true;
                false
            }
        }
    }

    pub fn self_collides(&self, new_head: Pos) -> bool {
        self.segments.iter().skip(1).any(|pos| *pos == new_head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: Size = Size {
        width: 80,
        height: 40,
    };

    fn straight_snake(head: Pos, length: u16, direction: Direction) -> Snake {
        Snake::new(head, length, direction, 100, BOARD)
    }

    #[test]
    fn test_new_snake_trails_behind_head() {
        let snake = straight_snake(Pos::new(40, 20), 10, Direction::Right);

        assert_eq!(snake.len(), 10);
        assert_eq!(snake.head(), Pos::new(40, 20));
        let xs: Vec<u16> = snake.segments().map(|pos| pos.x).collect();
        assert_eq!(xs, (31..=40).rev().collect::<Vec<_>>());
        assert!(snake.segments().all(|pos| pos.y == 20));
    }

    #[test]
    fn test_advance_moves_head_one_cell() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            // Start heading Up so every direction but Down is a legal turn;
            // advance itself does not care about reversals.
            let mut snake = straight_snake(Pos::new(40, 20), 4, Direction::Up);
            let old = snake.head();
            let step = snake.advance(dir, BOARD);

            let dx = (step.new_head.x as i32 - old.x as i32).abs();
            let dy = (step.new_head.y as i32 - old.y as i32).abs();
            assert_eq!(dx + dy, 1, "moving {:?}", dir);
            assert_eq!(step.old_head, old);
        }
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = straight_snake(Pos::new(40, 20), 3, Direction::Right);
        let initial: Vec<Pos> = snake.segments().copied().collect();

        let step = snake.advance(Direction::Right, BOARD);

        assert_eq!(step.new_head, Pos::new(41, 20));
        assert_eq!(step.vacated, Some(initial[2]), "Tail was removed");
        let moved: Vec<Pos> = snake.segments().copied().collect();
        assert_eq!(moved, vec![Pos::new(41, 20), initial[0], initial[1]]);
        assert_eq!(snake.len(), 3, "Length remained the same");
    }

    #[test]
    fn test_grow_reattaches_vacated_tail() {
        let mut snake = straight_snake(Pos::new(40, 20), 10, Direction::Right);
        let step = snake.advance(Direction::Right, BOARD);

        assert!(snake.grow());
        assert_eq!(snake.len(), 11);
        assert_eq!(snake.segments().last().copied(), step.vacated);

        // Growth is permanent
        snake.advance(Direction::Right, BOARD);
        assert_eq!(snake.len(), 11);
    }

    #[test]
    fn test_grow_before_advance_keeps_next_tail() {
        let mut snake = straight_snake(Pos::new(40, 20), 3, Direction::Right);

        assert!(!snake.grow());
        let step = snake.advance(Direction::Right, BOARD);
        assert_eq!(step.vacated, None);
        assert_eq!(snake.len(), 4);

        let step = snake.advance(Direction::Right, BOARD);
        assert!(step.vacated.is_some());
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_grow_stops_at_max_length() {
        let mut snake = Snake::new(Pos::new(40, 20), 3, Direction::Right, 3, BOARD);
        snake.advance(Direction::Right, BOARD);
        assert!(!snake.grow());
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_tight_loop_self_collision() {
        // Head at (5,5) heading Down, body curls round to its left:
        //   (4,4) (5,4)
        //   (4,5) (5,5)<head
        let snake = Snake::from_segments([
            Pos::new(5, 5),
            Pos::new(5, 4),
            Pos::new(4, 4),
            Pos::new(4, 5),
        ]);

        // Turning Left runs into the tail segment
        let new_head = snake.next_head(Direction::Left, BOARD);
        assert_eq!(new_head, Pos::new(4, 5));
        assert!(snake.self_collides(new_head));
        assert!(snake.self_collides(Pos::new(5, 4)));
    }

    #[test]
    fn test_head_position_is_not_a_self_hit() {
        let snake = Snake::from_segments([Pos::new(5, 5), Pos::new(4, 5), Pos::new(3, 5)]);
        assert!(!snake.self_collides(Pos::new(5, 5)));
        assert!(snake.self_collides(Pos::new(4, 5)));
        assert!(!snake.self_collides(Pos::new(8, 8)));
    }

    #[test]
    fn test_open_move_does_not_self_collide() {
        let mut snake = Snake::from_segments([
            Pos::new(5, 5),
            Pos::new(5, 4),
            Pos::new(4, 4),
            Pos::new(4, 5),
        ]);

        for direction in [Direction::Right, Direction::Down] {
            let new_head = snake.next_head(direction, BOARD);
            assert!(!snake.self_collides(new_head), "moving {:?}", direction);
            snake.advance(direction, BOARD);
        }
    }

    #[test]
    fn test_wraparound_through_right_exit() {
        let mut snake = straight_snake(Pos::new(78, 20), 3, Direction::Right);
        let step = snake.advance(Direction::Right, BOARD);
        assert_eq!(step.new_head, Pos::new(1, 20));
    }

    #[test]
    fn test_wraparound_through_top_exit() {
        let mut snake = straight_snake(Pos::new(40, 1), 3, Direction::Up);
        let step = snake.advance(Direction::Up, BOARD);
        assert_eq!(step.new_head, Pos::new(40, 38));
    }

    #[test]
    fn test_non_exit_border_does_not_wrap() {
        let mut snake = straight_snake(Pos::new(78, 21), 3, Direction::Right);
        let step = snake.advance(Direction::Right, BOARD);
        assert_eq!(step.new_head, Pos::new(79, 21));
    }

    #[test]
    fn test_next_head_matches_advance() {
        let mut snake = straight_snake(Pos::new(78, 20), 3, Direction::Right);
        let predicted = snake.next_head(Direction::Right, BOARD);
        assert_eq!(snake.head(), Pos::new(78, 20), "next_head does not move");
        assert_eq!(snake.advance(Direction::Right, BOARD).new_head, predicted);
    }
}
