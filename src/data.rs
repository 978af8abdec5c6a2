/// A grid coordinate, 1-indexed. Signed so that out-of-range input can be
/// represented and rejected by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    pub row: isize,
    pub col: isize,
}

impl Site {
    pub fn new(row: isize, col: isize) -> Site {
        Site { row, col }
    }

    pub fn step(&self, d: Direction) -> Site {
        match d {
            Direction::North => Site { row: self.row - 1, col: self.col },
            Direction::South => Site { row: self.row + 1, col: self.col },
            Direction::West => Site { row: self.row, col: self.col - 1 },
            Direction::East => Site { row: self.row, col: self.col + 1 },
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SiteState {
    Blocked, Open,
}

impl SiteState {
    pub fn is_open(&self) -> bool {
        *self == SiteState::Open
    }
}

impl Default for SiteState {
    fn default() -> SiteState {
        SiteState::Blocked
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    North, East, South, West,
}

impl Direction {
    pub fn adjacent_directions() -> Vec<Direction> {
        vec![Direction::North, Direction::East,
        Direction::South, Direction::West]
    }
}
