//! Cardinal directions on the tile grid

use std::fmt;

/// One of the four grid neighbors of a cell
///
/// Grid coordinates grow to the right (x) and downward (y), so `Up` is `y - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Toward smaller y
    Up,
    /// Toward larger x
    Right,
    /// Toward larger y
    Down,
    /// Toward smaller x
    Left,
}

impl Direction {
    /// All directions in clockwise order starting from `Up`
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// The direction pointing back at the origin cell
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Coordinate delta `(dx, dy)` of one step in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Neighbor of `(x, y)` inside a `width` x `height` grid, if any
    pub const fn step(
        self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Option<(usize, usize)> {
        let (dx, dy) = self.offset();
        let Some(nx) = x.checked_add_signed(dx) else {
            return None;
        };
        let Some(ny) = y.checked_add_signed(dy) else {
            return None;
        };
        if nx < width && ny < height {
            Some((nx, ny))
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}
