//! Snake body - ordered cells plus an occupancy grid
//!
//! The body is a deque with the head at the front. A flat occupancy array,
//! row-major like a board, mirrors it so collision and treasure checks are
//! O(1) regardless of length.

use std::collections::VecDeque;

use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    occupied: Vec<bool>,
    grid_size: u8,
}

impl Snake {
    /// Build a snake from `segments`, head first.
    ///
    /// Segments outside the grid are dropped; callers pass validated layouts.
    pub fn new(grid_size: u8, segments: &[Position]) -> Self {
        let cells = grid_size as usize * grid_size as usize;
        let mut snake = Self {
            body: VecDeque::with_capacity(cells),
            occupied: vec![false; cells],
            grid_size,
        };
        for &pos in segments {
            if let Some(idx) = snake.index(pos) {
                snake.occupied[idx] = true;
                snake.body.push_back(pos);
            }
        }
        snake
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if !pos.in_bounds(self.grid_size) {
            return None;
        }
        Some(pos.y as usize * self.grid_size as usize + pos.x as usize)
    }

    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    pub fn tail(&self) -> Option<Position> {
        self.body.back().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn grid_size(&self) -> u8 {
        self.grid_size
    }

    /// True if any segment sits on `pos`. Off-board cells are never occupied.
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.occupied[i])
    }

    /// Segments from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// True when the body covers every cell of the grid.
    pub fn fills_grid(&self) -> bool {
        self.body.len() == self.occupied.len()
    }

    /// Prepend a new head. Returns false (and leaves the body alone) if
    /// `pos` is off the board.
    pub fn push_head(&mut self, pos: Position) -> bool {
        let Some(idx) = self.index(pos) else {
            return false;
        };
        self.occupied[idx] = true;
        self.body.push_front(pos);
        true
    }

    /// Remove and return the last segment.
    pub fn pop_tail(&mut self) -> Option<Position> {
        let tail = self.body.pop_back()?;
        if let Some(idx) = self.index(tail) {
            self.occupied[idx] = false;
        }
        Some(tail)
    }

    /// Copy the segments into `out`, reusing its allocation.
    pub fn write_into(&self, out: &mut Vec<Position>) {
        out.clear();
        out.extend(self.body.iter().copied());
    }
}
