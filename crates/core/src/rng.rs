//! RNG module - deterministic treasure placement
//!
//! Treasure is placed by rejection sampling: draw a uniformly random cell and
//! retry while it is occupied. The number of draws is capped; once the cap is
//! hit the remaining free cells are enumerated and one of them is picked
//! uniformly, so placement always terminates.
//!
//! Also provides a simple LCG so games are reproducible from a seed.

use crate::types::Position;

/// Rejection draws allowed per board cell before falling back to a scan.
pub const REJECTION_ATTEMPTS_PER_CELL: u32 = 4;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Maps through the high bits: the low bits of a power-of-two LCG have
    /// very short periods, which would correlate consecutive x/y draws.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current generator state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Pick a uniformly random cell of a `grid_size` square board for which
/// `occupied` is false.
///
/// Returns `None` only when every cell is occupied.
pub fn sample_free_cell<F>(rng: &mut SimpleRng, grid_size: u8, occupied: F) -> Option<Position>
where
    F: Fn(Position) -> bool,
{
    let size = grid_size as u32;
    let cells = size * size;
    if cells == 0 {
        return None;
    }

    for _ in 0..cells * REJECTION_ATTEMPTS_PER_CELL {
        let x = rng.next_range(size) as i16;
        let y = rng.next_range(size) as i16;
        let pos = Position::new(x, y);
        if !occupied(pos) {
            return Some(pos);
        }
    }

    // Nearly full board: choose the k-th free cell in row-major order.
    let cell_at = |i: u32| Position::new((i % size) as i16, (i / size) as i16);
    let free = (0..cells).filter(|&i| !occupied(cell_at(i))).count() as u32;
    if free == 0 {
        return None;
    }
    let k = rng.next_range(free) as usize;
    (0..cells)
        .map(cell_at)
        .filter(|&p| !occupied(p))
        .nth(k)
}
