//! Four-bit open-edge mask.

use serde::{Deserialize, Serialize};

use super::Direction;

/// Which of a cell's four edges are open (passable).
///
/// A set bit means the edge toward that neighbor is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EdgeSet(u8);

impl EdgeSet {
    /// Bits used by the mask.
    pub const MASK: u8 = 0x0f;

    /// All four edges closed.
    pub const CLOSED: EdgeSet = EdgeSet(0);

    /// Builds a set from raw bits, ignoring anything above the low nibble.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if the edge toward `dir` is open.
    pub const fn is_open(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    /// Opens the edge toward `dir`.
    pub fn open(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    /// Flips the edge toward `dir`.
    pub fn toggle(&mut self, dir: Direction) {
        self.0 ^= dir.bit();
    }

    /// Number of open edges.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if every edge is closed.
    pub const fn is_closed(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the open directions in bit order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::all().into_iter().filter(move |&d| self.is_open(d))
    }
}
