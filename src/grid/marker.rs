//! Per-traversal visit markers stored alongside each cell's edge mask.

/// One of the four high-nibble bits a traversal uses to remember which cells it
/// has not yet visited.
///
/// Each walk arms its marker on every cell and toggles it off as cells are
/// visited, so distinct markers let the same grid be walked independently
/// without touching its topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisitMarker(u8);

impl VisitMarker {
    /// Bits reserved for markers.
    pub const MASK: u8 = 0xf0;

    pub const PRIMARY: VisitMarker = VisitMarker(0x80);
    pub const SECONDARY: VisitMarker = VisitMarker(0x40);

    /// Creates a marker from a single bit in the high nibble.
    pub const fn new(bit: u8) -> Option<VisitMarker> {
        if bit.count_ones() == 1 && bit & Self::MASK == bit {
            Some(VisitMarker(bit))
        } else {
            None
        }
    }

    /// Returns the marker bit.
    pub const fn bit(self) -> u8 {
        self.0
    }
}
