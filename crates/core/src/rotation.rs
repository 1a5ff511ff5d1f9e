//! Rotation registry - precomputed rotation cycles for the canonical pieces
//!
//! Each canonical kind owns a [`RotationCycle`]: its root orientation followed by every
//! geometrically distinct 90° counter-clockwise rotation, in order. The "next rotation"
//! link is an index into that cycle, wrapping back to the root, so no piece holds a
//! reference to another.
//!
//! The table is built once, on first use, and is read-only afterwards.

use std::ops::Index;
use std::sync::OnceLock;

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{PieceKind, MAX_ROTATIONS};

/// The closed sequence of distinct orientations of one shape, root first
#[derive(Debug, Clone)]
pub struct RotationCycle {
    pieces: ArrayVec<Piece, MAX_ROTATIONS>,
}

impl RotationCycle {
    /// Entry point of the cycle
    pub fn root(&self) -> &Piece {
        &self.pieces[0]
    }

    /// Number of distinct orientations (1, 2 or 4)
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Orientation at `index`, counted in ccw steps from the root
    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    /// Index of the next ccw rotation after `index`
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.pieces.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }
}

impl Index<usize> for RotationCycle {
    type Output = Piece;

    fn index(&self, index: usize) -> &Piece {
        &self.pieces[index]
    }
}

/// Rotate `root` until the result is geometrically equal to it again.
///
/// The returned cycle starts at `root` and holds every orientation seen before closure.
pub fn build_rotation_cycle(root: Piece) -> RotationCycle {
    let mut next = root.rotate_ccw();
    let mut pieces = ArrayVec::new();
    pieces.push(root);

    // A 90° rotation is closed after at most four steps.
    while !next.geometric_eq(&pieces[0]) && !pieces.is_full() {
        let after = next.rotate_ccw();
        pieces.push(next);
        next = after;
    }
    debug_assert!(next.geometric_eq(&pieces[0]), "rotation cycle did not close");

    RotationCycle { pieces }
}

/// Process-wide table of rotation cycles, one per canonical kind
#[derive(Debug)]
pub struct RotationTable {
    cycles: [RotationCycle; 7],
}

impl RotationTable {
    fn build() -> Self {
        let cycles = PieceKind::ALL.map(|kind| {
            let root: Piece = kind
                .body_str()
                .parse()
                .unwrap_or_else(|e| panic!("canonical {} body is malformed: {e}", kind.as_str()));
            let cycle = build_rotation_cycle(root);
            log::debug!(
                "built rotation cycle for {} with {} orientation(s)",
                kind.as_str(),
                cycle.len()
            );
            cycle
        });
        Self { cycles }
    }

    /// Rotation cycle of a canonical kind
    pub fn cycle(&self, kind: PieceKind) -> &RotationCycle {
        &self.cycles[kind.index()]
    }

    /// Root orientation of a canonical kind
    pub fn root(&self, kind: PieceKind) -> &Piece {
        self.cycle(kind).root()
    }

    /// The seven root pieces in registry order
    pub fn roots(&self) -> impl Iterator<Item = &Piece> {
        self.cycles.iter().map(RotationCycle::root)
    }
}

static TABLE: OnceLock<RotationTable> = OnceLock::new();

/// Shared rotation table, built on first call
pub fn pieces() -> &'static RotationTable {
    TABLE.get_or_init(RotationTable::build)
}

/// Copyable handle to one orientation of a canonical piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRef {
    kind: PieceKind,
    rotation: usize,
}

impl PieceRef {
    /// Root orientation of `kind`
    pub fn root(kind: PieceKind) -> Self {
        Self { kind, rotation: 0 }
    }

    /// Orientation `rotation` of `kind`, or `None` past the end of its cycle
    pub fn new(kind: PieceKind, rotation: usize) -> Option<Self> {
        (rotation < pieces().cycle(kind).len()).then_some(Self { kind, rotation })
    }

    pub fn kind(self) -> PieceKind {
        self.kind
    }

    /// Number of ccw steps from the root
    pub fn rotation(self) -> usize {
        self.rotation
    }

    /// Number of orientations in this piece's cycle
    pub fn rotations(self) -> usize {
        pieces().cycle(self.kind).len()
    }

    /// Next 90° counter-clockwise orientation, wrapping to the root
    pub fn next(self) -> Self {
        Self {
            kind: self.kind,
            rotation: pieces().cycle(self.kind).next_index(self.rotation),
        }
    }

    pub fn piece(self) -> &'static Piece {
        &pieces().cycle(self.kind)[self.rotation]
    }
}
