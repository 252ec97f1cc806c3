//! Jigsaw pieces and the cyclic rotation model shared by shuffling and reconstruction.

use std::{
    fmt::{Display, Formatter},
    ops::Index,
};

use itertools::Itertools;

use crate::Edge;

/// The number of sides on every piece
pub const SIDES: usize = 4;

/// One of the four sides of a [`Piece`], numbered clockwise starting from the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    /// All the sides, in clockwise order starting from the top
    pub const ALL: [Side; SIDES] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn idx(self) -> usize {
        self as usize
    }

    /// The side which faces this one across a seam
    pub fn opposite(self) -> Side {
        Side::ALL[(self.idx() + 2) % SIDES]
    }
}

/// A single jigsaw piece, described by the [`Edge`]s on its four sides in the order `(top, right,
/// bottom, left)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Piece {
    sides: [Edge; SIDES],
}

impl Piece {
    pub fn new(top: Edge, right: Edge, bottom: Edge, left: Edge) -> Self {
        Self {
            sides: [top, right, bottom, left],
        }
    }

    pub fn from_sides(sides: [Edge; SIDES]) -> Self {
        Self { sides }
    }

    /// A piece with no tabs or blanks (i.e. the only piece of a 1x1 puzzle)
    pub fn flat() -> Self {
        Self::from_sides([Edge::Flat; SIDES])
    }

    pub fn sides(&self) -> [Edge; SIDES] {
        self.sides
    }

    pub fn side(&self, side: Side) -> Edge {
        self.sides[side.idx()]
    }

    /// Cyclically shift the sides of this piece by `k` places, so that side `i` of the result is
    /// side `(i + k) % 4` of `self`.  The edge profiles themselves are never changed.
    ///
    /// On screen, `rotated(1)` turns the piece a quarter-turn anti-clockwise and `rotated(3)` a
    /// quarter-turn clockwise.
    pub fn rotated(&self, k: usize) -> Piece {
        let mut sides = self.sides;
        sides.rotate_left(k % SIDES);
        Piece { sides }
    }

    /// The least rotation of this piece, according to the ordering of [`Edge`]s.  Two pieces
    /// have the same `canonical` form iff one is a rotation of the other.
    pub fn canonical(&self) -> Piece {
        (1..SIDES).map(|k| self.rotated(k)).fold(*self, Piece::min)
    }

    /// An identifier which is shared by all rotations of this piece (and by no other piece).
    /// This is the base-3 encoding of the [`canonical`](Self::canonical) form, so always lies in
    /// `0..81`.
    pub fn class_id(&self) -> u8 {
        self.canonical()
            .sides
            .iter()
            .fold(0u8, |acc, e| acc * Edge::ALL.len() as u8 + e.ordinal() as u8)
    }

    /// Find the smallest `k` such that `self.rotated(k) == *other`, if one exists
    pub fn rotation_to(&self, other: &Piece) -> Option<usize> {
        (0..SIDES).find(|&k| self.rotated(k) == *other)
    }

    /// The number of [`Edge::Flat`] sides on this piece: 0 for interior pieces, 1 for border
    /// pieces and 2 for corners (unless the puzzle is only one cell wide)
    pub fn num_flats(&self) -> usize {
        self.sides.iter().filter(|e| e.is_flat()).count()
    }

    /// The wire representation of this piece: its four edge characters joined by commas
    pub fn to_wire(&self) -> String {
        self.sides.iter().map(|e| e.to_char()).join(",")
    }
}

impl Index<Side> for Piece {
    type Output = Edge;

    fn index(&self, side: Side) -> &Edge {
        &self.sides[side.idx()]
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}
