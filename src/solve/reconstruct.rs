//! Rebuilding the solved board from the placements reported by a solver.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use itertools::Itertools;

use crate::{
    indexed_vec::{CellIdx, CellVec, IdxType},
    piece::SIDES,
    Board, Piece,
};

/// Where a shuffled piece belongs on the solved board, and how to turn it to get there
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    /// The shift which restores the piece's orientation: the solved piece is
    /// `shuffled_piece.rotated(rotation)`.  Always less than 4.
    pub rotation: usize,
}

impl Display for Placement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.row, self.col, self.rotation)
    }
}

impl FromStr for Placement {
    type Err = String;

    /// Parses one `row,col,rotation` line of a solver's response
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields = s.split(',').map(str::trim).collect_vec();
        if fields.len() != 3 {
            return Err(format!("expected 3 fields, found {}", fields.len()));
        }
        let parse = |name: &str, v: &str| {
            v.parse::<usize>()
                .map_err(|_| format!("{} {:?} is not a non-negative integer", name, v))
        };
        Ok(Placement {
            row: parse("row", fields[0])?,
            col: parse("col", fields[1])?,
            rotation: parse("rotation", fields[2])?,
        })
    }
}

/// Build the solved board from a shuffled board, where `placements[i]` says where the piece in
/// cell `i` of `shuffled` belongs.
pub fn reconstruct(shuffled: &Board, placements: &[Placement]) -> Result<Board, ReconstructError> {
    let indexed = placements
        .iter()
        .enumerate()
        .map(|(i, p)| (CellIdx::from_idx(i), *p))
        .collect_vec();
    reconstruct_indexed(shuffled, &indexed)
}

/// Build the solved board from a shuffled board, given the [`Placement`] of every shuffled cell.
/// The placements can come in any order, but every cell of `shuffled` must be placed exactly
/// once, and no two pieces can be placed in the same cell.  Nothing is returned unless every
/// placement is valid.
pub fn reconstruct_indexed(
    shuffled: &Board,
    placements: &[(CellIdx, Placement)],
) -> Result<Board, ReconstructError> {
    if placements.len() != shuffled.num_cells() {
        return Err(ReconstructError::CountMismatch {
            expected: shuffled.num_cells(),
            found: placements.len(),
        });
    }

    let mut seen = CellVec::repeat(false, shuffled.num_cells());
    let mut solved: CellVec<Option<Piece>> = CellVec::repeat(None, shuffled.num_cells());
    for &(piece_idx, placement) in placements {
        let piece = *shuffled
            .get(piece_idx)
            .ok_or(ReconstructError::UnknownPiece { piece: piece_idx })?;
        if std::mem::replace(&mut seen[piece_idx], true) {
            return Err(ReconstructError::RepeatedPiece { piece: piece_idx });
        }
        if placement.rotation >= SIDES {
            return Err(ReconstructError::BadRotation {
                piece: piece_idx,
                rotation: placement.rotation,
            });
        }
        let target = shuffled
            .cell_idx(placement.row, placement.col)
            .ok_or(ReconstructError::OutOfBounds {
                piece: piece_idx,
                row: placement.row,
                col: placement.col,
            })?;
        let cell = &mut solved[target];
        if cell.is_some() {
            return Err(ReconstructError::DuplicateTarget {
                row: placement.row,
                col: placement.col,
            });
        }
        *cell = Some(piece.rotated(placement.rotation));
    }

    // Every piece was placed in a distinct cell, and there are as many pieces as cells, so every
    // cell is now filled
    let pieces = solved
        .into_iter()
        .collect::<Option<CellVec<Piece>>>()
        .ok_or(ReconstructError::CountMismatch {
            expected: shuffled.num_cells(),
            found: placements.len(),
        })?;
    Ok(Board::from_pieces(shuffled.rows(), shuffled.cols(), pieces))
}

/// The ways in which a set of [`Placement`]s can fail to describe a solved board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ReconstructError {
    #[error("expected {expected} placements, found {found}")]
    CountMismatch { expected: usize, found: usize },
    #[error("{piece:?} is not on the board")]
    UnknownPiece { piece: CellIdx },
    #[error("{piece:?} was placed more than once")]
    RepeatedPiece { piece: CellIdx },
    #[error("{piece:?} has rotation {rotation}, which isn't in 0..4")]
    BadRotation { piece: CellIdx, rotation: usize },
    #[error("{piece:?} was placed at ({row}, {col}), which is off the board")]
    OutOfBounds {
        piece: CellIdx,
        row: usize,
        col: usize,
    },
    #[error("two pieces were placed at ({row}, {col})")]
    DuplicateTarget { row: usize, col: usize },
}
