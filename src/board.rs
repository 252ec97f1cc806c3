//! Boards of jigsaw pieces, and the generator which creates edge-consistent boards.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use rand::Rng;

use crate::{
    indexed_vec::{CellIdx, CellVec, IdxType, SeamIdx, SeamVec},
    piece::{Side, SIDES},
    Edge, Piece,
};

/// A `rows` by `cols` grid of [`Piece`]s, stored in row-major order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    pieces: CellVec<Piece>,
}

impl Board {
    /// Generate a fresh board where every internal seam is a random `Tab`/`Blank` pair and every
    /// side on the border is flat.  If either dimension is 0, the board is empty.
    pub fn generate(rows: usize, cols: usize, rng: &mut impl Rng) -> Board {
        if rows == 0 || cols == 0 {
            return Board::empty();
        }

        // Vertical seams are recorded from the perspective of the left cell's right side, and
        // horizontal seams from the upper cell's bottom side.  Seam `(r, c)` of each kind is
        // stored at `r * (cols - 1) + c` and `r * cols + c` respectively.
        let seams_v: SeamVec<Edge> = (0..rows * (cols - 1))
            .map(|_| Edge::random_seam(rng))
            .collect();
        let seams_h: SeamVec<Edge> = (0..(rows - 1) * cols)
            .map(|_| Edge::random_seam(rng))
            .collect();
        let seam_v = |r: usize, c: usize| seams_v[SeamIdx::from_idx(r * (cols - 1) + c)];
        let seam_h = |r: usize, c: usize| seams_h[SeamIdx::from_idx(r * cols + c)];

        let mut pieces = CellVec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let top = if r == 0 { Edge::Flat } else { seam_h(r - 1, c).flip() };
                let right = if c == cols - 1 { Edge::Flat } else { seam_v(r, c) };
                let bottom = if r == rows - 1 { Edge::Flat } else { seam_h(r, c) };
                let left = if c == 0 { Edge::Flat } else { seam_v(r, c - 1).flip() };
                pieces.push(Piece::new(top, right, bottom, left));
            }
        }
        log::debug!(
            "Generated {}x{} board ({} vertical and {} horizontal seams)",
            rows,
            cols,
            seams_v.len(),
            seams_h.len()
        );

        Board { rows, cols, pieces }
    }

    /// A board with no cells
    pub fn empty() -> Board {
        Board {
            rows: 0,
            cols: 0,
            pieces: CellVec::new(),
        }
    }

    /// Creates a `Board` from pieces in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `pieces` doesn't contain exactly `rows * cols` pieces
    pub fn from_pieces(rows: usize, cols: usize, pieces: CellVec<Piece>) -> Board {
        assert_eq!(
            pieces.len(),
            rows * cols,
            "a {}x{} board needs {} pieces",
            rows,
            cols,
            rows * cols
        );
        Board { rows, cols, pieces }
    }

    /* GETTERS */

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn num_cells(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &CellVec<Piece> {
        &self.pieces
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut CellVec<Piece> {
        &mut self.pieces
    }

    pub fn get(&self, idx: CellIdx) -> Option<&Piece> {
        self.pieces.get(idx)
    }

    /// Returns the piece at a given `(row, col)`, or `None` if that position is off the board
    pub fn at(&self, row: usize, col: usize) -> Option<&Piece> {
        self.cell_idx(row, col).and_then(|idx| self.pieces.get(idx))
    }

    /// Converts a `(row, col)` position to the linear index `row * cols + col`
    pub fn cell_idx(&self, row: usize, col: usize) -> Option<CellIdx> {
        (row < self.rows && col < self.cols).then(|| CellIdx::from_idx(row * self.cols + col))
    }

    /// Converts a linear index back into a `(row, col)` position
    pub fn position(&self, idx: CellIdx) -> (usize, usize) {
        (idx.to_idx() / self.cols, idx.to_idx() % self.cols)
    }

    /* MUTATION */

    /// Turn the piece at `idx` a quarter-turn clockwise (i.e. replace it with `piece.rotated(3)`).
    /// Returns `false` if `idx` is off the board.
    pub fn rotate_piece(&mut self, idx: CellIdx) -> bool {
        match self.pieces.get_mut(idx) {
            Some(piece) => {
                *piece = piece.rotated(SIDES - 1);
                true
            }
            None => false,
        }
    }

    /* CHECKS */

    /// Returns every place where this board breaks the rules of a solved jigsaw: internal seams
    /// whose sides don't fit together, and border sides which aren't flat.
    pub fn inconsistencies(&self) -> Vec<Inconsistency> {
        let mut problems = Vec::new();
        for (idx, piece) in self.pieces.indexed_iter() {
            let (r, c) = self.position(idx);
            // Border sides
            let on_border = [r == 0, c == self.cols - 1, r == self.rows - 1, c == 0];
            for (&side, &is_border) in Side::ALL.iter().zip_eq(&on_border) {
                if is_border && !piece[side].is_flat() {
                    problems.push(Inconsistency::Border { cell: idx, side });
                }
            }
            // Internal seams are checked from the cell above/left of them, so each is checked
            // exactly once
            let neighbours = [
                (Side::Right, self.cell_idx(r, c + 1)),
                (Side::Bottom, self.cell_idx(r + 1, c)),
            ];
            for (side, neighbour) in neighbours.iter().copied() {
                if let Some(other_idx) = neighbour {
                    let other = self.pieces[other_idx];
                    if !piece[side].fits(other[side.opposite()]) {
                        problems.push(Inconsistency::Seam {
                            cell: idx,
                            side,
                            neighbour: other_idx,
                        });
                    }
                }
            }
        }
        problems
    }

    /// Returns `true` if this board is a correctly assembled jigsaw
    pub fn is_consistent(&self) -> bool {
        self.inconsistencies().is_empty()
    }

    /// Counts the flat sides and the tab/blank balance over the whole board
    pub fn edge_stats(&self) -> EdgeStats {
        let all_edges = self.pieces.iter().flat_map(|p| p.sides().to_vec());
        let mut stats = EdgeStats::default();
        for edge in all_edges {
            if edge.is_flat() {
                stats.flats += 1;
            }
            stats.balance += edge.poke_value();
        }
        stats
    }

    /// The number of flat sides that any consistent board with these dimensions must have
    pub fn expected_flats(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            2 * self.rows + 2 * self.cols
        }
    }

    /* TEXT FORMATS */

    /// Write this board in the text format used by the solving service: each piece is its four
    /// edge characters joined by commas, pieces in a row are separated by `|`, and rows are
    /// separated by newlines.
    pub fn to_text(&self) -> String {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .filter_map(|c| self.at(r, c))
                    .map(Piece::to_wire)
                    .join("|")
            })
            .join("\n")
    }

    /// Parse a board written by [`Board::to_text`]
    pub fn from_text(s: &str) -> Result<Board, BoardParseError> {
        let lines = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect_vec();
        let rows = lines.len();
        let mut cols = None;
        let mut pieces = CellVec::new();
        for (row, line) in lines.iter().enumerate() {
            let row_pieces = line.split('|').collect_vec();
            let expected_cols = *cols.get_or_insert(row_pieces.len());
            if row_pieces.len() != expected_cols {
                return Err(BoardParseError::RaggedRow {
                    row,
                    expected: expected_cols,
                    found: row_pieces.len(),
                });
            }
            for (col, piece_str) in row_pieces.iter().enumerate() {
                pieces.push(parse_piece(piece_str).map_err(|e| e.at(row, col))?);
            }
        }
        Ok(Board {
            rows,
            cols: cols.unwrap_or(0),
            pieces,
        })
    }

    /// Draws this board as ASCII art, three lines of text per row of pieces.  Tabs point out of
    /// their piece, so the seam markers of two neighbouring pieces always point the same way.
    pub fn ascii_art(&self) -> String {
        let mut out = String::new();
        for r in 0..self.rows {
            let row = (0..self.cols).filter_map(|c| self.at(r, c)).collect_vec();
            let marker = |piece: &Piece, side: Side| -> char {
                // Markers for (flat, tab, blank) on each side
                let (flat, tab, blank) = match side {
                    Side::Top => ('-', '^', 'V'),
                    Side::Right => ('|', '>', '<'),
                    Side::Bottom => ('-', 'V', '^'),
                    Side::Left => ('|', '<', '>'),
                };
                match piece[side] {
                    Edge::Flat => flat,
                    Edge::Tab => tab,
                    Edge::Blank => blank,
                }
            };
            let horizontal_line = |side: Side| {
                row.iter()
                    .map(|p| format!("   {}  ", marker(p, side)))
                    .join(" ")
            };

            out.push_str(&horizontal_line(Side::Top));
            out.push('\n');
            for p in &row {
                out.push(marker(p, Side::Left));
                out.push_str("     ");
                out.push(marker(p, Side::Right));
            }
            out.push('\n');
            out.push_str(&horizontal_line(Side::Bottom));
            out.push('\n');
        }
        out
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

fn parse_piece(s: &str) -> Result<Piece, BoardParseError> {
    let parts = s.split(',').map(str::trim).collect_vec();
    if parts.len() != SIDES {
        return Err(BoardParseError::WrongSideCount {
            row: 0,
            col: 0,
            found: parts.len(),
        });
    }
    let mut sides = [Edge::Flat; SIDES];
    for (side, part) in sides.iter_mut().zip_eq(&parts) {
        let mut chars = part.chars();
        *side = match (chars.next(), chars.next()) {
            (Some(c), None) => Edge::from_char(c),
            _ => None,
        }
        .ok_or_else(|| BoardParseError::BadEdge {
            row: 0,
            col: 0,
            found: (*part).to_owned(),
        })?;
    }
    Ok(Piece::from_sides(sides))
}

/// A single way in which a [`Board`] fails to be a correctly assembled jigsaw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inconsistency {
    /// A side on the outer border of the board isn't flat
    Border { cell: CellIdx, side: Side },
    /// The `side` of `cell` doesn't fit against the opposite side of `neighbour`
    Seam {
        cell: CellIdx,
        side: Side,
        neighbour: CellIdx,
    },
}

/// Summary counts over every side of every piece on a [`Board`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeStats {
    /// The number of flat sides
    pub flats: usize,
    /// The number of tabs minus the number of blanks
    pub balance: isize,
}

/// The ways that parsing a [`Board`] from text can fail
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
pub enum BoardParseError {
    #[error("row {row}: expected {expected} pieces, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("piece ({row}, {col}): expected 4 sides, found {found}")]
    WrongSideCount { row: usize, col: usize, found: usize },
    #[error("piece ({row}, {col}): {found:?} is not an edge (expected '-', '<' or '>')")]
    BadEdge {
        row: usize,
        col: usize,
        found: String,
    },
}

impl BoardParseError {
    /// Attach the position of the offending piece
    fn at(self, row: usize, col: usize) -> Self {
        match self {
            BoardParseError::WrongSideCount { found, .. } => {
                BoardParseError::WrongSideCount { row, col, found }
            }
            BoardParseError::BadEdge { found, .. } => BoardParseError::BadEdge { row, col, found },
            e @ BoardParseError::RaggedRow { .. } => e,
        }
    }
}
