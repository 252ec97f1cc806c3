//! Turning pieces into closed outlines.
//!
//! Every tab and blank is drawn from the same prototype curve.  For each side of a piece, the
//! prototype is mirrored (for tabs), rotated so that it runs clockwise around the piece, scaled
//! to the cell size and moved to the side's starting corner.  All of this is done by a single
//! [`Affine`] transform per side.

use angle::Deg;
use itertools::Itertools;

use crate::{
    indexed_vec::CellIdx,
    piece::{Side, SIDES},
    utils, Board, Edge, Piece, V2,
};

/// The prototype blank, as three cubic Bézier segments given as `(control 1, control 2, end)`.
/// The curve runs along the x-axis from `(0, 0)` to `(1, 0)`, with the outside of the piece
/// towards -y.  The middle lobe bends towards +y (into the piece) and the two shoulders bulge
/// out of it; mirroring in the x-axis gives a tab.
const PROTOTYPE_TAB: [[(f32, f32); 3]; 3] = [
    [(1.0 / 15.0, -2.0 / 15.0), (17.0 / 60.0, -2.0 / 15.0), (1.0 / 3.0, 0.0)],
    [(23.0 / 60.0, 2.0 / 15.0), (37.0 / 60.0, 2.0 / 15.0), (2.0 / 3.0, 0.0)],
    [(43.0 / 60.0, -2.0 / 15.0), (0.95, -0.05), (1.0, 0.0)],
];

/// Layout parameters for the cells of a board, in unscaled units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathOpts {
    /// The side length of each (square) cell
    pub cell_size: f32,
    /// The space left between neighbouring cells, and around the edge of the board
    pub gap: f32,
}

impl Default for PathOpts {
    fn default() -> Self {
        Self {
            cell_size: 300.0,
            gap: 50.0,
        }
    }
}

impl PathOpts {
    /// The top-left corner of the cell at `(row, col)`, after scaling
    pub fn cell_origin(&self, row: usize, col: usize, scale: f32) -> V2 {
        let stride = self.cell_size + self.gap;
        V2::new(
            self.gap + col as f32 * stride,
            self.gap + row as f32 * stride,
        ) * scale
    }

    /// The width and height of a whole board, including the gaps around its edge
    pub fn board_size(&self, rows: usize, cols: usize, scale: f32) -> V2 {
        let stride = self.cell_size + self.gap;
        V2::new(
            cols as f32 * stride + self.gap,
            rows as f32 * stride + self.gap,
        ) * scale
    }
}

/// A transform of the plane which mirrors (optionally), then rotates clockwise, then scales
/// uniformly, then translates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    /// If `true`, points are reflected in the x-axis before anything else happens
    pub mirror: bool,
    /// The number of clockwise quarter-turns
    pub quarter_turns: usize,
    pub scale: f32,
    pub translation: V2,
}

impl Affine {
    /// The transform which maps the prototype's `(0, 0) -> (1, 0)` baseline onto `side` of a cell
    /// whose top-left corner is `origin`, traversing the cell clockwise.  Tabs are mirrored so
    /// that their middle lobe sticks out of the piece instead of into it.
    pub fn for_side(side: Side, edge: Edge, origin: V2, side_length: f32) -> Affine {
        // Corners in clockwise order, starting from the top-left
        let corner_offsets = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let (dx, dy) = corner_offsets[side.idx()];
        Affine {
            mirror: edge == Edge::Tab,
            quarter_turns: side.idx(),
            scale: side_length,
            translation: origin + V2::new(dx, dy) * side_length,
        }
    }

    pub fn apply(&self, v: V2) -> V2 {
        let mirrored = if self.mirror { V2::new(v.x, -v.y) } else { v };
        let rotation = Deg(90.0 * self.quarter_turns as f32);
        utils::rotate_vec(mirrored, rotation) * self.scale + self.translation
    }
}

/// One piece of a path, starting where the previous segment ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line { to: V2 },
    Cubic { ctrl1: V2, ctrl2: V2, to: V2 },
}

impl Segment {
    pub fn end(&self) -> V2 {
        match self {
            Segment::Line { to } | Segment::Cubic { to, .. } => *to,
        }
    }

    /// Every point that defines this segment (control points included)
    fn points(&self) -> Vec<V2> {
        match *self {
            Segment::Line { to } => vec![to],
            Segment::Cubic { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
        }
    }
}

/// The closed outline of one piece, in absolute coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PiecePath {
    pub start: V2,
    /// The segments of the top, right, bottom and left sides, in that order
    pub segments: Vec<Segment>,
}

impl PiecePath {
    /// Where the path finishes.  For any path created by [`piece_path`], this is the same as
    /// `start` (up to floating-point error).
    pub fn end_point(&self) -> V2 {
        self.segments.last().map_or(self.start, Segment::end)
    }

    /// The bounding box of the path's defining points, as a `(min, max)` pair.  Because Bézier
    /// curves lie inside the hull of their control points, this always contains the outline.
    pub fn bbox(&self) -> (V2, V2) {
        let points = self.segments.iter().flat_map(Segment::points);
        // Never `None`, since the start point is always included
        utils::bbox(std::iter::once(self.start).chain(points)).unwrap_or((self.start, self.start))
    }

    /// The path as an SVG path string (i.e. the contents of a `<path>`'s `d` attribute)
    pub fn svg_d(&self) -> String {
        let pt = |v: V2| format!("{} {}", v.x, v.y);
        let segments = self.segments.iter().map(|s| match *s {
            Segment::Line { to } => format!("L {}", pt(to)),
            Segment::Cubic { ctrl1, ctrl2, to } => {
                format!("C {}, {}, {}", pt(ctrl1), pt(ctrl2), pt(to))
            }
        });
        std::iter::once(format!("M {}", pt(self.start)))
            .chain(segments)
            .chain(std::iter::once("Z".to_owned()))
            .join(" ")
    }
}

/// Generate the outline of `piece` when drawn in cell `(row, col)` of a board laid out according
/// to `opts`, with every length multiplied by `scale`.
pub fn piece_path(
    piece: &Piece,
    opts: &PathOpts,
    scale: f32,
    row: usize,
    col: usize,
) -> PiecePath {
    let origin = opts.cell_origin(row, col, scale);
    let side_length = opts.cell_size * scale;

    let mut segments = Vec::with_capacity(SIDES * PROTOTYPE_TAB.len());
    for &side in &Side::ALL {
        let edge = piece[side];
        let transform = Affine::for_side(side, edge, origin, side_length);
        let pt = |(x, y): (f32, f32)| transform.apply(V2::new(x, y));
        match edge {
            Edge::Flat => segments.push(Segment::Line { to: pt((1.0, 0.0)) }),
            Edge::Tab | Edge::Blank => {
                segments.extend(PROTOTYPE_TAB.iter().map(|&[c1, c2, to]| Segment::Cubic {
                    ctrl1: pt(c1),
                    ctrl2: pt(c2),
                    to: pt(to),
                }))
            }
        }
    }

    PiecePath {
        start: origin,
        segments,
    }
}

/// Everything a display layer needs to draw a piece and attach handlers to it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPiece {
    /// The cell of the board that this piece occupies
    pub index: CellIdx,
    pub row: usize,
    pub col: usize,
    /// Shared by all rotations of this piece; see [`Piece::class_id`]
    pub class_id: u8,
    pub path: PiecePath,
}

impl Board {
    /// Generate the outline of every piece on this board, in cell order
    pub fn render(&self, opts: &PathOpts, scale: f32) -> Vec<RenderedPiece> {
        self.pieces()
            .indexed_iter()
            .map(|(index, piece)| {
                let (row, col) = self.position(index);
                RenderedPiece {
                    index,
                    row,
                    col,
                    class_id: piece.class_id(),
                    path: piece_path(piece, opts, scale, row, col),
                }
            })
            .collect_vec()
    }
}
