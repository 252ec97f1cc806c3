use vector2d::Vector2D;

mod board;
mod edge;
mod geometry;
pub mod indexed_vec;
mod piece;
mod session;
mod shuffle;
pub mod solve;
pub mod svg;
mod utils;

pub use board::{Board, BoardParseError, EdgeStats, Inconsistency};
pub use edge::Edge;
pub use geometry::{piece_path, Affine, PathOpts, PiecePath, RenderedPiece, Segment};
pub use piece::{Piece, Side, SIDES};
pub use session::{Session, SessionConfig, SessionError, SolveOutcome, SolveTicket, Version};
pub use shuffle::{shuffle, Scramble};
pub use solve::{
    reconstruct, reconstruct_indexed, Placement, ReconstructError, SolveError, SolveRequest,
    SolveResponse, SolverConfig, Transport,
};
pub use svg::{gen_svg, gen_svg_string, RenderingOpts};

/// Type alias for 2D floating point vectors (in the geometric sense, unlike [`Vec`])
pub type V2 = Vector2D<f32>;
