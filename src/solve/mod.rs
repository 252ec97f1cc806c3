//! The wire contract with the external solving service.  The crate never solves puzzles itself:
//! it encodes a shuffled board as a [`SolveRequest`], hands it to a [`Transport`], and parses the
//! service's reply into a [`SolveResponse`].

use std::time::Duration;

use itertools::Itertools;

use crate::{
    indexed_vec::{CellIdx, IdxType},
    Board, Piece,
};

#[cfg(feature = "http")]
mod http;
mod reconstruct;

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use reconstruct::{reconstruct, reconstruct_indexed, Placement, ReconstructError};

/// The prefix of the first line of every response which reports that a puzzle can't be solved
pub const UNSOLVABLE_PREFIX: &str = "UNSOLVABLE:";

/// The route (relative to [`SolverConfig::base_url`]) which accepts solve requests
pub const SOLVE_ROUTE: &str = "/jigsaw/solve";

/// Anything which can carry a [`SolveRequest`] to a solving service and return the body of its
/// reply.  Implementations must report non-2xx replies as [`SolveError::Status`].
pub trait Transport {
    fn send(&self, request: &SolveRequest) -> Result<String, SolveError>;
}

/// Closures can be used as transports (this is mostly useful for tests and for solvers which
/// live in the same process)
impl<F> Transport for F
where
    F: Fn(&SolveRequest) -> Result<String, SolveError>,
{
    fn send(&self, request: &SolveRequest) -> Result<String, SolveError> {
        self(request)
    }
}

/// Configuration for talking to the solving service
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Scheme, host and port of the service, without a trailing slash
    pub base_url: String,
    /// The largest number of rows or columns that the service will accept
    pub max_dimension: usize,
    /// How long to wait for the whole round trip.  `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_owned(),
            max_dimension: 100,
            timeout: None,
        }
    }
}

/// A shuffled board, encoded for the solving service.  Each line of the body remembers which
/// cell of the shuffled board it came from, so that the response can be matched back up with
/// the pieces without relying on the order of a `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRequest {
    rows: usize,
    cols: usize,
    lines: Vec<(CellIdx, Piece)>,
}

impl SolveRequest {
    /// Encode a (shuffled) board.  Fails if the board is bigger than the service accepts.
    pub fn new(board: &Board, config: &SolverConfig) -> Result<Self, SolveError> {
        if board.rows() > config.max_dimension || board.cols() > config.max_dimension {
            return Err(SolveError::DimensionLimit {
                rows: board.rows(),
                cols: board.cols(),
                max: config.max_dimension,
            });
        }
        Ok(Self {
            rows: board.rows(),
            cols: board.cols(),
            lines: board
                .pieces()
                .indexed_iter()
                .map(|(idx, piece)| (idx, *piece))
                .collect_vec(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The indexed pieces, in the order that they are sent
    pub fn lines(&self) -> &[(CellIdx, Piece)] {
        &self.lines
    }

    /// The path and query string of the request
    pub fn path(&self) -> String {
        format!("{}?M={}&N={}", SOLVE_ROUTE, self.rows, self.cols)
    }

    /// The request body: one line per piece, each containing the piece's four edges joined by
    /// commas
    pub fn body(&self) -> String {
        self.lines.iter().map(|(_, piece)| piece.to_wire()).join("\n")
    }

    /// Runs the same sanity checks as the solving service, returning the reason if the pieces
    /// can't possibly form a jigsaw of this size.  Rotating or moving pieces never changes the
    /// outcome, so this only fails for boards which didn't come from [`Board::generate`].
    pub fn preflight(&self) -> Option<String> {
        let board = Board::from_pieces(
            self.rows,
            self.cols,
            self.lines.iter().map(|(_, p)| *p).collect(),
        );
        let stats = board.edge_stats();
        if stats.flats != board.expected_flats() {
            return Some(format!(
                "Flat mismatch: {}<>{}",
                stats.flats,
                board.expected_flats()
            ));
        }
        if stats.balance != 0 {
            return Some(format!("Pokes imbalance: {}", stats.balance));
        }
        None
    }

    /// Parse the body of a 2xx reply to this request
    pub fn parse_response(&self, text: &str) -> Result<SolveResponse, SolveError> {
        let lines = text.trim_end().lines().collect_vec();
        if let Some(reason) = lines
            .first()
            .and_then(|l| l.trim_start().strip_prefix(UNSOLVABLE_PREFIX))
        {
            return Ok(SolveResponse::Unsolvable(reason.trim().to_owned()));
        }
        if lines.len() != self.lines.len() {
            return Err(SolveError::LineCount {
                expected: self.lines.len(),
                found: lines.len(),
            });
        }
        let placements = lines
            .iter()
            .zip_eq(&self.lines)
            .enumerate()
            .map(|(line_idx, (line, (cell_idx, _)))| {
                line.parse::<Placement>()
                    .map(|p| (*cell_idx, p))
                    .map_err(|reason| SolveError::Malformed {
                        line: line_idx + 1,
                        reason,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SolveResponse::Solved(placements))
    }
}

/// The solving service's answer to a [`SolveRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResponse {
    /// The [`Placement`] of every piece, keyed by the piece's cell on the shuffled board
    Solved(Vec<(CellIdx, Placement)>),
    /// The service reported that no solution exists, with its explanation
    Unsolvable(String),
}

impl SolveResponse {
    /// Formats this response the way the service sends it.  `Solved` placements are written in
    /// cell order.
    pub fn to_wire(&self) -> String {
        match self {
            SolveResponse::Solved(placements) => placements
                .iter()
                .sorted_by_key(|(idx, _)| idx.to_idx())
                .map(|(_, p)| p.to_string())
                .join("\n"),
            SolveResponse::Unsolvable(reason) => format!("{} {}", UNSOLVABLE_PREFIX, reason),
        }
    }
}

/// The ways that a round trip to the solving service can fail.  Note that an unsolvable puzzle
/// is not an error; see [`SolveResponse::Unsolvable`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("a {rows}x{cols} board exceeds the solver's limit of {max} rows or columns")]
    DimensionLimit { rows: usize, cols: usize, max: usize },
    #[error("could not reach solver: {0}")]
    Transport(String),
    #[error("solver replied with HTTP status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("solver sent {found} lines for {expected} pieces")]
    LineCount { expected: usize, found: usize },
    #[error("solver response line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("solver placements don't describe a board: {0}")]
    Reconstruct(#[from] ReconstructError),
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::{shuffle, Edge};

    fn request(rows: usize, cols: usize) -> (crate::Scramble, SolveRequest) {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let scramble = shuffle(&Board::generate(rows, cols, &mut rng), &mut rng);
        let request = SolveRequest::new(&scramble.board, &SolverConfig::default()).unwrap();
        (scramble, request)
    }

    #[test]
    fn request_encoding() {
        let (scramble, request) = request(2, 3);
        assert_eq!(request.path(), "/jigsaw/solve?M=2&N=3");
        let body = request.body();
        assert_eq!(body.lines().count(), 6);
        for (line, piece) in body.lines().zip(scramble.board.pieces().iter()) {
            assert_eq!(line, piece.to_wire());
            assert_eq!(line.len(), 7);
        }
        assert_eq!(request.preflight(), None);
    }

    #[test]
    fn dimension_limit() {
        let board = Board::generate(101, 1, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(
            SolveRequest::new(&board, &SolverConfig::default()),
            Err(SolveError::DimensionLimit {
                rows: 101,
                cols: 1,
                max: 100
            })
        );
    }

    #[test]
    fn preflight_catches_impossible_pieces() {
        let blank = Piece::new(Edge::Flat, Edge::Blank, Edge::Flat, Edge::Flat);
        let board = Board::from_pieces(1, 2, vec![blank, blank].into_iter().collect());
        let request = SolveRequest::new(&board, &SolverConfig::default()).unwrap();
        assert_eq!(request.preflight(), Some("Pokes imbalance: 2".to_owned()));

        let tab = Piece::new(Edge::Flat, Edge::Tab, Edge::Flat, Edge::Flat);
        let board = Board::from_pieces(1, 2, vec![tab, tab].into_iter().collect());
        let request = SolveRequest::new(&board, &SolverConfig::default()).unwrap();
        assert_eq!(request.preflight(), Some("Pokes imbalance: -2".to_owned()));

        let flat = Piece::flat();
        let board = Board::from_pieces(1, 2, vec![flat, flat].into_iter().collect());
        let request = SolveRequest::new(&board, &SolverConfig::default()).unwrap();
        assert_eq!(request.preflight(), Some("Flat mismatch: 8<>6".to_owned()));
    }

    #[test]
    fn parse_unsolvable() {
        let (_, request) = request(2, 2);
        assert_eq!(
            request.parse_response("UNSOLVABLE:no solution\n"),
            Ok(SolveResponse::Unsolvable("no solution".to_owned()))
        );
    }

    #[test]
    fn parse_answer_key() {
        let (scramble, request) = request(3, 3);
        let indexed = scramble
            .answer_key
            .indexed_iter()
            .map(|(idx, p)| (idx, *p))
            .collect_vec();
        let wire = SolveResponse::Solved(indexed.clone()).to_wire();
        let parsed = request.parse_response(&(wire + "\n\n")).unwrap();
        assert_eq!(parsed, SolveResponse::Solved(indexed));
    }

    #[test]
    fn malformed_responses_are_rejected() {
        let (_, request) = request(1, 2);
        assert_eq!(
            request.parse_response("0,0,0"),
            Err(SolveError::LineCount {
                expected: 2,
                found: 1
            })
        );
        assert!(matches!(
            request.parse_response("0,0,0\n0,x,1"),
            Err(SolveError::Malformed { line: 2, .. })
        ));
        assert!(matches!(
            request.parse_response("0,0\n0,1,1"),
            Err(SolveError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn closures_are_transports() {
        let (_, request) = request(1, 1);
        let transport = |r: &SolveRequest| -> Result<String, SolveError> {
            Ok(format!("{} lines", r.lines().len()))
        };
        assert_eq!(transport.send(&request), Ok("1 lines".to_owned()));
    }
}
