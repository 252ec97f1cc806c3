//! The state of one puzzle being played: the problem board, its solution (if one has been
//! computed), and a version number which lets late solver responses be recognised and dropped.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    indexed_vec::{CellIdx, CellVec},
    shuffle, solve, Board, Placement, SolveError, SolveRequest, SolveResponse, SolverConfig,
    Transport,
};

/// Identifies one state of a session's problem board.  Every change to the problem board produces
/// a larger `Version`.
pub type Version = u64;

/// Configuration parameters for a [`Session`]
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Seed for the random number generator.  `None` seeds from the operating system.
    pub seed: Option<u64>,
    pub solver: SolverConfig,
}

/// An in-progress puzzle.  The problem board is only ever replaced wholesale (by
/// [`generate`](Self::generate) or [`shuffle`](Self::shuffle)) or changed one piece at a time (by
/// [`rotate_piece`](Self::rotate_piece)); each of these clears any solution and bumps the
/// version.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    rng: ChaCha8Rng,
    version: Version,
    problem: Board,
    /// The solved layout of the current problem board, if a solver has provided one
    solution: Option<Board>,
    /// How to undo the most recent shuffle, if the board hasn't been touched since
    answer_key: Option<CellVec<Placement>>,
}

impl Session {
    /// Creates a session with an empty board
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            rng,
            version: 0,
            problem: Board::empty(),
            solution: None,
            answer_key: None,
        }
    }

    /* GETTERS */

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn problem(&self) -> &Board {
        &self.problem
    }

    pub fn solution(&self) -> Option<&Board> {
        self.solution.as_ref()
    }

    /// The placements which undo the most recent shuffle.  This is `None` if the board hasn't been
    /// shuffled, or if a piece has been rotated since.
    pub fn answer_key(&self) -> Option<&CellVec<Placement>> {
        self.answer_key.as_ref()
    }

    /* BOARD OPERATIONS */

    /// Replace the problem board with a freshly generated `rows` by `cols` puzzle
    pub fn generate(&mut self, rows: usize, cols: usize) -> Version {
        let board = Board::generate(rows, cols, &mut self.rng);
        self.replace_problem(board, None)
    }

    /// Replace the problem board with a shuffled copy of itself
    pub fn shuffle(&mut self) -> Version {
        let scramble = shuffle(&self.problem, &mut self.rng);
        self.replace_problem(scramble.board, Some(scramble.answer_key))
    }

    /// Turn one piece of the problem board a quarter-turn clockwise
    pub fn rotate_piece(&mut self, idx: CellIdx) -> Result<Version, SessionError> {
        if !self.problem.rotate_piece(idx) {
            return Err(SessionError::NoSuchPiece { idx });
        }
        self.solution = None;
        self.answer_key = None;
        self.version += 1;
        Ok(self.version)
    }

    fn replace_problem(
        &mut self,
        board: Board,
        answer_key: Option<CellVec<Placement>>,
    ) -> Version {
        self.problem = board;
        self.solution = None;
        self.answer_key = answer_key;
        self.version += 1;
        self.version
    }

    /* SOLVING */

    /// Snapshot the current problem board as a request to the solving service.  The ticket can
    /// be sent from anywhere; its answer is passed back to
    /// [`apply_solve_response`](Self::apply_solve_response).
    pub fn solve_request(&self) -> Result<SolveTicket, SolveError> {
        Ok(SolveTicket {
            version: self.version,
            request: SolveRequest::new(&self.problem, &self.config.solver)?,
        })
    }

    /// Apply the solving service's reply to a ticket.  Replies to out-of-date tickets are dropped
    /// without looking at them.  If anything goes wrong, the session is left unchanged.
    pub fn apply_solve_response(
        &mut self,
        ticket: &SolveTicket,
        reply: Result<String, SolveError>,
    ) -> Result<SolveOutcome, SolveError> {
        if ticket.version != self.version {
            log::warn!(
                "Dropping solver reply for version {} (board is now at version {})",
                ticket.version,
                self.version
            );
            return Ok(SolveOutcome::Stale {
                ticket: ticket.version,
                current: self.version,
            });
        }

        let text = reply.map_err(|e| {
            log::warn!("Solve request failed: {}", e);
            e
        })?;
        match ticket.request.parse_response(&text)? {
            SolveResponse::Unsolvable(reason) => {
                log::info!("Solver reported an unsolvable puzzle: {}", reason);
                self.solution = None;
                Ok(SolveOutcome::Unsolvable(reason))
            }
            SolveResponse::Solved(placements) => {
                let solution = solve::reconstruct_indexed(&self.problem, &placements)?;
                log::info!(
                    "Installed {}x{} solution for version {}",
                    solution.rows(),
                    solution.cols(),
                    self.version
                );
                self.solution = Some(solution);
                Ok(SolveOutcome::Solved)
            }
        }
    }

    /// Run a whole solve round trip through `transport`.  Boards which can't possibly be solved
    /// are reported as unsolvable without contacting the service.
    pub fn solve_with(&mut self, transport: &impl Transport) -> Result<SolveOutcome, SolveError> {
        let ticket = self.solve_request()?;
        if let Some(reason) = ticket.request.preflight() {
            log::info!("Not sending unsolvable puzzle to solver: {}", reason);
            return Ok(SolveOutcome::Unsolvable(reason));
        }
        let reply = transport.send(&ticket.request);
        self.apply_solve_response(&ticket, reply)
    }
}

/// A [`SolveRequest`] tagged with the version of the board it was made from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveTicket {
    pub version: Version,
    pub request: SolveRequest,
}

/// What happened when a solver's reply was applied to a [`Session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The solution board has been installed
    Solved,
    /// The solver found no solution; the solution board is left empty
    Unsolvable(String),
    /// The board changed after the request was made, so the reply was ignored
    Stale { ticket: Version, current: Version },
}

/// The ways that operations on a [`Session`] can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum SessionError {
    #[error("there is no piece at {idx:?}")]
    NoSuchPiece { idx: CellIdx },
}
