//! Scrambling a board by permuting and rotating its pieces.

use rand::Rng;

use crate::{
    indexed_vec::{CellIdx, CellVec, IdxType},
    piece::SIDES,
    Board, Placement,
};

/// The result of [`shuffle`]ing a [`Board`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scramble {
    /// The shuffled board, with the same dimensions as the original
    pub board: Board,
    /// For each cell of the shuffled board, the [`Placement`] which puts that piece back where it
    /// came from.  Passing this to [`reconstruct`](crate::reconstruct) recovers the original
    /// board exactly.
    pub answer_key: CellVec<Placement>,
}

/// Shuffle the pieces of a board with a Fisher-Yates shuffle, giving each piece an independent
/// random rotation as soon as its final position is settled.  The set of pieces (up to
/// rotation) is unchanged; only their positions and orientations are lost.
pub fn shuffle(board: &Board, rng: &mut impl Rng) -> Scramble {
    let mut shuffled = board.clone();
    // Track where each piece started, so that we can build the answer key
    let mut origins: CellVec<CellIdx> = board.pieces().indices().collect();

    let len = shuffled.num_cells();
    let mut answer_key = CellVec::with_capacity(len);
    for i in 0..len {
        let j = rng.gen_range(i..len);
        let (idx_i, idx_j) = (CellIdx::from_idx(i), CellIdx::from_idx(j));
        shuffled.pieces_mut().swap(idx_i, idx_j);
        origins.swap(idx_i, idx_j);

        // The piece at `i` will never move again, so this is the only time it gets rotated
        let k = rng.gen_range(0..SIDES);
        let piece = &mut shuffled.pieces_mut()[idx_i];
        *piece = piece.rotated(k);

        let (row, col) = board.position(origins[idx_i]);
        answer_key.push(Placement {
            row,
            col,
            rotation: (SIDES - k) % SIDES,
        });
    }
    log::debug!("Shuffled {}x{} board", shuffled.rows(), shuffled.cols());

    Scramble {
        board: shuffled,
        answer_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use itertools::Itertools;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::reconstruct;

    fn scramble(rows: usize, cols: usize, seed: u64) -> (Board, Scramble) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = Board::generate(rows, cols, &mut rng);
        let scramble = shuffle(&board, &mut rng);
        (board, scramble)
    }

    #[test]
    fn answer_key_points_at_the_original_pieces() {
        let (board, scramble) = scramble(4, 5, 42);
        for (idx, placement) in scramble.answer_key.indexed_iter() {
            let original = board.at(placement.row, placement.col).unwrap();
            let shuffled = scramble.board.pieces()[idx];
            assert_eq!(shuffled.rotated(placement.rotation), *original);
        }
    }

    #[test]
    fn empty_board_shuffles_to_empty_board() {
        let (_, scramble) = scramble(0, 3, 1);
        assert!(scramble.board.is_empty());
        assert!(scramble.answer_key.is_empty());
    }

    #[test]
    fn single_piece_only_rotates() {
        let (board, scramble) = scramble(1, 1, 5);
        assert_eq!(scramble.board, board); // A flat piece looks the same in every rotation
        assert_eq!(scramble.answer_key.len(), 1);
        let placement = scramble.answer_key[CellIdx::from_idx(0)];
        assert_eq!((placement.row, placement.col), (0, 0));
    }

    proptest! {
        #[test]
        fn shuffle_preserves_pieces_up_to_rotation(rows in 1usize..7, cols in 1usize..7, seed: u64) {
            let (board, scramble) = scramble(rows, cols, seed);
            prop_assert_eq!(scramble.board.rows(), rows);
            prop_assert_eq!(scramble.board.cols(), cols);
            let canonical =
                |b: &Board| b.pieces().iter().map(|p| p.canonical()).sorted().collect_vec();
            prop_assert_eq!(canonical(&board), canonical(&scramble.board));
        }

        #[test]
        fn answer_key_reconstructs_the_original(rows in 1usize..7, cols in 1usize..7, seed: u64) {
            let (board, scramble) = scramble(rows, cols, seed);
            let solved = reconstruct(&scramble.board, scramble.answer_key.as_slice()).unwrap();
            prop_assert_eq!(solved, board);
        }
    }
}
