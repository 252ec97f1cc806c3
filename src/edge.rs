//! The vocabulary of edge profiles which can appear on the side of a jigsaw piece.

use std::fmt::{Display, Formatter};

use rand::Rng;

/// The profile of one side of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edge {
    /// A straight side, only found on the outer border of the puzzle
    Flat,
    /// A knob which protrudes out of the piece
    Tab,
    /// A socket which is cut into the piece, and accepts a [`Tab`](Edge::Tab)
    Blank,
}

impl Edge {
    /// All the possible `Edge`s, in the order used to compute [`Piece::class_id`]
    ///
    /// [`Piece::class_id`]: crate::Piece::class_id
    pub const ALL: [Edge; 3] = [Edge::Flat, Edge::Tab, Edge::Blank];

    /// Returns the `Edge` that the neighbouring piece must have on the other side of a seam.
    /// `Tab`s and `Blank`s swap, whereas `Flat` is left unchanged.
    pub fn flip(self) -> Edge {
        match self {
            Edge::Flat => Edge::Flat,
            Edge::Tab => Edge::Blank,
            Edge::Blank => Edge::Tab,
        }
    }

    pub fn is_flat(self) -> bool {
        self == Edge::Flat
    }

    /// Returns `true` if two `Edge`s can sit on either side of the same internal seam
    pub fn fits(self, other: Edge) -> bool {
        !self.is_flat() && self.flip() == other
    }

    /// The signed contribution of this `Edge` to a board's tab/blank balance: `+1` for a
    /// `Blank` and `-1` for a `Tab`, as counted by the solving service.  Every internal seam has
    /// one of each, so the balance of a consistent board is always 0.
    pub fn poke_value(self) -> isize {
        match self {
            Edge::Flat => 0,
            Edge::Tab => -1,
            Edge::Blank => 1,
        }
    }

    /// Draw a random non-flat `Edge` for an internal seam, with `Tab` and `Blank` equally likely
    pub fn random_seam(rng: &mut impl Rng) -> Edge {
        if rng.gen_bool(0.5) {
            Edge::Tab
        } else {
            Edge::Blank
        }
    }

    /// The character used for this `Edge` when talking to the solving service.  The service
    /// calls a blank `<` (a poke *in*) and a tab `>` (a poke *out*).
    pub fn to_char(self) -> char {
        match self {
            Edge::Flat => '-',
            Edge::Tab => '>',
            Edge::Blank => '<',
        }
    }

    pub fn from_char(c: char) -> Option<Edge> {
        match c {
            '-' => Some(Edge::Flat),
            '<' => Some(Edge::Blank),
            '>' => Some(Edge::Tab),
            _ => None,
        }
    }

    /// Index of this `Edge` within [`Edge::ALL`]
    pub(crate) fn ordinal(self) -> usize {
        match self {
            Edge::Flat => 0,
            Edge::Tab => 1,
            Edge::Blank => 2,
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn flip_is_an_involution() {
        for &e in &Edge::ALL {
            assert_eq!(e.flip().flip(), e);
        }
        assert_eq!(Edge::Flat.flip(), Edge::Flat);
        assert_eq!(Edge::Tab.flip(), Edge::Blank);
    }

    #[test]
    fn only_tabs_and_blanks_fit() {
        assert!(Edge::Tab.fits(Edge::Blank));
        assert!(Edge::Blank.fits(Edge::Tab));
        assert!(!Edge::Tab.fits(Edge::Tab));
        assert!(!Edge::Flat.fits(Edge::Flat));
    }

    #[test]
    fn wire_chars() {
        for &e in &Edge::ALL {
            assert_eq!(Edge::from_char(e.to_char()), Some(e));
        }
        assert_eq!(Edge::from_char('<'), Some(Edge::Blank));
        assert_eq!(Edge::from_char('>'), Some(Edge::Tab));
        assert_eq!(Edge::from_char('|'), None);
        assert_eq!(Edge::ALL.iter().map(|e| e.ordinal()).collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn blanks_poke_in_and_tabs_poke_out() {
        assert_eq!(Edge::Blank.poke_value(), 1);
        assert_eq!(Edge::Tab.poke_value(), -1);
        assert_eq!(Edge::Flat.poke_value(), 0);
    }

    #[test]
    fn random_seams_are_never_flat_and_hit_both_profiles() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let seams = (0..200).map(|_| Edge::random_seam(&mut rng)).collect::<Vec<_>>();
        assert!(seams.iter().all(|e| !e.is_flat()));
        assert!(seams.contains(&Edge::Tab));
        assert!(seams.contains(&Edge::Blank));
    }
}
