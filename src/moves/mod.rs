//! Generic move sequences and their simplification.

use std::fmt;
use std::str::FromStr;

/// What becomes of two moves written next to each other.
/// See [`cancel`](Move::cancel).
#[derive(Debug, Eq, PartialEq)]
pub enum Cancellation<M: Move> {
    /// The pair vanished, like `R R'`.
    NoMove,
    /// The pair merged into a single move, like `R R` into `R2`.
    OneMove(M),
    /// No simplification, like `R U`.
    TwoMove(M, M),
}

/// One symbol power in a group presentation: something an algorithm is a
/// sequence of.
///
/// Implementations supply the two kinds of relations the sequence optimizer
/// works with. Order relations (R4 is the identity on a cube) live in
/// `cancel`; commutativity relations (R and L act on disjoint stickers) live
/// in `commutes_with`. [`MoveSequence::cancel`] assumes nothing beyond these
/// two, so relations it is not told about are simply not used.
pub trait Move: Eq + Clone {
    /// The move undoing this one: `X X^{-1}` and `X^{-1} X` must both reduce
    /// to the empty sequence.
    fn inverse(self) -> Self
    where
        Self: Sized;

    /// Whether `self` and `b` can be swapped when adjacent, i.e.
    /// `A B = B A`. Implementations must keep this transitive: if A commutes
    /// with B and B with C, then A must commute with C.
    fn commutes_with(&self, b: &Self) -> bool;

    /// Combine two adjacent moves as far as the group relations allow.
    ///
    /// ```rust
    /// use rubik_blind::cube::turns::Turn;
    /// use rubik_blind::moves::{Cancellation, Move};
    ///
    /// let r: Turn = "R".parse().unwrap();
    /// let r2: Turn = "R2".parse().unwrap();
    /// let ri: Turn = "R'".parse().unwrap();
    /// let u: Turn = "U".parse().unwrap();
    ///
    /// assert!(r.cancel(u) == Cancellation::TwoMove(r, u));
    /// assert!(r.cancel(r) == Cancellation::OneMove(r2));
    /// assert!(r.cancel(ri) == Cancellation::NoMove);
    /// ```
    fn cancel(self, b: Self) -> Cancellation<Self>
    where
        Self: Sized;
}

/// An algorithm: an ordered sequence of moves of one type.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MoveSequence<M: Move>(pub Vec<M>);

impl<M: Move> MoveSequence<M> {
    /// The number of moves in the sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence contains no moves at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the moves of the sequence in order.
    pub fn iter(&self) -> std::slice::Iter<'_, M> {
        self.0.iter()
    }

    /// Concatenate two sequences.
    pub fn append(mut self, mut other: Self) -> Self {
        self.0.append(&mut other.0);
        self
    }

    /// The sequence undoing this one: the moves reversed and each inverted,
    /// so that either concatenation order cancels to nothing.
    pub fn inverse(self) -> Self {
        Self(self.0.into_iter().rev().map(|m| m.inverse()).collect())
    }

    /// Cancel an alg as far as the group relations of `M` allow, including
    /// rearrangement of commutative moves.
    pub fn cancel(mut self) -> Self {
        let mut reduced: Vec<M> = Vec::new();

        for next in self.0.drain(..) {
            // We work from the back of our fully reduced sub-expression,
            // scanning over moves the new one commutes with. A merged move is
            // pushed to the back; everything it skipped is in its commutation
            // class but on a different symbol, so no further cancellation can
            // appear.
            let mut merged = false;

            for i in (0..reduced.len()).rev() {
                match reduced[i].clone().cancel(next.clone()) {
                    Cancellation::NoMove => {
                        reduced.remove(i);
                        merged = true;
                        break;
                    }
                    Cancellation::OneMove(m) => {
                        reduced.remove(i);
                        reduced.push(m);
                        merged = true;
                        break;
                    }
                    Cancellation::TwoMove(_, _) => {
                        if !next.commutes_with(&reduced[i]) {
                            break;
                        }
                    }
                }
            }

            if !merged {
                reduced.push(next);
            }
        }

        Self(reduced)
    }
}

impl<M: Move> FromIterator<M> for MoveSequence<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<M: Move + fmt::Display> fmt::Display for MoveSequence<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

impl<M: Move + FromStr> FromStr for MoveSequence<M> {
    type Err = M::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(M::from_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::cube::turns::Turn;
    use crate::moves::MoveSequence;

    fn seq(s: &str) -> MoveSequence<Turn> {
        s.parse().unwrap()
    }

    #[test]
    fn quarter_turns_merge() {
        assert_eq!(seq("R R").cancel(), seq("R2"));
        assert_eq!(seq("R R2").cancel(), seq("R'"));
        assert_eq!(seq("F2 F2").cancel(), seq(""));
        assert_eq!(seq("U U'").cancel(), seq(""));
    }

    #[test]
    fn cancels_across_commuting_moves() {
        assert_eq!(seq("R L R'").cancel(), seq("L"));
        assert_eq!(seq("U D2 E U'").cancel(), seq("D2 E"));
        // F does not commute past U, so nothing collapses
        assert_eq!(seq("R U R'").cancel(), seq("R U R'"));
    }

    #[test]
    fn display_round_trip() {
        let alg = seq("R U2 M' X F' S2");
        assert_eq!(alg.to_string(), "R U2 M' X F' S2");
        assert_eq!(seq(&alg.to_string()), alg);
    }

    #[test]
    fn inverse_reverses_and_inverts() {
        assert_eq!(seq("R U F2").inverse(), seq("F2 U' R'"));
        assert_eq!(seq("R U F2").append(seq("F2 U' R'")).cancel(), seq(""));
    }
}
