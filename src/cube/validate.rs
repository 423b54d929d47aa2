//! Solvability validation for raw facelet grids.
//!
//! A grid is accepted when it is a state the move engine can actually reach:
//! every color appears the right number of times in its position class, every
//! piece is a real piece occurring exactly once, and the three parity
//! invariants of the cube group hold (even piece permutation, corner twists
//! summing to zero mod 3, an even number of flipped edges).

use crate::cube::pieces::{order_corner, order_edge, Miniside};
use crate::cube::{Centers, Color, Face, FaceletState};
use crate::error::{FaceletClass, StateError};

/// Slot numbers of the twenty pieces in a solved cube, chosen so that the
/// identity permutation spirals around the down layer, the equator and the
/// up layer:
///
/// ```text
/// down        equator     up
///  7  6  5    12  -  11   19 18 17
///  8  -  4     -      -   20  - 16
///  1  2  3     9  -  10   13 14 15
/// ```
fn edge_slot(faces: [Face; 2]) -> usize {
    match faces {
        [Face::Down, Face::Front] => 2,
        [Face::Down, Face::Right] => 4,
        [Face::Down, Face::Back] => 6,
        [Face::Down, Face::Left] => 8,
        [Face::Left, Face::Front] => 9,
        [Face::Front, Face::Right] => 10,
        [Face::Right, Face::Back] => 11,
        [Face::Back, Face::Left] => 12,
        [Face::Up, Face::Front] => 14,
        [Face::Up, Face::Right] => 16,
        [Face::Up, Face::Back] => 18,
        [Face::Up, Face::Left] => 20,
        _ => unreachable!("edge faces are canonically ordered"),
    }
}

fn corner_slot(faces: [Face; 3]) -> usize {
    match faces {
        [Face::Left, Face::Down, Face::Front] => 1,
        [Face::Front, Face::Down, Face::Right] => 3,
        [Face::Right, Face::Down, Face::Back] => 5,
        [Face::Back, Face::Down, Face::Left] => 7,
        [Face::Left, Face::Up, Face::Front] => 13,
        [Face::Front, Face::Up, Face::Right] => 15,
        [Face::Right, Face::Up, Face::Back] => 17,
        [Face::Back, Face::Up, Face::Left] => 19,
        _ => unreachable!("corner faces are canonically ordered"),
    }
}

impl FaceletState {
    fn check_count(
        &self,
        indexes: &[usize],
        expected: u8,
        class: FaceletClass,
    ) -> Result<(), StateError> {
        let mut counts = [0u8; 6];
        for face in Face::ALL {
            for &i in indexes {
                counts[self[face][i] as usize] += 1;
            }
        }
        for color in Color::ALL {
            let found = counts[color as usize];
            if found != expected {
                return Err(StateError::ColorCount {
                    color,
                    class,
                    found,
                    expected,
                });
            }
        }
        Ok(())
    }

    /// Check that this grid is a reachable cube state, reporting the first
    /// violated invariant.
    pub fn validate(&self) -> Result<(), StateError> {
        self.check_count(&[4], 1, FaceletClass::Center)?;
        self.check_count(&[0, 2, 6, 8], 4, FaceletClass::Corner)?;
        self.check_count(&[1, 3, 5, 7], 4, FaceletClass::Edge)?;

        // Safe after the center count: each color has exactly one center.
        let centers = Centers::of(self);
        let aligned = |m: Miniside| {
            let home = centers.face_of(m.color);
            home == m.face || home == m.face.opposite()
        };

        let mut permutation = [0usize; 20];
        let mut flips = 0i32;
        let mut edge_seen = [[false; 6]; 6];

        for [a, b] in self.edges() {
            let home_a = centers.face_of(a.color);
            let home_b = centers.face_of(b.color);
            if home_a == home_b.opposite() || a.color == b.color {
                return Err(StateError::ImpossibleEdge(a.face, b.face));
            }

            let (lo, hi) = if a.color <= b.color {
                (a.color, b.color)
            } else {
                (b.color, a.color)
            };
            let seen = &mut edge_seen[lo as usize][hi as usize];
            if *seen {
                return Err(StateError::DuplicateEdge(lo, hi));
            }
            *seen = true;

            // An edge is flipped when the sticker belonging on the up/down
            // axis lies on a side face's equator row, or, for pure equator
            // pieces, when the front/back sticker left its own axis.
            if home_a.is_up_down() || home_b.is_up_down() {
                let (x, other) = if home_a.is_up_down() { (a, b) } else { (b, a) };
                if (matches!(x.face, Face::Left | Face::Right) || other.face.is_up_down())
                    && !x.face.is_up_down()
                {
                    flips += 1;
                }
            } else {
                let z = if matches!(home_a, Face::Front | Face::Back) {
                    a
                } else {
                    b
                };
                if !(aligned(a) && aligned(b)) && !z.face.is_up_down() {
                    flips += 1;
                }
            }

            permutation[edge_slot(order_edge(a.face, b.face)) - 1] =
                edge_slot(order_edge(home_a, home_b));
        }

        let mut twists = 0i32;
        let mut corner_seen = [[[false; 6]; 6]; 6];

        for corner in self.corners() {
            let here = (corner[0].face, corner[1].face, corner[2].face);

            let Some(&x) = corner
                .iter()
                .find(|m| centers.face_of(m.color).is_up_down())
            else {
                return Err(StateError::ImpossibleCorner(here.0, here.1, here.2));
            };
            let sides: Vec<Miniside> = corner
                .iter()
                .copied()
                .filter(|m| !centers.face_of(m.color).is_up_down())
                .collect();
            let [other, another] = sides.as_slice() else {
                return Err(StateError::ImpossibleCorner(here.0, here.1, here.2));
            };
            let home_other = centers.face_of(other.color);
            let home_another = centers.face_of(another.color);
            if home_other.opposite() == home_another || other.color == another.color {
                return Err(StateError::ImpossibleCorner(here.0, here.1, here.2));
            }

            let (lo, hi) = if other.color <= another.color {
                (other.color, another.color)
            } else {
                (another.color, other.color)
            };
            let seen = &mut corner_seen[lo as usize][hi as usize][x.color as usize];
            if *seen {
                return Err(StateError::DuplicateCorner(lo, hi, x.color));
            }
            *seen = true;

            // Slot stickers are listed side, up/down, side; a corner is
            // twisted when its up/down color sits on a side sticker, and the
            // twist direction depends on which side sticker and which cap.
            if !x.face.is_up_down() {
                let on_up_slot = corner[1].face == Face::Up;
                let leads = corner[0].color == x.color;
                twists += if on_up_slot == leads { 1 } else { -1 };
            }

            permutation[corner_slot(order_corner(x.face, other.face, another.face)) - 1] =
                corner_slot(order_corner(
                    centers.face_of(x.color),
                    home_other,
                    home_another,
                ));
        }

        let mut inversions = 0usize;
        for i in 0..permutation.len() {
            for j in i + 1..permutation.len() {
                if permutation[i] > permutation[j] {
                    inversions += 1;
                }
            }
        }

        if inversions % 2 != 0 {
            return Err(StateError::PermutationParity);
        }
        if twists.rem_euclid(3) != 0 {
            return Err(StateError::TwistParity);
        }
        if flips % 2 != 0 {
            return Err(StateError::FlipParity);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::cube::turns::Turn;
    use crate::cube::{Color, Face, FaceletState};
    use crate::error::{FaceletClass, StateError};
    use crate::moves::MoveSequence;

    fn scrambled(alg: &str) -> FaceletState {
        let alg: MoveSequence<Turn> = alg.parse().unwrap();
        let mut state = FaceletState::solved();
        for turn in alg.iter() {
            state.apply(*turn);
        }
        state
    }

    fn swap(state: &mut FaceletState, a: (Face, usize), b: (Face, usize)) {
        let x = state[a.0][a.1];
        let y = state[b.0][b.1];
        state[a.0][a.1] = y;
        state[b.0][b.1] = x;
    }

    #[test]
    fn reachable_states_are_accepted() {
        assert_eq!(FaceletState::solved().validate(), Ok(()));
        assert_eq!(scrambled("R").validate(), Ok(()));
        assert_eq!(
            scrambled("R U R' U' L R' F R F' L'").validate(),
            Ok(())
        );
    }

    #[test]
    fn miscounted_colors_are_rejected() {
        let mut state = FaceletState::solved();
        state[Face::Up][1] = Color::Green;
        assert_eq!(
            state.validate(),
            Err(StateError::ColorCount {
                color: Color::Green,
                class: FaceletClass::Edge,
                found: 5,
                expected: 4,
            })
        );
    }

    #[test]
    fn impossible_edges_are_rejected() {
        // Trading the front stickers of UF and DF pairs white with yellow.
        let mut state = FaceletState::solved();
        swap(&mut state, (Face::Front, 1), (Face::Down, 1));
        assert_eq!(
            state.validate(),
            Err(StateError::ImpossibleEdge(Face::Up, Face::Front))
        );
    }

    #[test]
    fn repeated_edges_are_rejected() {
        // UB becomes a second white/green edge.
        let mut state = FaceletState::solved();
        swap(&mut state, (Face::Back, 1), (Face::Front, 3));
        assert_eq!(
            state.validate(),
            Err(StateError::DuplicateEdge(Color::Green, Color::White))
        );
    }

    #[test]
    fn impossible_corners_are_rejected() {
        // URF gains a green/blue side pair.
        let mut state = FaceletState::solved();
        swap(&mut state, (Face::Right, 0), (Face::Back, 0));
        assert_eq!(
            state.validate(),
            Err(StateError::ImpossibleCorner(Face::Front, Face::Up, Face::Right))
        );
    }

    #[test]
    fn swapped_corner_pair_breaks_permutation_parity() {
        let mut state = FaceletState::solved();
        swap(&mut state, (Face::Up, 6), (Face::Up, 8));
        swap(&mut state, (Face::Left, 2), (Face::Front, 2));
        swap(&mut state, (Face::Front, 0), (Face::Right, 0));
        assert_eq!(state.validate(), Err(StateError::PermutationParity));
    }

    #[test]
    fn twisted_corner_breaks_twist_parity() {
        let mut state = FaceletState::solved();
        let a = state[Face::Left][2];
        let b = state[Face::Up][6];
        let c = state[Face::Front][0];
        state[Face::Left][2] = b;
        state[Face::Up][6] = c;
        state[Face::Front][0] = a;
        assert_eq!(state.validate(), Err(StateError::TwistParity));
    }

    #[test]
    fn flipped_edge_breaks_flip_parity() {
        let mut state = FaceletState::solved();
        swap(&mut state, (Face::Up, 7), (Face::Front, 1));
        assert_eq!(state.validate(), Err(StateError::FlipParity));
    }

    proptest! {
        #[test]
        fn every_turn_preserves_validity(
            seq in prop::collection::vec(any::<Turn>(), 0..25)
        ) {
            let mut state = FaceletState::solved();
            for turn in seq {
                state.apply(turn);
            }
            prop_assert_eq!(state.validate(), Ok(()));
        }
    }
}
