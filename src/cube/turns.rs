//! Turn notation and the facelet move engine.
//!
//! A [`Turn`] names a layer or rotation target and a clockwise quarter-turn
//! count. Face turns are executed directly against the sticker grid; slice
//! turns are compositions of face turns and whole-cube rotations, so every
//! reachable state is reachable through face turns and rotations alone.

use std::fmt;
use std::str::FromStr;

#[cfg(test)]
use proptest_derive::Arbitrary;

use crate::cube::{Color, Cube, Face, FaceletState};
use crate::error::ParseTurnError;
use crate::moves::{Cancellation, Move};

/// The three whole-cube rotation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Axis {
    /// The R-L axis; `X` follows an R turn.
    X,
    /// The U-D axis; `Y` follows a U turn.
    Y,
    /// The F-B axis; `Z` follows an F turn.
    Z,
}

/// The three middle layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum Slice {
    /// The layer between L and R; follows an L turn.
    M,
    /// The layer between U and D; follows a D turn.
    E,
    /// The layer between F and B; follows an F turn.
    S,
}

/// What a turn acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub enum TurnTarget {
    /// One outer face layer.
    Face(Face),
    /// The whole cube about an axis.
    Rotation(Axis),
    /// One middle layer.
    Slice(Slice),
}

impl TurnTarget {
    /// The notation letter of this target.
    pub fn letter(self) -> char {
        match self {
            TurnTarget::Face(face) => face.letter(),
            TurnTarget::Rotation(Axis::X) => 'X',
            TurnTarget::Rotation(Axis::Y) => 'Y',
            TurnTarget::Rotation(Axis::Z) => 'Z',
            TurnTarget::Slice(Slice::M) => 'M',
            TurnTarget::Slice(Slice::E) => 'E',
            TurnTarget::Slice(Slice::S) => 'S',
        }
    }

    // Targets on the same geometric axis commute; nothing else does.
    fn axis(self) -> Axis {
        match self {
            TurnTarget::Face(Face::Right | Face::Left) => Axis::X,
            TurnTarget::Face(Face::Up | Face::Down) => Axis::Y,
            TurnTarget::Face(Face::Front | Face::Back) => Axis::Z,
            TurnTarget::Rotation(axis) => axis,
            TurnTarget::Slice(Slice::M) => Axis::X,
            TurnTarget::Slice(Slice::E) => Axis::Y,
            TurnTarget::Slice(Slice::S) => Axis::Z,
        }
    }
}

/// A single turn in standard notation: a target and a clockwise quarter-turn
/// count in `1..=3`, where 3 reads as the counterclockwise prime.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct Turn {
    /// The layer or rotation this turn acts on.
    pub target: TurnTarget,
    /// Clockwise quarter turns, `1..=3`.
    #[cfg_attr(test, proptest(strategy = "1..=3u8"))]
    pub count: u8,
}

impl Turn {
    /// A face turn.
    pub const fn face(face: Face, count: u8) -> Self {
        Turn {
            target: TurnTarget::Face(face),
            count,
        }
    }

    /// A whole-cube rotation.
    pub const fn rotation(axis: Axis, count: u8) -> Self {
        Turn {
            target: TurnTarget::Rotation(axis),
            count,
        }
    }

    /// A slice turn.
    pub const fn slice(slice: Slice, count: u8) -> Self {
        Turn {
            target: TurnTarget::Slice(slice),
            count,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.target.letter();
        match self.count {
            1 => write!(f, "{letter}"),
            2 => write!(f, "{letter}2"),
            _ => write!(f, "{letter}'"),
        }
    }
}

impl fmt::Debug for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Turn {
    type Err = ParseTurnError;

    fn from_str(s: &str) -> Result<Self, ParseTurnError> {
        let mut chars = s.chars();
        let head = chars.next().ok_or_else(|| ParseTurnError(s.to_string()))?;
        let target = match head {
            'F' => TurnTarget::Face(Face::Front),
            'R' => TurnTarget::Face(Face::Right),
            'B' => TurnTarget::Face(Face::Back),
            'L' => TurnTarget::Face(Face::Left),
            'U' => TurnTarget::Face(Face::Up),
            'D' => TurnTarget::Face(Face::Down),
            'X' | 'x' => TurnTarget::Rotation(Axis::X),
            'Y' | 'y' => TurnTarget::Rotation(Axis::Y),
            'Z' | 'z' => TurnTarget::Rotation(Axis::Z),
            'M' => TurnTarget::Slice(Slice::M),
            'E' => TurnTarget::Slice(Slice::E),
            'S' => TurnTarget::Slice(Slice::S),
            _ => return Err(ParseTurnError(s.to_string())),
        };
        let count = match chars.as_str() {
            "" => 1,
            "2" => 2,
            "'" | "i" => 3,
            _ => return Err(ParseTurnError(s.to_string())),
        };
        Ok(Turn { target, count })
    }
}

impl Move for Turn {
    fn inverse(self) -> Self {
        Turn {
            target: self.target,
            count: 4 - self.count.rem_euclid(4),
        }
    }

    fn commutes_with(&self, b: &Self) -> bool {
        self.target.axis() == b.target.axis()
    }

    fn cancel(self, b: Self) -> Cancellation<Self> {
        if self.target != b.target {
            return Cancellation::TwoMove(self, b);
        }
        match (self.count + b.count).rem_euclid(4) {
            0 => Cancellation::NoMove,
            count => Cancellation::OneMove(Turn {
                target: self.target,
                count,
            }),
        }
    }
}

/// In-place sticker permutation turning a face a quarter clockwise:
/// `new[i] = old[MAP[i]]`.
///
/// ```text
/// 0 1 2    6 3 0
/// 3 4 5 -> 7 4 1
/// 6 7 8    8 5 2
/// ```
const CLOCKWISE: [usize; 9] = [6, 3, 0, 7, 4, 1, 8, 5, 2];
const COUNTERCLOCKWISE: [usize; 9] = [2, 5, 8, 1, 4, 7, 0, 3, 6];
const HALF_TURN: [usize; 9] = [8, 7, 6, 5, 4, 3, 2, 1, 0];
const IDENTITY: [usize; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];

/// The side faces in equator order, and the index rows along which each of
/// them touches the up and down faces.
const SIDES: [Face; 4] = [Face::Front, Face::Right, Face::Back, Face::Left];
const BORDER: [[usize; 3]; 4] = [[0, 1, 2], [2, 5, 8], [8, 7, 6], [6, 3, 0]];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Spin {
    Clockwise,
    Half,
    Counterclockwise,
}

impl Spin {
    fn of(count: u8) -> Option<Spin> {
        match count.rem_euclid(4) {
            1 => Some(Spin::Clockwise),
            2 => Some(Spin::Half),
            3 => Some(Spin::Counterclockwise),
            _ => None,
        }
    }

    fn map(self) -> &'static [usize; 9] {
        match self {
            Spin::Clockwise => &CLOCKWISE,
            Spin::Half => &HALF_TURN,
            Spin::Counterclockwise => &COUNTERCLOCKWISE,
        }
    }
}

impl FaceletState {
    /// Apply one turn to the grid.
    pub fn apply(&mut self, turn: Turn) {
        match turn.target {
            TurnTarget::Face(face) => {
                if let Some(spin) = Spin::of(turn.count) {
                    self.turn_face(face, spin);
                }
            }
            TurnTarget::Rotation(axis) => {
                for _ in 0..turn.count.rem_euclid(4) {
                    self.rotate(axis);
                }
            }
            TurnTarget::Slice(slice) => {
                for _ in 0..turn.count.rem_euclid(4) {
                    self.turn_slice(slice);
                }
            }
        }
    }

    fn permute(&mut self, face: Face, map: &[usize; 9]) {
        let copy = self[face];
        for i in 0..9 {
            self[face][i] = copy[map[i]];
        }
    }

    fn turn_face(&mut self, face: Face, spin: Spin) {
        self.permute(face, spin.map());
        if face.is_up_down() {
            self.spin_cap(face, spin);
        } else {
            self.spin_band(face, spin);
        }
    }

    /// Cycle the four three-sticker strips bordering a side face.
    fn spin_band(&mut self, face: Face, spin: Spin) {
        let s = face as usize;
        let left = SIDES[(s + 3) % 4];
        let right = SIDES[(s + 1) % 4];

        let left_slots: [usize; 3] = [2, 5, 8];
        let right_slots: [usize; 3] = [0, 3, 6];
        // The up-face border rows run the other way around for R and L.
        let up_row = if matches!(face, Face::Right | Face::Left) {
            BORDER[s]
        } else {
            BORDER[(s + 2) % 4]
        };
        let up_slots = [up_row[2], up_row[1], up_row[0]];
        let down_slots = BORDER[s];

        let from_left = left_slots.map(|i| self[left][i]);
        let from_right = right_slots.map(|i| self[right][i]);
        let from_up = up_slots.map(|i| self[Face::Up][i]);
        let from_down = down_slots.map(|i| self[Face::Down][i]);

        for i in 0..3 {
            match spin {
                Spin::Clockwise => {
                    self[right][right_slots[i]] = from_up[i];
                    self[Face::Down][down_slots[i]] = from_right[2 - i];
                    self[left][left_slots[i]] = from_down[i];
                    self[Face::Up][up_slots[i]] = from_left[2 - i];
                }
                Spin::Counterclockwise => {
                    self[left][left_slots[i]] = from_up[2 - i];
                    self[Face::Down][down_slots[i]] = from_left[i];
                    self[right][right_slots[i]] = from_down[2 - i];
                    self[Face::Up][up_slots[i]] = from_right[i];
                }
                Spin::Half => {
                    self[left][left_slots[i]] = from_right[2 - i];
                    self[Face::Down][down_slots[i]] = from_up[2 - i];
                    self[right][right_slots[i]] = from_left[2 - i];
                    self[Face::Up][up_slots[i]] = from_down[2 - i];
                }
            }
        }
    }

    /// Cycle the top or bottom rows of the four side faces.
    fn spin_cap(&mut self, face: Face, spin: Spin) {
        let rows: [usize; 3] = if face == Face::Up { [0, 1, 2] } else { [6, 7, 8] };
        let direction: i32 = if face == Face::Down { 1 } else { -1 };

        let copy: [[Color; 3]; 4] =
            [0usize, 1, 2, 3].map(|s| rows.map(|i| self[SIDES[s]][i]));

        for outer in 0..4i32 {
            let dest = match spin {
                Spin::Clockwise => (outer + direction).rem_euclid(4),
                Spin::Counterclockwise => (outer - direction).rem_euclid(4),
                Spin::Half => (outer + 2).rem_euclid(4),
            };
            for i in 0..3 {
                self[SIDES[dest as usize]][rows[i]] = copy[outer as usize][i];
            }
        }
    }

    /// One clockwise whole-cube rotation. Each destination face takes a
    /// source face's stickers through a fixed in-face permutation.
    fn rotate(&mut self, axis: Axis) {
        let plan: [(Face, Face, &[usize; 9]); 6] = match axis {
            Axis::X => [
                (Face::Up, Face::Front, &IDENTITY),
                (Face::Back, Face::Up, &HALF_TURN),
                (Face::Down, Face::Back, &HALF_TURN),
                (Face::Front, Face::Down, &IDENTITY),
                (Face::Right, Face::Right, &CLOCKWISE),
                (Face::Left, Face::Left, &COUNTERCLOCKWISE),
            ],
            Axis::Y => [
                (Face::Left, Face::Front, &IDENTITY),
                (Face::Back, Face::Left, &IDENTITY),
                (Face::Right, Face::Back, &IDENTITY),
                (Face::Front, Face::Right, &IDENTITY),
                (Face::Up, Face::Up, &CLOCKWISE),
                (Face::Down, Face::Down, &COUNTERCLOCKWISE),
            ],
            Axis::Z => [
                (Face::Right, Face::Up, &CLOCKWISE),
                (Face::Down, Face::Right, &CLOCKWISE),
                (Face::Left, Face::Down, &CLOCKWISE),
                (Face::Up, Face::Left, &CLOCKWISE),
                (Face::Front, Face::Front, &CLOCKWISE),
                (Face::Back, Face::Back, &COUNTERCLOCKWISE),
            ],
        };

        let copy = *self;
        for (dest, src, map) in plan {
            for i in 0..9 {
                self[dest][i] = copy[src][map[i]];
            }
        }
    }

    /// One clockwise slice turn, as its defining composition of face turns
    /// and a rotation.
    fn turn_slice(&mut self, slice: Slice) {
        let composition = match slice {
            Slice::M => [
                Turn::face(Face::Left, 3),
                Turn::face(Face::Right, 1),
                Turn::rotation(Axis::X, 3),
            ],
            Slice::E => [
                Turn::face(Face::Down, 3),
                Turn::face(Face::Up, 1),
                Turn::rotation(Axis::Y, 3),
            ],
            Slice::S => [
                Turn::face(Face::Front, 3),
                Turn::face(Face::Back, 1),
                Turn::rotation(Axis::Z, 1),
            ],
        };
        for turn in composition {
            self.apply(turn);
        }
    }
}

macro_rules! turn_methods {
    ($($name:ident, $notation:literal, $target:expr, $count:literal;)*) => {
        /// Named turn methods, one per notation token. Each applies its turn
        /// through [`Cube::apply`] and returns `self` so calls chain.
        impl Cube {
            $(
                #[doc = concat!("Apply `", $notation, "`.")]
                #[allow(non_snake_case)]
                pub fn $name(&mut self) -> &mut Self {
                    self.apply(Turn { target: $target, count: $count })
                }
            )*
        }
    };
}

turn_methods! {
    F, "F", TurnTarget::Face(Face::Front), 1;
    F2, "F2", TurnTarget::Face(Face::Front), 2;
    Fi, "F'", TurnTarget::Face(Face::Front), 3;
    R, "R", TurnTarget::Face(Face::Right), 1;
    R2, "R2", TurnTarget::Face(Face::Right), 2;
    Ri, "R'", TurnTarget::Face(Face::Right), 3;
    B, "B", TurnTarget::Face(Face::Back), 1;
    B2, "B2", TurnTarget::Face(Face::Back), 2;
    Bi, "B'", TurnTarget::Face(Face::Back), 3;
    L, "L", TurnTarget::Face(Face::Left), 1;
    L2, "L2", TurnTarget::Face(Face::Left), 2;
    Li, "L'", TurnTarget::Face(Face::Left), 3;
    U, "U", TurnTarget::Face(Face::Up), 1;
    U2, "U2", TurnTarget::Face(Face::Up), 2;
    Ui, "U'", TurnTarget::Face(Face::Up), 3;
    D, "D", TurnTarget::Face(Face::Down), 1;
    D2, "D2", TurnTarget::Face(Face::Down), 2;
    Di, "D'", TurnTarget::Face(Face::Down), 3;
    X, "X", TurnTarget::Rotation(Axis::X), 1;
    X2, "X2", TurnTarget::Rotation(Axis::X), 2;
    Xi, "X'", TurnTarget::Rotation(Axis::X), 3;
    Y, "Y", TurnTarget::Rotation(Axis::Y), 1;
    Y2, "Y2", TurnTarget::Rotation(Axis::Y), 2;
    Yi, "Y'", TurnTarget::Rotation(Axis::Y), 3;
    Z, "Z", TurnTarget::Rotation(Axis::Z), 1;
    Z2, "Z2", TurnTarget::Rotation(Axis::Z), 2;
    Zi, "Z'", TurnTarget::Rotation(Axis::Z), 3;
    M, "M", TurnTarget::Slice(Slice::M), 1;
    M2, "M2", TurnTarget::Slice(Slice::M), 2;
    Mi, "M'", TurnTarget::Slice(Slice::M), 3;
    E, "E", TurnTarget::Slice(Slice::E), 1;
    E2, "E2", TurnTarget::Slice(Slice::E), 2;
    Ei, "E'", TurnTarget::Slice(Slice::E), 3;
    S, "S", TurnTarget::Slice(Slice::S), 1;
    S2, "S2", TurnTarget::Slice(Slice::S), 2;
    Si, "S'", TurnTarget::Slice(Slice::S), 3;
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::moves::MoveSequence;

    fn run(state: &mut FaceletState, alg: &str) {
        let alg: MoveSequence<Turn> = alg.parse().unwrap();
        for turn in alg.iter() {
            state.apply(*turn);
        }
    }

    #[test]
    fn front_turn_moves_the_right_strips() {
        let mut state = FaceletState::solved();
        state.apply(Turn::face(Face::Front, 1));

        for i in [6, 7, 8] {
            assert_eq!(state[Face::Up][i], Color::Orange);
        }
        for i in [0, 3, 6] {
            assert_eq!(state[Face::Right][i], Color::White);
        }
        for i in [0, 1, 2] {
            assert_eq!(state[Face::Down][i], Color::Red);
        }
        for i in [2, 5, 8] {
            assert_eq!(state[Face::Left][i], Color::Yellow);
        }
        assert_eq!(state[Face::Front], [Color::Green; 9]);
        assert_eq!(state[Face::Back], [Color::Blue; 9]);
    }

    #[test]
    fn rotations_move_centers() {
        let mut state = FaceletState::solved();
        state.apply(Turn::rotation(Axis::Y, 1));
        assert_eq!(state.center(Face::Front), Color::Red);
        assert_eq!(state.center(Face::Left), Color::Green);
        assert_eq!(state.center(Face::Up), Color::White);

        let mut state = FaceletState::solved();
        state.apply(Turn::rotation(Axis::X, 1));
        assert_eq!(state.center(Face::Up), Color::Green);
        assert_eq!(state.center(Face::Back), Color::White);
        assert_eq!(state.center(Face::Right), Color::Red);
    }

    #[test]
    fn rotations_keep_faces_whole() {
        let mut state = FaceletState::solved();
        run(&mut state, "X Y Z X' Z2");
        for face in Face::ALL {
            assert_eq!(state[face], [state.center(face); 9]);
        }
    }

    #[test]
    fn slices_match_their_compositions() {
        for (slice, composition) in [("M", "L' R X'"), ("E", "D' U Y'"), ("S", "F' B Z")] {
            let mut a = FaceletState::solved();
            run(&mut a, "R U F");
            let mut b = a;

            run(&mut a, slice);
            run(&mut b, composition);
            assert_eq!(a, b, "{slice} differs from {composition}");
        }
    }

    #[test]
    fn flipped_edge_algorithm_has_order_two() {
        // The classic M-U flipper flips UF and UB in place.
        let mut state = FaceletState::solved();
        run(&mut state, "M' U M' U M' U2 M U M U M U2");
        assert!(!state.is_solved());
        assert_eq!(state.center(Face::Up), Color::White);
        run(&mut state, "M' U M' U M' U2 M U M U M U2");
        assert!(state.is_solved());
    }

    proptest! {
        #[test]
        fn four_quarter_turns_are_identity(turn: Turn) {
            let mut state = FaceletState::solved();
            for _ in 0..4 {
                state.apply(Turn { target: turn.target, count: 1 });
            }
            prop_assert!(state.is_solved());
        }

        #[test]
        fn count_is_repeated_quarter_turns(turn: Turn) {
            let mut by_count = FaceletState::solved();
            by_count.apply(turn);

            let mut by_repetition = FaceletState::solved();
            for _ in 0..turn.count {
                by_repetition.apply(Turn { target: turn.target, count: 1 });
            }
            prop_assert_eq!(by_count, by_repetition);
        }

        #[test]
        fn sequences_undo(seq in prop::collection::vec(any::<Turn>(), 0..20)) {
            let mut state = FaceletState::solved();
            for turn in &seq {
                state.apply(*turn);
            }
            for turn in seq.iter().rev() {
                state.apply(turn.inverse());
            }
            prop_assert!(state.is_solved());
        }

        #[test]
        fn notation_round_trips(turn: Turn) {
            prop_assert_eq!(turn.to_string().parse::<Turn>().unwrap(), turn);
        }

        #[test]
        fn commuting_turns_commute(a: Turn, b: Turn) {
            prop_assume!(a.commutes_with(&b));
            let mut ab = FaceletState::solved();
            ab.apply(a);
            ab.apply(b);
            let mut ba = FaceletState::solved();
            ba.apply(b);
            ba.apply(a);
            prop_assert_eq!(ab, ba);
        }
    }
}
