//! The facelet cube model: colors, faces, raw facelet grids and the [`Cube`]
//! handle that keeps its grid solvable and broadcasts every applied turn to
//! registered listeners.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use rand::Rng;

use crate::error::{CubeError, ParseError, StateError};
use crate::moves::MoveSequence;

pub mod pieces;
pub mod turns;
mod validate;

use turns::Turn;

/// The six sticker colors. On a solved cube each face shows the color with the
/// same discriminant as the face itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// The front color of a solved cube.
    Green,
    /// The right color of a solved cube.
    Red,
    /// The back color of a solved cube.
    Blue,
    /// The left color of a solved cube.
    Orange,
    /// The top color of a solved cube.
    White,
    /// The bottom color of a solved cube.
    Yellow,
}

impl Color {
    /// All colors, in discriminant order.
    pub const ALL: [Color; 6] = [
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::Orange,
        Color::White,
        Color::Yellow,
    ];

    /// The symbol this color takes in the default textual scheme.
    pub fn symbol(self) -> char {
        match self {
            Color::Green => 'G',
            Color::Red => 'R',
            Color::Blue => 'B',
            Color::Orange => 'O',
            Color::White => 'W',
            Color::Yellow => 'Y',
        }
    }
}

/// The six faces of the cube. The four side faces come first so that walking
/// the discriminants `Front..=Left` circles the equator clockwise when viewed
/// from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Face {
    /// The face toward the viewer.
    Front,
    /// The face to the viewer's right.
    Right,
    /// The face away from the viewer.
    Back,
    /// The face to the viewer's left.
    Left,
    /// The top face.
    Up,
    /// The bottom face.
    Down,
}

impl Face {
    /// All faces, in discriminant order.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Right,
        Face::Back,
        Face::Left,
        Face::Up,
        Face::Down,
    ];

    /// The face on the opposite side of the cube.
    pub fn opposite(self) -> Face {
        match self {
            Face::Front => Face::Back,
            Face::Right => Face::Left,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Up => Face::Down,
            Face::Down => Face::Up,
        }
    }

    /// The single-letter name used in turn notation.
    pub fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Right => 'R',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Up => 'U',
            Face::Down => 'D',
        }
    }

    pub(crate) fn is_up_down(self) -> bool {
        matches!(self, Face::Up | Face::Down)
    }
}

/// A bare 6×9 grid of facelet colors.
///
/// Each face is stored row-major as seen looking straight at that face, with
/// the up face read looking down at it from behind the cube and the down face
/// read looking up at it from in front:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
///
/// A `FaceletState` is just data and carries no solvability guarantee; see
/// [`FaceletState::validate`] and [`Cube`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceletState([[Color; 9]; 6]);

impl FaceletState {
    /// The solved grid: face `i` uniformly shows color `i`.
    pub fn solved() -> Self {
        FaceletState(Color::ALL.map(|c| [c; 9]))
    }

    /// Borrow the raw grid, indexed by face discriminant.
    pub fn facelets(&self) -> &[[Color; 9]; 6] {
        &self.0
    }

    /// Borrow one face's nine stickers, row-major.
    pub fn face(&self, face: Face) -> &[Color; 9] {
        &self.0[face as usize]
    }

    /// The center color of a face. Centers are only moved by whole-cube
    /// rotations.
    pub fn center(&self, face: Face) -> Color {
        self.0[face as usize][4]
    }

    /// Whether every face shows nine copies of its own center color.
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|face| face.iter().all(|c| *c == face[4]))
    }

    /// Render the grid as 54 symbols, nine per line, using the given
    /// color-indexed symbol table.
    pub fn export(&self, symbols: &[char; 6]) -> String {
        let mut out = String::with_capacity(60);
        for face in &self.0 {
            for c in face {
                out.push(symbols[*c as usize]);
            }
            out.push('\n');
        }
        out
    }
}

impl From<[[Color; 9]; 6]> for FaceletState {
    fn from(grid: [[Color; 9]; 6]) -> Self {
        FaceletState(grid)
    }
}

impl Index<Face> for FaceletState {
    type Output = [Color; 9];

    fn index(&self, face: Face) -> &[Color; 9] {
        &self.0[face as usize]
    }
}

impl IndexMut<Face> for FaceletState {
    fn index_mut(&mut self, face: Face) -> &mut [Color; 9] {
        &mut self.0[face as usize]
    }
}

impl fmt::Display for FaceletState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.export(&Color::ALL.map(Color::symbol)))
    }
}

/// A snapshot of which face currently holds which center color. All piece
/// bookkeeping is done relative to centers so that whole-cube rotations do
/// not disturb it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Centers {
    face_by_color: [Face; 6],
    color_by_face: [Color; 6],
}

impl Centers {
    /// Read the center stickers of a grid. Callers must have established that
    /// each color occurs on exactly one center.
    pub(crate) fn of(state: &FaceletState) -> Self {
        let color_by_face = Face::ALL.map(|f| state.center(f));
        let mut face_by_color = [Face::Front; 6];
        for f in Face::ALL {
            face_by_color[state.center(f) as usize] = f;
        }
        Centers {
            face_by_color,
            color_by_face,
        }
    }

    /// The face whose center currently shows `color`, i.e. the home face of
    /// every piece carrying that color.
    pub fn face_of(&self, color: Color) -> Face {
        self.face_by_color[color as usize]
    }

    /// The center color currently on `face`.
    pub fn color_of(&self, face: Face) -> Color {
        self.color_by_face[face as usize]
    }
}

/// An opaque ticket identifying one registered turn listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

type Listener = Box<dyn FnMut(Turn)>;

/// A cube that is solvable by construction.
///
/// Every constructor either starts from the solved state or validates its
/// input, and the only mutation path is [`Cube::apply`], so the held grid is
/// always a reachable state. Applied turns are reported to every listener
/// registered with [`Cube::subscribe`], which is how the blind solver records
/// its own solution.
pub struct Cube {
    state: FaceletState,
    listeners: Vec<(ListenerHandle, Listener)>,
    next_handle: u64,
}

impl Cube {
    /// A solved cube.
    pub fn solved() -> Self {
        Cube {
            state: FaceletState::solved(),
            listeners: Vec::new(),
            next_handle: 0,
        }
    }

    /// A cube scrambled by `turns` random quarter turns from a thread-local
    /// generator.
    pub fn scrambled(turns: usize) -> Self {
        Self::scrambled_with(&mut rand::thread_rng(), turns)
    }

    /// A cube scrambled by `turns` random quarter turns drawn from `rng`.
    pub fn scrambled_with<R: Rng + ?Sized>(rng: &mut R, turns: usize) -> Self {
        let mut cube = Cube::solved();
        for _ in 0..turns {
            let face = Face::ALL[rng.gen_range(0..6)];
            let count = if rng.gen::<bool>() { 1 } else { 3 };
            cube.apply(Turn::face(face, count));
        }
        cube
    }

    /// Read a cube from its textual form using a caller-supplied symbol
    /// table. ASCII whitespace between symbols is ignored; the remaining
    /// symbols fill the faces in discriminant order, row-major. The decoded
    /// grid must pass solvability validation.
    pub fn parse(input: &str, table: &HashMap<char, Color>) -> Result<Self, CubeError> {
        let mut colors = Vec::with_capacity(54);
        for sym in input.chars().filter(|c| !c.is_ascii_whitespace()) {
            let color = table
                .get(&sym)
                .copied()
                .ok_or(ParseError::UnknownSymbol(sym))?;
            colors.push(color);
        }
        if colors.len() != 54 {
            return Err(ParseError::WrongLength {
                found: colors.len(),
            }
            .into());
        }

        let mut grid = [[Color::Green; 9]; 6];
        for (i, color) in colors.into_iter().enumerate() {
            grid[i / 9][i % 9] = color;
        }
        Ok(Self::from_facelets(grid.into())?)
    }

    /// Adopt an explicit facelet grid after validating it.
    pub fn from_facelets(state: FaceletState) -> Result<Self, StateError> {
        state.validate()?;
        Ok(Cube {
            state,
            listeners: Vec::new(),
            next_handle: 0,
        })
    }

    /// Borrow the current facelet grid.
    pub fn state(&self) -> &FaceletState {
        &self.state
    }

    /// The current center arrangement.
    pub fn centers(&self) -> Centers {
        Centers::of(&self.state)
    }

    /// Whether the cube is solved.
    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }

    /// Register a listener to be called with every turn applied from now on,
    /// in registration order.
    pub fn subscribe(&mut self, listener: impl FnMut(Turn) + 'static) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle);
        self.next_handle += 1;
        self.listeners.push((handle, Box::new(listener)));
        handle
    }

    /// Remove a previously registered listener. Returns whether the handle
    /// was still registered.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    /// Apply one turn, then report it to every listener. Returns `self` so
    /// applications chain.
    pub fn apply(&mut self, turn: Turn) -> &mut Self {
        self.state.apply(turn);
        for (_, listener) in &mut self.listeners {
            listener(turn);
        }
        self
    }

    /// Apply a whole sequence in order.
    pub fn apply_all<'a>(&mut self, turns: impl IntoIterator<Item = &'a Turn>) -> &mut Self {
        for turn in turns {
            self.apply(*turn);
        }
        self
    }

    /// Apply a parsed algorithm.
    pub fn apply_sequence(&mut self, alg: &MoveSequence<Turn>) -> &mut Self {
        self.apply_all(alg.iter())
    }
}

impl Default for Cube {
    fn default() -> Self {
        Cube::solved()
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cube")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.state, f)
    }
}

impl TryFrom<[[Color; 9]; 6]> for Cube {
    type Error = StateError;

    fn try_from(grid: [[Color; 9]; 6]) -> Result<Self, StateError> {
        Self::from_facelets(grid.into())
    }
}

/// The default symbol table, matching [`Color::symbol`].
pub fn default_symbols() -> HashMap<char, Color> {
    Color::ALL.iter().map(|c| (c.symbol(), *c)).collect()
}

impl FromStr for Cube {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, CubeError> {
        Cube::parse(s, &default_symbols())
    }
}
