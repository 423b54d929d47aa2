//! This module defines the error types used throughout the crate.

use thiserror::Error;

use crate::cube::{Color, Face};

/// Error type for textual scramble import.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input did not contain exactly 54 facelet symbols.
    #[error("scramble has {found} facelets, expected 54")]
    WrongLength {
        /// How many non-whitespace symbols the input actually contained.
        found: usize,
    },
    /// A symbol had no entry in the supplied character table.
    #[error("unknown facelet symbol {0:?}")]
    UnknownSymbol(char),
}

/// Error type for parsing a single turn token such as `R2` or `U'`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized turn token {0:?}")]
pub struct ParseTurnError(pub String);

/// The position class a facelet occupies on its face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceletClass {
    /// The fixed middle facelet of a face.
    Center,
    /// One of the four corner facelets of a face.
    Corner,
    /// One of the four non-center border facelets of a face.
    Edge,
}

impl std::fmt::Display for FaceletClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FaceletClass::Center => "center",
            FaceletClass::Corner => "corner",
            FaceletClass::Edge => "edge",
        })
    }
}

/// Error type describing why a facelet assignment is not a reachable cube
/// state. Variants are reported in the order the validator walks the state:
/// facelet counts, then per-piece geometry, then the parity triad.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// A color appears the wrong number of times within one position class.
    #[error("color {color:?} appears {found} times among {class} facelets, expected {expected}")]
    ColorCount {
        /// The miscounted color.
        color: Color,
        /// The position class that was counted.
        class: FaceletClass,
        /// The observed number of occurrences.
        found: u8,
        /// The required number of occurrences.
        expected: u8,
    },
    /// An edge shows two equal colors or two colors whose home faces are
    /// opposite, which no physical edge piece can.
    #[error("edge at {0:?}/{1:?} shows colors that cannot share a piece")]
    ImpossibleEdge(Face, Face),
    /// Two edges show the same color pair.
    #[error("two edges show the color pair {0:?}/{1:?}")]
    DuplicateEdge(Color, Color),
    /// A corner's colors cannot occur together on one physical corner piece.
    #[error("corner at {0:?}/{1:?}/{2:?} shows colors that cannot share a piece")]
    ImpossibleCorner(Face, Face, Face),
    /// Two corners show the same color triple.
    #[error("two corners show the color triple {0:?}/{1:?}/{2:?}")]
    DuplicateCorner(Color, Color, Color),
    /// The piece permutation has an odd number of inversions.
    #[error("piece permutation has odd parity")]
    PermutationParity,
    /// The summed corner twists are not divisible by three.
    #[error("corner twist parity is not divisible by three")]
    TwistParity,
    /// An odd number of edges is flipped.
    #[error("edge flip parity is odd")]
    FlipParity,
}

/// Error type for addressed edge/corner lookup with faces that do not meet at
/// a piece.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("faces {0:?} and {1:?} do not meet at a piece")]
pub struct NotAdjacentError(pub Face, pub Face);

/// Top-level error for cube construction paths that can fail in more than one
/// way.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CubeError {
    /// The textual representation could not be read.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The facelet assignment is not a solvable cube state.
    #[error(transparent)]
    State(#[from] StateError),
}
