//! A facelet-level model of the 3×3 Rubik's cube: a move engine covering face
//! turns, whole-cube rotations and slice turns, a solvability validator based
//! on the parity invariants of the cube group, and a blind solver implementing
//! the Old Pochmann method.

#![deny(missing_docs)]

pub mod cube;
pub mod error;
pub mod moves;
pub mod pochmann;
