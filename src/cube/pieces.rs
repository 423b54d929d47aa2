//! Piece-level views over the facelet grid: edges and corners as tuples of
//! stickers, addressed by the faces they sit between.

use crate::cube::{Color, Face, FaceletState};
use crate::error::NotAdjacentError;

/// One sticker of a piece: the face it currently sits on and the color it
/// shows there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Miniside {
    /// The face the sticker sits on.
    pub face: Face,
    /// The color it shows.
    pub color: Color,
}

/// The two stickers of an edge piece.
pub type Edge = [Miniside; 2];

/// The three stickers of a corner piece.
pub type Corner = [Miniside; 3];

/// The twelve edge slots: the up layer, the equator and the down layer, each
/// circling Front → Right → Back → Left.
pub(crate) const EDGE_SLOTS: [[(Face, usize); 2]; 12] = [
    [(Face::Up, 7), (Face::Front, 1)],
    [(Face::Up, 5), (Face::Right, 1)],
    [(Face::Up, 1), (Face::Back, 1)],
    [(Face::Up, 3), (Face::Left, 1)],
    [(Face::Front, 5), (Face::Right, 3)],
    [(Face::Right, 5), (Face::Back, 3)],
    [(Face::Back, 5), (Face::Left, 3)],
    [(Face::Left, 5), (Face::Front, 3)],
    [(Face::Down, 1), (Face::Front, 7)],
    [(Face::Down, 5), (Face::Right, 7)],
    [(Face::Down, 7), (Face::Back, 7)],
    [(Face::Down, 3), (Face::Left, 7)],
];

/// The eight corner slots: the up layer then the down layer, each circling
/// Front → Right → Back → Left. The middle sticker of each slot is the one on
/// the up or down face.
pub(crate) const CORNER_SLOTS: [[(Face, usize); 3]; 8] = [
    [(Face::Left, 2), (Face::Up, 6), (Face::Front, 0)],
    [(Face::Front, 2), (Face::Up, 8), (Face::Right, 0)],
    [(Face::Right, 2), (Face::Up, 2), (Face::Back, 0)],
    [(Face::Back, 2), (Face::Up, 0), (Face::Left, 0)],
    [(Face::Left, 8), (Face::Down, 0), (Face::Front, 6)],
    [(Face::Front, 8), (Face::Down, 2), (Face::Right, 6)],
    [(Face::Right, 8), (Face::Down, 8), (Face::Back, 6)],
    [(Face::Back, 8), (Face::Down, 6), (Face::Left, 6)],
];

/// Canonical ordering of an edge's two faces: an up/down face first,
/// otherwise ascending discriminants, except that Left-Front stays in that
/// order to keep the equator cycle consistent.
pub(crate) fn order_edge(first: Face, second: Face) -> [Face; 2] {
    if first.is_up_down() {
        return [first, second];
    }
    if second.is_up_down() {
        return [second, first];
    }
    if (first == Face::Left && second == Face::Front)
        || (first == Face::Front && second == Face::Left)
    {
        return [Face::Left, Face::Front];
    }
    if (first as u8) < (second as u8) {
        [first, second]
    } else {
        [second, first]
    }
}

/// Canonical ordering of a corner's three faces: the up/down face in the
/// middle with the side faces edge-ordered around it. One face must be up or
/// down.
pub(crate) fn order_corner(first: Face, second: Face, third: Face) -> [Face; 3] {
    if first.is_up_down() {
        let rest = order_edge(second, third);
        return [rest[0], first, rest[1]];
    }
    if second.is_up_down() {
        let rest = order_edge(first, third);
        return [rest[0], second, rest[1]];
    }
    debug_assert!(third.is_up_down());
    let rest = order_edge(first, second);
    [rest[0], third, rest[1]]
}

impl FaceletState {
    fn read(&self, slot: (Face, usize)) -> Miniside {
        Miniside {
            face: slot.0,
            color: self[slot.0][slot.1],
        }
    }

    /// All twelve edges in slot order.
    pub fn edges(&self) -> [Edge; 12] {
        EDGE_SLOTS.map(|slot| slot.map(|s| self.read(s)))
    }

    /// All eight corners in slot order.
    pub fn corners(&self) -> [Corner; 8] {
        CORNER_SLOTS.map(|slot| slot.map(|s| self.read(s)))
    }

    /// The edge between two faces, stickers in slot order.
    pub fn edge(&self, a: Face, b: Face) -> Result<Edge, NotAdjacentError> {
        EDGE_SLOTS
            .iter()
            .find(|slot| {
                let faces = [slot[0].0, slot[1].0];
                faces.contains(&a) && faces.contains(&b)
            })
            .map(|slot| slot.map(|s| self.read(s)))
            .ok_or(NotAdjacentError(a, b))
    }

    /// The corner meeting three faces, stickers in slot order.
    pub fn corner(&self, a: Face, b: Face, c: Face) -> Result<Corner, NotAdjacentError> {
        let found = CORNER_SLOTS.iter().find(|slot| {
            let faces = [slot[0].0, slot[1].0, slot[2].0];
            faces.contains(&a) && faces.contains(&b) && faces.contains(&c)
        });
        match found {
            Some(slot) => Ok(slot.map(|s| self.read(s))),
            None => {
                // Name the first pair that cannot meet at a piece.
                let pair = if a == b || a == b.opposite() {
                    (a, b)
                } else if a == c || a == c.opposite() {
                    (a, c)
                } else {
                    (b, c)
                };
                Err(NotAdjacentError(pair.0, pair.1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::turns::Turn;

    #[test]
    fn solved_pieces_show_their_face_colors() {
        let state = FaceletState::solved();
        for edge in state.edges() {
            for side in edge {
                assert_eq!(side.color as usize, side.face as usize);
            }
        }
        for corner in state.corners() {
            for side in corner {
                assert_eq!(side.color as usize, side.face as usize);
            }
        }
    }

    #[test]
    fn addressed_lookup_is_order_insensitive() {
        let mut state = FaceletState::solved();
        state.apply(Turn::face(Face::Right, 1));

        let a = state.edge(Face::Up, Face::Right).unwrap();
        let b = state.edge(Face::Right, Face::Up).unwrap();
        assert_eq!(a, b);
        // R brought the FR edge up: U5 shows green, R1 keeps red
        assert_eq!(a[0].color, Color::Green);
        assert_eq!(a[1].color, Color::Red);

        let c = state.corner(Face::Down, Face::Right, Face::Front).unwrap();
        let d = state.corner(Face::Front, Face::Down, Face::Right).unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn non_adjacent_faces_are_rejected() {
        let state = FaceletState::solved();
        assert_eq!(
            state.edge(Face::Up, Face::Down).unwrap_err(),
            NotAdjacentError(Face::Up, Face::Down)
        );
        assert_eq!(
            state.edge(Face::Up, Face::Up).unwrap_err(),
            NotAdjacentError(Face::Up, Face::Up)
        );
        assert_eq!(
            state.corner(Face::Front, Face::Back, Face::Up).unwrap_err(),
            NotAdjacentError(Face::Front, Face::Back)
        );
    }

    #[test]
    fn face_orderings_are_canonical() {
        assert_eq!(order_edge(Face::Front, Face::Up), [Face::Up, Face::Front]);
        assert_eq!(order_edge(Face::Right, Face::Back), [Face::Right, Face::Back]);
        assert_eq!(order_edge(Face::Front, Face::Left), [Face::Left, Face::Front]);
        assert_eq!(
            order_corner(Face::Right, Face::Front, Face::Up),
            [Face::Front, Face::Up, Face::Right]
        );
        assert_eq!(
            order_corner(Face::Down, Face::Left, Face::Back),
            [Face::Back, Face::Down, Face::Left]
        );
    }
}
