//! Turn axes and the face-relabeling table.
//!
//! The cube itself never rotates in logical space; only layers do. A quarter
//! turn moves piece records between cells (see [`crate::grid`]) and relabels
//! which face each of their stickers shows on, using [`FACE_TRANSITIONS`].

use std::fmt;

use strum::EnumIter;

use crate::pieces::Face;

/// The three turn axes.
///
/// - `Horizontal`: the y axis (layers parallel to the top face)
/// - `Vertical`: the x axis (layers parallel to the right face)
/// - `Depthical`: the z axis (layers parallel to the front face)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Axis {
    Horizontal = 0,
    Vertical,
    Depthical,
}

/// Where a sticker ends up after a quarter turn of its piece.
///
/// Indexed by `[face][axis][direction]`, where direction 0 is clockwise and 1
/// is counterclockwise, both seen from the positive end of the axis (top,
/// right or front).
pub const FACE_TRANSITIONS: [[[Face; 2]; 3]; 6] = {
    use Face::*;
    [
        // top
        [
            [Top, Top],     // horizontal
            [Back, Front],  // vertical
            [Right, Left],  // depthical
        ],
        // front
        [
            [Left, Right],  // horizontal
            [Top, Bottom],  // vertical
            [Front, Front], // depthical
        ],
        // right
        [
            [Front, Back],  // horizontal
            [Right, Right], // vertical
            [Bottom, Top],  // depthical
        ],
        // back
        [
            [Right, Left],  // horizontal
            [Bottom, Top],  // vertical
            [Back, Back],   // depthical
        ],
        // left
        [
            [Back, Front],  // horizontal
            [Left, Left],   // vertical
            [Top, Bottom],  // depthical
        ],
        // bottom
        [
            [Bottom, Bottom], // horizontal
            [Front, Back],    // vertical
            [Left, Right],    // depthical
        ],
    ]
};

/// A quarter turn of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    pub axis: Axis,
    /// Coordinate along `axis` of the turned layer, in `0..size`.
    pub layer: usize,
    /// Direction seen from the positive end of `axis`.
    pub clockwise: bool,
}

impl Turn {
    pub const fn new(axis: Axis, layer: usize, clockwise: bool) -> Self {
        Self {
            axis,
            layer,
            clockwise,
        }
    }

    /// Returns the turn that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        Self::new(self.axis, self.layer, !self.clockwise)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.clockwise { "cw" } else { "ccw" };
        write!(f, "{:?}[{}] {direction}", self.axis, self.layer)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    /// Follows one face through `n` applications of the same transition.
    fn follow(face: Face, axis: Axis, direction: usize, n: usize) -> Face {
        (0..n).fold(face, |f, _| FACE_TRANSITIONS[f as usize][axis as usize][direction])
    }

    #[test]
    fn test_transitions_have_order_four() {
        for axis in Axis::iter() {
            for direction in 0..2 {
                for face in Face::iter() {
                    assert_eq!(
                        follow(face, axis, direction, 4),
                        face,
                        "{face:?} should return home after four {axis:?} turns"
                    );
                }
            }
        }
    }

    #[test]
    fn test_directions_are_inverse() {
        for axis in Axis::iter() {
            for face in Face::iter() {
                let there = FACE_TRANSITIONS[face as usize][axis as usize][0];
                let back = FACE_TRANSITIONS[there as usize][axis as usize][1];
                assert_eq!(back, face);
            }
        }
    }

    #[test]
    fn test_axis_faces_are_fixed() {
        let fixed = [
            (Axis::Horizontal, [Face::Top, Face::Bottom]),
            (Axis::Vertical, [Face::Right, Face::Left]),
            (Axis::Depthical, [Face::Front, Face::Back]),
        ];
        for (axis, faces) in fixed {
            for face in faces {
                for direction in 0..2 {
                    assert_eq!(FACE_TRANSITIONS[face as usize][axis as usize][direction], face);
                }
            }
        }
    }

    #[test]
    fn test_inverse_turn() {
        let turn = Turn::new(Axis::Vertical, 2, true);
        assert_eq!(turn.inverse(), Turn::new(Axis::Vertical, 2, false));
        assert_eq!(turn.inverse().inverse(), turn);
    }
}
