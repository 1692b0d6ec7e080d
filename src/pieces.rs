//! Sticker colors and per-location piece records.
//!
//! A piece never stores its own position or orientation. It is a record of
//! which color shows on each of the six fixed faces, and turns move these
//! records between grid cells while relabeling their faces.

use std::fmt;
use std::ops::{Index, IndexMut};

use strum::{EnumIter, IntoEnumIterator};

use crate::geometry::{Axis, FACE_TRANSITIONS};

/// One of the six fixed faces of the cube's outer frame.
///
/// The discriminants index [`PieceColors`] and [`FACE_TRANSITIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Face {
    Top = 0,
    Front,
    Right,
    Back,
    Left,
    Bottom,
}

impl Face {
    /// The four faces around the vertical axis, in clockwise order seen from the top.
    pub const SIDES: [Face; 4] = [Face::Front, Face::Right, Face::Back, Face::Left];

    /// Returns the color this face shows on a solved cube.
    pub const fn home_color(self) -> FaceColor {
        match self {
            Face::Top => FaceColor::White,
            Face::Front => FaceColor::Green,
            Face::Right => FaceColor::Red,
            Face::Back => FaceColor::Blue,
            Face::Left => FaceColor::Orange,
            Face::Bottom => FaceColor::Yellow,
        }
    }
}

/// A sticker color, or `None` for a face that is not on the outer shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum FaceColor {
    White,
    Yellow,
    Green,
    Blue,
    Red,
    Orange,
    None,
}

impl FaceColor {
    /// Side colors in clockwise order seen from the top of a solved cube.
    pub const SIDE_CYCLE: [FaceColor; 4] = [
        FaceColor::Green,
        FaceColor::Red,
        FaceColor::Blue,
        FaceColor::Orange,
    ];

    /// Returns the single-letter code used by the text net.
    pub const fn letter(self) -> char {
        match self {
            FaceColor::White => 'W',
            FaceColor::Yellow => 'Y',
            FaceColor::Green => 'G',
            FaceColor::Blue => 'B',
            FaceColor::Red => 'R',
            FaceColor::Orange => 'O',
            FaceColor::None => '.',
        }
    }

    /// Returns this color's position on [`FaceColor::SIDE_CYCLE`], if it is a side color.
    pub fn cycle_index(self) -> Option<usize> {
        Self::SIDE_CYCLE.iter().position(|&color| color == self)
    }
}

impl fmt::Display for FaceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Grid coordinates of one cell.
///
/// `x` grows from the left face to the right face, `y` from bottom to top and
/// `z` from back to front. Each coordinate lies in `0..size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceLocation {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl PieceLocation {
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for PieceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The colors one grid cell shows on each of the six fixed faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceColors([FaceColor; 6]);

impl Default for PieceColors {
    fn default() -> Self {
        Self([FaceColor::None; 6])
    }
}

impl PieceColors {
    /// Builds a record from colors given in [`Face`] discriminant order.
    pub const fn new(colors: [FaceColor; 6]) -> Self {
        Self(colors)
    }

    /// Returns the colors in [`Face`] discriminant order.
    pub const fn colors(&self) -> &[FaceColor; 6] {
        &self.0
    }

    /// Iterates over the real stickers (skipping `None`) with the face they show on.
    pub fn stickers(&self) -> impl Iterator<Item = (Face, FaceColor)> + '_ {
        Face::iter()
            .map(|face| (face, self[face]))
            .filter(|&(_, color)| color != FaceColor::None)
    }

    /// Returns the face currently showing `color`.
    pub fn face_of(&self, color: FaceColor) -> Option<Face> {
        Face::iter().find(|&face| self[face] == color)
    }

    /// Returns whether the set of sticker colors equals the set of `colors`.
    ///
    /// Order and repeats in `colors` do not matter, and `None` entries are
    /// ignored.
    pub fn has_exact_colors(&self, colors: &[FaceColor]) -> bool {
        let shown = color_set(self.stickers().map(|(_, color)| color));
        shown == color_set(colors.iter().copied())
    }

    /// Returns whether every color in `colors` appears on some face. `None`
    /// entries are ignored.
    pub fn has_colors(&self, colors: &[FaceColor]) -> bool {
        colors
            .iter()
            .filter(|&&color| color != FaceColor::None)
            .all(|&color| self.face_of(color).is_some())
    }

    /// Returns the record as it reads after a quarter turn about `axis`.
    ///
    /// The sticker on face `f` moves to `FACE_TRANSITIONS[f][axis][direction]`.
    #[must_use]
    pub fn rotated(&self, axis: Axis, clockwise: bool) -> Self {
        let direction = if clockwise { 0 } else { 1 };
        let mut rotated = [FaceColor::None; 6];
        for (face, &color) in self.0.iter().enumerate() {
            let target = FACE_TRANSITIONS[face][axis as usize][direction];
            rotated[target as usize] = color;
        }
        Self(rotated)
    }
}

/// Sorted, de-duplicated real colors.
fn color_set(colors: impl Iterator<Item = FaceColor>) -> Vec<FaceColor> {
    let mut set: Vec<FaceColor> = colors.filter(|&color| color != FaceColor::None).collect();
    set.sort_unstable();
    set.dedup();
    set
}

impl Index<Face> for PieceColors {
    type Output = FaceColor;

    fn index(&self, face: Face) -> &FaceColor {
        &self.0[face as usize]
    }
}

impl IndexMut<Face> for PieceColors {
    fn index_mut(&mut self, face: Face) -> &mut FaceColor {
        &mut self.0[face as usize]
    }
}
