//! Rotation-invariant patterns of the top layer's side stickers.
//!
//! A pattern samples the ring of side stickers around the top layer: the front
//! row left to right, the right column front to back, the back row right to left
//! and the left column back to front, `4 * size` stickers in all. Turning the
//! top layer a quarter turn shifts the ring by `size` positions.

use std::fmt;
use std::str::FromStr;

use crate::cube::Cube;
use crate::pieces::{Face, FaceColor, PieceLocation};

/// What one ring position says about its sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorDescriptor {
    /// Matches anything.
    DontCare,
    /// The sticker shows the pattern's base color.
    BaseColor,
    /// Same color as the previous ring position.
    Same,
    /// One step counterclockwise from the previous position's color.
    LeftNeighbor,
    /// One step clockwise from the previous position's color.
    RightNeighbor,
    /// Opposite the previous position's color.
    Opposite,
}

impl ColorDescriptor {
    pub const fn letter(self) -> char {
        match self {
            ColorDescriptor::DontCare => 'D',
            ColorDescriptor::BaseColor => 'B',
            ColorDescriptor::Same => 'S',
            ColorDescriptor::LeftNeighbor => 'L',
            ColorDescriptor::RightNeighbor => 'R',
            ColorDescriptor::Opposite => 'O',
        }
    }

    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'D' => Some(ColorDescriptor::DontCare),
            'B' => Some(ColorDescriptor::BaseColor),
            'S' => Some(ColorDescriptor::Same),
            'L' => Some(ColorDescriptor::LeftNeighbor),
            'R' => Some(ColorDescriptor::RightNeighbor),
            'O' => Some(ColorDescriptor::Opposite),
            _ => None,
        }
    }
}

/// Describes how `to` sits relative to `from` on [`FaceColor::SIDE_CYCLE`].
///
/// Colors off the cycle (top, bottom, none) relate as [`ColorDescriptor::DontCare`].
pub fn relation(from: FaceColor, to: FaceColor) -> ColorDescriptor {
    let (Some(from), Some(to)) = (from.cycle_index(), to.cycle_index()) else {
        return ColorDescriptor::DontCare;
    };
    match (to + 4 - from) % 4 {
        0 => ColorDescriptor::Same,
        1 => ColorDescriptor::RightNeighbor,
        2 => ColorDescriptor::Opposite,
        _ => ColorDescriptor::LeftNeighbor,
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid descriptor {descriptor:?} at position {position}")]
    InvalidDescriptor { descriptor: char, position: usize },
    #[error("a ring pattern needs a positive multiple of 4 descriptors, got {0}")]
    BadLength(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorPattern {
    descriptors: Vec<ColorDescriptor>,
}

impl ColorPattern {
    /// Marks every ring sticker showing `base` as [`ColorDescriptor::BaseColor`].
    pub fn orientation(cube: &Cube, base: FaceColor) -> Self {
        let descriptors = top_ring(cube)
            .into_iter()
            .map(|color| {
                if color == base {
                    ColorDescriptor::BaseColor
                } else {
                    ColorDescriptor::DontCare
                }
            })
            .collect();
        Self { descriptors }
    }

    /// Relates every ring sticker to the one before it, wrapping around.
    pub fn relations(cube: &Cube) -> Self {
        let ring = top_ring(cube);
        let descriptors = (0..ring.len())
            .map(|j| relation(ring[(j + ring.len() - 1) % ring.len()], ring[j]))
            .collect();
        Self { descriptors }
    }

    /// Relational pattern of a solved top layer.
    pub fn solved_relations(size: usize) -> Self {
        Self::relations(&Cube::new(size))
    }

    pub fn descriptors(&self) -> &[ColorDescriptor] {
        &self.descriptors
    }

    /// Stickers per side of the ring.
    pub fn side_length(&self) -> usize {
        self.descriptors.len() / 4
    }

    pub fn count(&self, descriptor: ColorDescriptor) -> usize {
        self.descriptors.iter().filter(|&&d| d == descriptor).count()
    }

    pub fn contains(&self, descriptor: ColorDescriptor) -> bool {
        self.descriptors.contains(&descriptor)
    }

    /// Returns the pattern as it reads after `quarter_turns` clockwise turns
    /// of the top layer.
    #[must_use]
    pub fn rotated(&self, quarter_turns: usize) -> Self {
        let len = self.descriptors.len();
        if len == 0 {
            return self.clone();
        }
        let shift = self.side_length() * (quarter_turns % 4);
        let descriptors = (0..len)
            .map(|m| self.descriptors[(m + len - shift) % len])
            .collect();
        Self { descriptors }
    }

    /// Finds how many quarter turns `candidate` is rotated from this pattern.
    ///
    /// A [`ColorDescriptor::DontCare`] in the candidate matches anything. Returns
    /// the first rotation in `0..4` that matches, or `None` if none does.
    pub fn match_rotation(&self, candidate: &ColorPattern) -> Option<usize> {
        let len = self.descriptors.len();
        if len != candidate.descriptors.len() {
            return None;
        }
        let side = self.side_length();
        (0..4).find(|&rotation| {
            self.descriptors.iter().enumerate().all(|(j, &expected)| {
                let observed = candidate.descriptors[(side * rotation + j) % len];
                observed == ColorDescriptor::DontCare || observed == expected
            })
        })
    }

    /// Returns the smallest of the four rotations, so that patterns differing
    /// only by a top-layer turn compare equal.
    #[must_use]
    pub fn canonical(&self) -> Self {
        (0..4)
            .map(|quarter_turns| self.rotated(quarter_turns))
            .min()
            .unwrap_or_else(|| self.clone())
    }
}

impl FromStr for ColorPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let descriptors = s
            .chars()
            .enumerate()
            .map(|(position, descriptor)| {
                ColorDescriptor::from_letter(descriptor).ok_or(PatternError::InvalidDescriptor {
                    descriptor,
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if descriptors.is_empty() || descriptors.len() % 4 != 0 {
            return Err(PatternError::BadLength(descriptors.len()));
        }
        Ok(Self { descriptors })
    }
}

impl fmt::Display for ColorPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for descriptor in &self.descriptors {
            write!(f, "{}", descriptor.letter())?;
        }
        Ok(())
    }
}

/// Reads the side stickers around the top layer in ring order.
fn top_ring(cube: &Cube) -> Vec<FaceColor> {
    let size = cube.size();
    let last = size - 1;
    let sticker = |x: usize, z: usize, face: Face| {
        cube.piece_colors(PieceLocation::new(x, last, z))
            .map_or(FaceColor::None, |colors| colors[face])
    };

    let front = (0..size).map(|i| sticker(i, last, Face::Front));
    let right = (0..size).map(|i| sticker(last, last - i, Face::Right));
    let back = (0..size).map(|i| sticker(last - i, 0, Face::Back));
    let left = (0..size).map(|i| sticker(0, i, Face::Left));
    front.chain(right).chain(back).chain(left).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> ColorPattern {
        s.parse().expect("valid pattern")
    }

    #[test]
    fn test_relations_follow_the_side_cycle() {
        use FaceColor::*;
        assert_eq!(relation(Green, Green), ColorDescriptor::Same);
        assert_eq!(relation(Green, Red), ColorDescriptor::RightNeighbor);
        assert_eq!(relation(Green, Blue), ColorDescriptor::Opposite);
        assert_eq!(relation(Green, Orange), ColorDescriptor::LeftNeighbor);
        assert_eq!(relation(Orange, Green), ColorDescriptor::RightNeighbor);
        assert_eq!(relation(Blue, Red), ColorDescriptor::LeftNeighbor);
        assert_eq!(relation(White, Red), ColorDescriptor::DontCare);
        assert_eq!(relation(Red, None), ColorDescriptor::DontCare);
    }

    #[test]
    fn test_solved_relations() {
        assert_eq!(ColorPattern::solved_relations(3).to_string(), "RSSRSSRSSRSS");
        assert_eq!(ColorPattern::solved_relations(2).to_string(), "RSRSRSRS");
        assert_eq!(ColorPattern::solved_relations(4).side_length(), 4);
    }

    #[test]
    fn test_relations_ignore_top_layer_turns() {
        let mut cube = Cube::new(3);
        cube.make_move("U");
        assert_eq!(ColorPattern::relations(&cube), ColorPattern::solved_relations(3));
    }

    #[test]
    fn test_orientation_pattern() {
        let cube = Cube::new(2);
        assert_eq!(ColorPattern::orientation(&cube, FaceColor::White).to_string(), "DDDDDDDD");
        assert_eq!(ColorPattern::orientation(&cube, FaceColor::Green).to_string(), "BBDDDDDD");

        let mut cube = Cube::new(3);
        cube.make_moves("R U R' U R U2 R'");
        let observed = ColorPattern::orientation(&cube, FaceColor::White);
        assert_eq!(observed.to_string(), "BDDBDDDDDBDD");
        assert_eq!(observed.count(ColorDescriptor::BaseColor), 3);
    }

    #[test]
    fn test_permutation_pattern_of_a_known_case() {
        let mut cube = Cube::new(3);
        cube.make_moves("R U R' U' R' F R2 U' R' U' R U R' F'");
        assert_eq!(ColorPattern::relations(&cube).to_string(), "RSRRRRRRSROO");
    }

    #[test]
    fn test_match_finds_the_rotation() {
        let case = pattern("RSRRRRRRSROO");
        assert_eq!(case.match_rotation(&case), Some(0));
        for k in 0..4 {
            assert_eq!(case.match_rotation(&case.rotated(k)), Some(k));
        }
        assert_eq!(case.rotated(1).to_string(), "ROORSRRRRRRS");
    }

    #[test]
    fn test_candidate_wildcards_match_anything() {
        let case = pattern("BDDBDDDDDBDD");
        assert_eq!(case.match_rotation(&pattern("BDDDDDDDDDDD")), Some(0));
        assert_eq!(case.match_rotation(&pattern("DDDDDDDDDDDD")), Some(0));
        // wildcards in the case itself do not
        assert_eq!(pattern("DDDDDDDDDDDD").match_rotation(&case), None);
    }

    #[test]
    fn test_incompatible_patterns_do_not_match() {
        let case = pattern("BBBDDDDDDDDD");
        assert_eq!(case.match_rotation(&pattern("BBBBDDDDDDDD")), None);
        assert_eq!(case.match_rotation(&pattern("BBDDDDDD")), None);
    }

    #[test]
    fn test_canonical_form_is_rotation_invariant() {
        let case = pattern("RSRRRRRRSROO");
        for k in 0..4 {
            assert_eq!(case.rotated(k).canonical(), case.canonical());
        }
        assert_ne!(case.canonical(), pattern("RSSRSSRSSRSS").canonical());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "RSX?".parse::<ColorPattern>(),
            Err(PatternError::InvalidDescriptor {
                descriptor: 'X',
                position: 2
            })
        );
        assert_eq!("RSR".parse::<ColorPattern>(), Err(PatternError::BadLength(3)));
        assert_eq!("".parse::<ColorPattern>(), Err(PatternError::BadLength(0)));
    }
}
