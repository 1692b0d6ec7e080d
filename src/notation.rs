//! Move notation.
//!
//! ```text
//! token    := [digits] letter [modifier]
//! letter   := U F R B L D        single outer layer (or the layer `digits` deep)
//!           | u f r b l d        wide: the outer 2 layers (or `digits` layers)
//!           | M E S              center slice of an odd cube
//!           | x y z              whole-cube rotation
//! modifier := ''                 clockwise
//!           | '                  counterclockwise
//!           | 2 | 2'             half turn
//! ```
//!
//! `2R'` turns the layer one inward from the right face counterclockwise, and
//! `3r` turns the three right-most layers together.

use crate::geometry::{Axis, Turn};

/// A resolved move token: co-axial quarter turns issued together, repeated
/// `quarter_turns` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub turns: Vec<Turn>,
    /// 1 for a quarter turn, 2 for a half turn.
    pub quarter_turns: u8,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NotationError<'a> {
    #[error("empty move token")]
    Empty,
    #[error("unknown move letter in {0:?}")]
    UnknownLetter(&'a str),
    #[error("bad modifier {modifier:?} in {token:?}")]
    BadModifier { token: &'a str, modifier: &'a str },
    #[error("layer depth in {token:?} is outside 1..={size}")]
    DepthOutOfRange { token: &'a str, size: usize },
    #[error("{0:?} needs a center layer, which an even cube does not have")]
    NoCenterLayer(&'a str),
    #[error("{0:?} does not take a layer prefix")]
    UnexpectedDepth(&'a str),
}

/// Parses a whitespace-separated move sequence, one result per token.
pub fn parse_moves(
    moves: &str,
    size: usize,
) -> impl Iterator<Item = Result<Move, NotationError<'_>>> {
    moves
        .split_whitespace()
        .map(move |token| parse_move(token, size))
}

/// Resolves one move token against a cube of the given size.
pub fn parse_move(token: &str, size: usize) -> Result<Move, NotationError<'_>> {
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, rest) = token.split_at(digits_end);
    let mut chars = rest.chars();
    let letter = match chars.next() {
        Some(letter) => letter,
        None if token.is_empty() => return Err(NotationError::Empty),
        None => return Err(NotationError::UnknownLetter(token)),
    };
    let modifier = chars.as_str();

    let (quarter_turns, reversed) = match modifier {
        "" => (1, false),
        "'" => (1, true),
        "2" | "2'" => (2, false),
        _ => return Err(NotationError::BadModifier { token, modifier }),
    };

    let depth = if digits.is_empty() {
        None
    } else {
        match digits.parse::<usize>() {
            Ok(depth) if (1..=size).contains(&depth) => Some(depth),
            _ => return Err(NotationError::DepthOutOfRange { token, size }),
        }
    };

    let last = size - 1;
    let (axis, clockwise, layers): (Axis, bool, Vec<usize>) = if let Some((axis, positive)) =
        outer_face(letter)
    {
        let depth = depth.unwrap_or(1);
        let layer = if positive { size - depth } else { depth - 1 };
        (axis, positive, vec![layer])
    } else if let Some((axis, positive)) = outer_face(letter.to_ascii_uppercase())
        .filter(|_| letter.is_ascii_lowercase())
    {
        let width = depth.unwrap_or(2);
        let layers = (0..width)
            .map(|i| if positive { last - i } else { i })
            .collect();
        (axis, positive, layers)
    } else if let Some((axis, clockwise)) = slice(letter) {
        if depth.is_some() {
            return Err(NotationError::UnexpectedDepth(token));
        }
        if size % 2 == 0 {
            return Err(NotationError::NoCenterLayer(token));
        }
        (axis, clockwise, vec![size / 2])
    } else if let Some(axis) = rotation(letter) {
        if depth.is_some() {
            return Err(NotationError::UnexpectedDepth(token));
        }
        (axis, true, (0..size).collect())
    } else {
        return Err(NotationError::UnknownLetter(token));
    };

    let clockwise = clockwise != reversed;
    Ok(Move {
        turns: layers
            .into_iter()
            .map(|layer| Turn::new(axis, layer, clockwise))
            .collect(),
        quarter_turns,
    })
}

/// Outer face letters: the axis, and whether the face sits at the positive end
/// of it (in which case its clockwise turn is clockwise about the axis).
fn outer_face(letter: char) -> Option<(Axis, bool)> {
    match letter {
        'U' => Some((Axis::Horizontal, true)),
        'D' => Some((Axis::Horizontal, false)),
        'R' => Some((Axis::Vertical, true)),
        'L' => Some((Axis::Vertical, false)),
        'F' => Some((Axis::Depthical, true)),
        'B' => Some((Axis::Depthical, false)),
        _ => None,
    }
}

/// Slice letters: M follows L, E follows D, S follows F.
fn slice(letter: char) -> Option<(Axis, bool)> {
    match letter {
        'M' => Some((Axis::Vertical, false)),
        'E' => Some((Axis::Horizontal, false)),
        'S' => Some((Axis::Depthical, true)),
        _ => None,
    }
}

/// Whole-cube rotations: x follows R, y follows U, z follows F.
fn rotation(letter: char) -> Option<Axis> {
    match letter {
        'x' => Some(Axis::Vertical),
        'y' => Some(Axis::Horizontal),
        'z' => Some(Axis::Depthical),
        _ => None,
    }
}
