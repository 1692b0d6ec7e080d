//! Layer-by-layer solver for 2x2 and 3x3 cubes.
//!
//! The method never searches. Each stage looks up where the pieces it needs
//! are, issues a fixed algorithm for the situation it finds and leaves the
//! stage's goal satisfied:
//! - centers: whole-cube rotations until yellow is down and green in front (3x3)
//! - cross: the four yellow bottom edges (3x3)
//! - corners: the four yellow bottom corners
//! - middle: the four middle-layer edges (3x3)
//! - orientation: the top face, from the orientation case table
//! - permutation: the top layer's pieces, from the permutation case table
//! - alignment: a final top-layer turn
//!
//! A piece that cannot be found, or a top layer that no case matches, means the
//! cube was not a valid cube to begin with, and the solver panics.

use std::fmt;

use log::debug;
use strum::Display;

use crate::cases::{self, Case};
use crate::cube::Cube;
use crate::pattern::{relation, ColorDescriptor, ColorPattern};
use crate::pieces::{Face, FaceColor, PieceColors, PieceLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Centers,
    Cross,
    Corners,
    Middle,
    Orientation,
    Permutation,
    Alignment,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error("no solving method for a cube of size {0} (only 2 and 3 are supported)")]
    UnsupportedSize(usize),
}

/// The moves a solve issued, grouped by stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    stages: Vec<(Stage, Vec<String>)>,
}

impl Solution {
    /// Iterates over the stages that ran, in order, with the move tokens each issued.
    pub fn stages(&self) -> impl Iterator<Item = (Stage, &[String])> + '_ {
        self.stages
            .iter()
            .map(|(stage, moves)| (*stage, moves.as_slice()))
    }

    /// All moves as one space-separated sequence.
    pub fn moves(&self) -> String {
        self.stages
            .iter()
            .flat_map(|(_, moves)| moves)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of move tokens.
    pub fn len(&self) -> usize {
        self.stages.iter().map(|(_, moves)| moves.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (stage, moves) in &self.stages {
            if moves.is_empty() {
                writeln!(f, "{stage}: -")?;
            } else {
                writeln!(f, "{stage}: {}", moves.join(" "))?;
            }
        }
        Ok(())
    }
}

/// Solves `cube` in place and returns the moves issued.
///
/// The moves are applied through the cube's normal move interface, so they are
/// queued as animations like any other move.
///
/// # Panics
///
/// Panics if the cube is not a valid, solvable cube (a piece is missing or
/// duplicated, or the top layer shows a state no case covers).
pub fn solve(cube: &mut Cube) -> Result<Solution, SolveError> {
    let size = cube.size();
    let (Some(orientation_cases), Some(permutation_cases)) = (
        cases::orientation_cases(size),
        cases::permutation_cases(size),
    ) else {
        return Err(SolveError::UnsupportedSize(size));
    };

    let mut solver = Solver {
        cube,
        solution: Solution::default(),
    };
    if size == 3 {
        solver.run(Stage::Centers, Solver::orient_centers);
        solver.run(Stage::Cross, Solver::solve_cross);
    }
    solver.run(Stage::Corners, Solver::solve_corners);
    if size == 3 {
        solver.run(Stage::Middle, Solver::solve_middle);
    }
    solver.run(Stage::Orientation, |solver| {
        solver.solve_orientation(orientation_cases)
    });
    solver.run(Stage::Permutation, |solver| {
        solver.solve_permutation(permutation_cases)
    });
    solver.run(Stage::Alignment, Solver::align_top_layer);

    Ok(solver.solution)
}

/// Top-layer edge positions of a 3x3, each one `U` away from the previous.
const TOP_EDGE_CYCLE: [(usize, usize); 4] = [(1, 2), (0, 1), (1, 0), (2, 1)];

/// A bottom-layer corner slot, named by the two side faces it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CornerSlot {
    FrontRight,
    BackRight,
    BackLeft,
    FrontLeft,
}

impl CornerSlot {
    /// Slots with the side colors of the corner that belongs there.
    const ALL: [(CornerSlot, [FaceColor; 2]); 4] = [
        (CornerSlot::FrontRight, [FaceColor::Green, FaceColor::Red]),
        (CornerSlot::BackRight, [FaceColor::Red, FaceColor::Blue]),
        (CornerSlot::BackLeft, [FaceColor::Blue, FaceColor::Orange]),
        (CornerSlot::FrontLeft, [FaceColor::Orange, FaceColor::Green]),
    ];

    /// `(x, z)` of the slot's column.
    fn column(self, last: usize) -> (usize, usize) {
        match self {
            CornerSlot::FrontRight => (last, last),
            CornerSlot::BackRight => (last, 0),
            CornerSlot::BackLeft => (0, 0),
            CornerSlot::FrontLeft => (0, last),
        }
    }

    fn from_column(x: usize, z: usize, last: usize) -> Option<Self> {
        [
            CornerSlot::FrontRight,
            CornerSlot::BackRight,
            CornerSlot::BackLeft,
            CornerSlot::FrontLeft,
        ]
        .into_iter()
        .find(|slot| slot.column(last) == (x, z))
    }

    /// Lifts whatever sits in this bottom slot into the top layer.
    fn lift(self) -> &'static str {
        match self {
            CornerSlot::FrontRight => "R U R'",
            CornerSlot::BackRight => "R' U' R",
            CornerSlot::BackLeft => "L U L'",
            CornerSlot::FrontLeft => "L' U' L",
        }
    }

    /// Drops a corner from above this slot into it, keyed on the face that
    /// shows its yellow sticker.
    fn insert(self, yellow_face: Face) -> Option<&'static str> {
        use CornerSlot::*;
        match (self, yellow_face) {
            (FrontRight, Face::Top) => Some("R U2 R' U' R U R'"),
            (FrontRight, Face::Right) => Some("R U R'"),
            (FrontRight, Face::Front) => Some("F' U' F"),
            (BackRight, Face::Top) => Some("R' U2 R U R' U' R"),
            (BackRight, Face::Right) => Some("R' U' R"),
            (BackRight, Face::Back) => Some("B U B'"),
            (BackLeft, Face::Top) => Some("L U2 L' U' L U L'"),
            (BackLeft, Face::Left) => Some("L U L'"),
            (BackLeft, Face::Back) => Some("B' U' B"),
            (FrontLeft, Face::Top) => Some("L' U2 L U L' U' L"),
            (FrontLeft, Face::Left) => Some("L' U' L"),
            (FrontLeft, Face::Front) => Some("F U F'"),
            _ => None,
        }
    }
}

/// Which way a middle edge leaves the top layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Insertion {
    Right,
    Left,
}

/// Inserts the top edge above `face` into the middle slot to its right or left.
fn middle_insert(face: Face, insertion: Insertion) -> &'static str {
    match (face, insertion) {
        (Face::Front, Insertion::Right) => "U R U' R' U' F' U F",
        (Face::Front, Insertion::Left) => "U' L' U L U F U' F'",
        (Face::Right, Insertion::Right) => "U B U' B' U' R' U R",
        (Face::Right, Insertion::Left) => "U' F' U F U R U' R'",
        (Face::Back, Insertion::Right) => "U L U' L' U' B' U B",
        (Face::Back, Insertion::Left) => "U' R' U R U B U' B'",
        (Face::Left, Insertion::Right) => "U F U' F' U' L' U L",
        (Face::Left, Insertion::Left) => "U' B' U B U L U' L'",
        (Face::Top | Face::Bottom, _) => unreachable!("middle edges sit between side faces"),
    }
}

/// The top-layer turn that rotates it `quarter_turns` times clockwise.
fn top_turns(quarter_turns: usize) -> Option<&'static str> {
    match quarter_turns % 4 {
        0 => None,
        1 => Some("U"),
        2 => Some("U2"),
        _ => Some("U'"),
    }
}

/// Quarter turns of a top-layer turn token.
fn top_quarter_turns(token: &str) -> Option<usize> {
    match token {
        "U" => Some(1),
        "U2" => Some(2),
        "U'" => Some(3),
        _ => None,
    }
}

struct Solver<'a> {
    cube: &'a mut Cube,
    solution: Solution,
}

impl Solver<'_> {
    fn run(&mut self, stage: Stage, step: impl FnOnce(&mut Self)) {
        self.solution.stages.push((stage, Vec::new()));
        step(self);
        if let Some((_, moves)) = self.solution.stages.last() {
            debug!("{stage}: {}", moves.join(" "));
        }
    }

    /// Applies `moves` and records them under the current stage.
    fn issue(&mut self, moves: &str) {
        self.cube.make_moves(moves);
        if let Some((_, recorded)) = self.solution.stages.last_mut() {
            recorded.extend(moves.split_whitespace().map(str::to_owned));
        }
    }

    fn locate(&self, colors: &[FaceColor]) -> PieceLocation {
        self.cube
            .location_by_exact_colors(colors)
            .unwrap_or_else(|| panic!("no piece with exactly the colors {colors:?}"))
    }

    fn colors_at(&self, location: PieceLocation) -> PieceColors {
        self.cube
            .piece_colors(location)
            .copied()
            .unwrap_or_else(|| panic!("{location} is outside the cube"))
    }

    /// Turns the top layer until the piece at `current` sits at `target`, then
    /// applies `insert`. A top turn leading `insert` is merged into the
    /// alignment turn.
    fn align_top_and_insert(
        &mut self,
        current: (usize, usize),
        target: (usize, usize),
        cycle: &[(usize, usize); 4],
        insert: &str,
    ) {
        let position = |column: (usize, usize)| {
            cycle
                .iter()
                .position(|&c| c == column)
                .unwrap_or_else(|| panic!("{column:?} is not on the top-layer cycle"))
        };
        let mut quarter_turns = (position(target) + 4 - position(current)) % 4;
        let mut rest = insert;
        if let Some((lead, tail)) = insert.split_once(' ') {
            if let Some(lead_turns) = top_quarter_turns(lead) {
                quarter_turns += lead_turns;
                rest = tail;
            }
        }
        if let Some(moves) = top_turns(quarter_turns) {
            self.issue(moves);
        }
        self.issue(rest);
    }

    fn orient_centers(&mut self) {
        let yellow = self.locate(&[FaceColor::Yellow]);
        let moves = match (yellow.x, yellow.y, yellow.z) {
            (1, 0, 1) => None,
            (1, 2, 1) => Some("x2"),
            (1, 1, 2) => Some("x'"),
            (1, 1, 0) => Some("x"),
            (2, 1, 1) => Some("z"),
            (0, 1, 1) => Some("z'"),
            _ => panic!("yellow center found at {yellow}"),
        };
        if let Some(moves) = moves {
            self.issue(moves);
        }

        let green = self.locate(&[FaceColor::Green]);
        let moves = match (green.x, green.y, green.z) {
            (1, 1, 2) => None,
            (2, 1, 1) => Some("y"),
            (0, 1, 1) => Some("y'"),
            (1, 1, 0) => Some("y2"),
            _ => panic!("green center found at {green} after orienting yellow"),
        };
        if let Some(moves) = moves {
            self.issue(moves);
        }
    }

    fn solve_cross(&mut self) {
        let targets = [
            (FaceColor::Green, Face::Front, (1, 2)),
            (FaceColor::Red, Face::Right, (2, 1)),
            (FaceColor::Blue, Face::Back, (1, 0)),
            (FaceColor::Orange, Face::Left, (0, 1)),
        ];
        for (color, face, (x, z)) in targets {
            let colors = [FaceColor::Yellow, color];
            let destination = PieceLocation::new(x, 0, z);
            let location = self.locate(&colors);
            if location == destination
                && self.colors_at(location)[Face::Bottom] == FaceColor::Yellow
            {
                continue;
            }

            let lift = match (location.y, location.x, location.z) {
                (2, _, _) => None,
                (0, 1, 2) => Some("F2"),
                (0, 2, 1) => Some("R2"),
                (0, 1, 0) => Some("B2"),
                (0, 0, 1) => Some("L2"),
                (1, 2, 2) => Some("R U R'"),
                (1, 2, 0) => Some("R' U R"),
                (1, 0, 0) => Some("L U L'"),
                (1, 0, 2) => Some("L' U L"),
                _ => panic!("cross edge found at {location}"),
            };
            if let Some(moves) = lift {
                self.issue(moves);
            }

            // a top turn never moves the yellow sticker between top and side
            let location = self.locate(&colors);
            let yellow_on_top = self.colors_at(location)[Face::Top] == FaceColor::Yellow;
            let insert = match (face, yellow_on_top) {
                (Face::Front, true) => "F2",
                (Face::Front, false) => "U' R' F R",
                (Face::Right, true) => "R2",
                (Face::Right, false) => "U' B' R B",
                (Face::Back, true) => "B2",
                (Face::Back, false) => "U' L' B L",
                (Face::Left, true) => "L2",
                (Face::Left, false) => "U' F' L F",
                (Face::Top | Face::Bottom, _) => unreachable!("cross slots are below side faces"),
            };
            self.align_top_and_insert((location.x, location.z), (x, z), &TOP_EDGE_CYCLE, insert);
        }
    }

    fn solve_corners(&mut self) {
        let last = self.cube.size() - 1;
        let cycle = [(last, last), (0, last), (0, 0), (last, 0)];
        for (slot, [first, second]) in CornerSlot::ALL {
            let colors = [FaceColor::Yellow, first, second];
            let (x, z) = slot.column(last);
            let destination = PieceLocation::new(x, 0, z);
            let location = self.locate(&colors);
            if location == destination
                && self.colors_at(location)[Face::Bottom] == FaceColor::Yellow
            {
                continue;
            }

            if location.y == 0 {
                let occupied = CornerSlot::from_column(location.x, location.z, last)
                    .unwrap_or_else(|| panic!("corner found at {location}"));
                self.issue(occupied.lift());
            }

            let location = self.locate(&colors);
            self.align_top_and_insert((location.x, location.z), (x, z), &cycle, "");

            let location = self.locate(&colors);
            let yellow_face = self
                .colors_at(location)
                .face_of(FaceColor::Yellow)
                .unwrap_or_else(|| panic!("corner at {location} lost its yellow sticker"));
            let insert = slot
                .insert(yellow_face)
                .unwrap_or_else(|| panic!("corner above {slot:?} shows yellow on {yellow_face:?}"));
            self.issue(insert);
        }
    }

    fn solve_middle(&mut self) {
        let targets = [
            ([FaceColor::Green, FaceColor::Red], (2, 2), [Face::Front, Face::Right]),
            ([FaceColor::Red, FaceColor::Blue], (2, 0), [Face::Right, Face::Back]),
            ([FaceColor::Blue, FaceColor::Orange], (0, 0), [Face::Back, Face::Left]),
            ([FaceColor::Orange, FaceColor::Green], (0, 2), [Face::Left, Face::Front]),
        ];
        for (colors, (x, z), faces) in targets {
            let destination = PieceLocation::new(x, 1, z);
            let location = self.locate(&colors);
            let piece = self.colors_at(location);
            if location == destination
                && piece[faces[0]] == colors[0]
                && piece[faces[1]] == colors[1]
            {
                continue;
            }

            if location.y == 1 {
                // push it out with the slot's own right-hand insertion
                let face = match (location.x, location.z) {
                    (2, 2) => Face::Front,
                    (2, 0) => Face::Right,
                    (0, 0) => Face::Back,
                    (0, 2) => Face::Left,
                    _ => panic!("middle edge found at {location}"),
                };
                self.issue(middle_insert(face, Insertion::Right));
            }

            let location = self.locate(&colors);
            let piece = self.colors_at(location);
            let Some((_, side_color)) = piece
                .stickers()
                .find(|&(face, _)| Face::SIDES.contains(&face))
            else {
                panic!("middle edge at {location} shows no side sticker");
            };
            let top_color = piece[Face::Top];

            let Some(&face) = Face::SIDES
                .iter()
                .find(|face| face.home_color() == side_color)
            else {
                panic!("middle edge at {location} shows {side_color} on its side");
            };
            let above = match face {
                Face::Front => (1, 2),
                Face::Right => (2, 1),
                Face::Back => (1, 0),
                Face::Left => (0, 1),
                Face::Top | Face::Bottom => unreachable!("found among the side faces"),
            };
            let right_of_side = side_color
                .cycle_index()
                .map(|idx| FaceColor::SIDE_CYCLE[(idx + 1) % 4]);
            let insertion = if right_of_side == Some(top_color) {
                Insertion::Right
            } else {
                Insertion::Left
            };
            let insert = middle_insert(face, insertion);
            self.align_top_and_insert((location.x, location.z), above, &TOP_EDGE_CYCLE, insert);
        }
    }

    fn solve_orientation(&mut self, cases: &'static [Case]) {
        let observed = ColorPattern::orientation(self.cube, FaceColor::White);
        if !observed.contains(ColorDescriptor::BaseColor) {
            return;
        }
        self.apply_case(cases, &observed);
    }

    fn solve_permutation(&mut self, cases: &'static [Case]) {
        let observed = ColorPattern::relations(self.cube);
        if observed == ColorPattern::solved_relations(self.cube.size()) {
            return;
        }
        self.apply_case(cases, &observed);
    }

    /// Runs the first case matching `observed`, after turning the top layer
    /// into the case's orientation.
    fn apply_case(&mut self, cases: &'static [Case], observed: &ColorPattern) {
        let Some((case, rotation)) = cases
            .iter()
            .find_map(|case| case.pattern.match_rotation(observed).map(|rotation| (case, rotation)))
        else {
            panic!("no case matches the top layer pattern {observed}");
        };
        debug!("case {} matches {observed} at rotation {rotation}", case.name);
        if let Some(moves) = top_turns(rotation) {
            self.issue(moves);
        }
        self.issue(case.moves);
    }

    fn align_top_layer(&mut self) {
        let size = self.cube.size();
        let last = size - 1;
        // the front sticker of a piece that never leaves the lower layers
        let reference = if size == 2 {
            PieceLocation::new(0, 0, last)
        } else {
            PieceLocation::new(size / 2, size / 2, last)
        };
        let reference = self.colors_at(reference)[Face::Front];
        let top = self.colors_at(PieceLocation::new(0, last, last))[Face::Front];
        let moves = match relation(reference, top) {
            ColorDescriptor::Same => None,
            ColorDescriptor::LeftNeighbor => Some("U"),
            ColorDescriptor::RightNeighbor => Some("U'"),
            ColorDescriptor::Opposite => Some("U2"),
            other => panic!("front stickers {reference} and {top} relate as {other:?}"),
        };
        if let Some(moves) = moves {
            self.issue(moves);
        }
    }
}
