//! The cube engine: piece grid, turn application and the animation queue.
//!
//! Every move updates the logical state immediately and then queues one
//! [`AnimationEntry`]. The queue only tracks how far a renderer has got in
//! showing those turns; [`Cube::update`] drains it and never touches colors.

use std::collections::VecDeque;

use log::debug;
use strum::IntoEnumIterator;

use crate::geometry::Turn;
use crate::grid::{coord_to_idx, idx_to_coord, layer_permutation};
use crate::notation::{self, NotationError};
use crate::pieces::{Face, FaceColor, PieceColors, PieceLocation};

/// Angle of a finished quarter turn, in degrees.
pub const QUARTER_TURN_DEGREES: f32 = 90.0;

/// Default animation speed, in degrees per second.
pub const DEFAULT_ANIMATION_SPEED: f32 = 360.0;

/// Co-axial turns that were applied together and are shown as one rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationEntry {
    pub turns: Vec<Turn>,
    /// Degrees shown so far, in `0.0..=90.0`.
    pub angle: f32,
}

#[derive(Debug, Clone)]
pub struct Cube {
    size: usize,
    /// One record per cell, indexed with [`coord_to_idx`].
    pieces: Vec<PieceColors>,
    animation_queue: VecDeque<AnimationEntry>,
    animations_enabled: bool,
    animation_speed: f32,
}

impl Cube {
    /// Creates a solved cube with `size` layers along each axis.
    ///
    /// # Panics
    ///
    /// Panics if `size < 2`.
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "a cube needs at least 2 layers, got {size}");
        let mut cube = Self {
            size,
            pieces: Vec::new(),
            animation_queue: VecDeque::new(),
            animations_enabled: true,
            animation_speed: DEFAULT_ANIMATION_SPEED,
        };
        cube.reset();
        cube
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Restores the solved state and drops any queued animations.
    pub fn reset(&mut self) {
        let size = self.size;
        self.pieces = (0..size * size * size)
            .map(|idx| {
                let location = idx_to_coord(size, idx);
                let mut colors = PieceColors::default();
                for face in Face::iter() {
                    if is_on_face(size, location, face) {
                        colors[face] = face.home_color();
                    }
                }
                colors
            })
            .collect();
        self.animation_queue.clear();
    }

    /// Returns every piece record in cell index order.
    pub fn pieces(&self) -> &[PieceColors] {
        &self.pieces
    }

    pub fn piece_colors(&self, location: PieceLocation) -> Option<&PieceColors> {
        self.index_of(location).map(|idx| &self.pieces[idx])
    }

    /// Overwrites one cell and returns its previous record, or `None` if the
    /// location is outside the cube.
    pub fn set_piece_colors(
        &mut self,
        location: PieceLocation,
        colors: PieceColors,
    ) -> Option<PieceColors> {
        let idx = self.index_of(location)?;
        Some(std::mem::replace(&mut self.pieces[idx], colors))
    }

    /// Finds the first cell whose stickers are exactly `colors`.
    pub fn location_by_exact_colors(&self, colors: &[FaceColor]) -> Option<PieceLocation> {
        self.pieces
            .iter()
            .position(|piece| piece.has_exact_colors(colors))
            .map(|idx| idx_to_coord(self.size, idx))
    }

    /// Finds every cell that shows at least `colors`.
    pub fn locations_by_colors(&self, colors: &[FaceColor]) -> Vec<PieceLocation> {
        self.pieces
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.has_colors(colors))
            .map(|(idx, _)| idx_to_coord(self.size, idx))
            .collect()
    }

    /// Returns whether no animation is pending and every face shows one color.
    pub fn is_solved(&self) -> bool {
        !self.is_turning() && Face::iter().all(|face| self.is_face_uniform(face))
    }

    /// Returns whether any animation is still queued.
    pub fn is_turning(&self) -> bool {
        !self.animation_queue.is_empty()
    }

    fn is_face_uniform(&self, face: Face) -> bool {
        let mut stickers = self
            .pieces
            .iter()
            .enumerate()
            .filter(|&(idx, _)| is_on_face(self.size, idx_to_coord(self.size, idx), face))
            .map(|(_, piece)| piece[face]);
        match stickers.next() {
            Some(first) => stickers.all(|color| color == first),
            None => true,
        }
    }

    fn index_of(&self, location: PieceLocation) -> Option<usize> {
        let in_range = location.x < self.size && location.y < self.size && location.z < self.size;
        in_range.then(|| coord_to_idx(self.size, location))
    }

    pub fn animations_enabled(&self) -> bool {
        self.animations_enabled
    }

    /// With animations off, every [`Cube::update`] call drains the whole queue.
    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.animations_enabled = enabled;
    }

    /// Degrees per second.
    pub fn animation_speed(&self) -> f32 {
        self.animation_speed
    }

    pub fn set_animation_speed(&mut self, degrees_per_second: f32) {
        self.animation_speed = degrees_per_second.max(0.0);
    }

    /// Returns the animation a renderer should currently be drawing.
    pub fn current_animation(&self) -> Option<&AnimationEntry> {
        self.animation_queue.front()
    }

    /// Returns the number of queued animations.
    pub fn pending_animations(&self) -> usize {
        self.animation_queue.len()
    }

    /// Advances the head animation by `delta_time` seconds.
    ///
    /// An entry is popped once it reaches a full quarter turn. When animations
    /// are disabled every entry completes at once, so the queue ends up empty.
    pub fn update(&mut self, delta_time: f32) {
        let step = if self.animations_enabled {
            self.animation_speed * delta_time.max(0.0)
        } else {
            QUARTER_TURN_DEGREES
        };
        while let Some(entry) = self.animation_queue.front_mut() {
            entry.angle = (entry.angle + step).min(QUARTER_TURN_DEGREES);
            if entry.angle >= QUARTER_TURN_DEGREES {
                self.animation_queue.pop_front();
            }
            if self.animations_enabled {
                break;
            }
        }
    }

    /// Completes every queued animation in order.
    pub fn finish_animations(&mut self) {
        self.animation_queue.clear();
    }

    /// Applies one quarter turn and queues its animation.
    pub fn make_turn(&mut self, turn: Turn) {
        self.make_multi_layer_turn(&[turn]);
    }

    /// Applies several co-axial quarter turns and queues them as one animation.
    ///
    /// # Panics
    ///
    /// Panics if `turns` is empty, mixes axes, or names a layer outside the cube.
    pub fn make_multi_layer_turn(&mut self, turns: &[Turn]) {
        let Some(first) = turns.first() else {
            panic!("a multi-layer turn needs at least one layer");
        };
        for &turn in turns {
            assert_eq!(turn.axis, first.axis, "multi-layer turns must share one axis");
            assert!(
                turn.layer < self.size,
                "{turn} is outside a cube of size {}",
                self.size
            );
            self.apply_turn(turn);
        }
        self.animation_queue.push_back(AnimationEntry {
            turns: turns.to_vec(),
            angle: 0.0,
        });
    }

    /// Permutes one layer and relabels the faces of every moved piece.
    fn apply_turn(&mut self, turn: Turn) {
        // read the whole layer before writing any of it
        let moved: Vec<(usize, PieceColors)> = layer_permutation(self.size, turn)
            .map(|(dest, source)| (dest, self.pieces[source].rotated(turn.axis, turn.clockwise)))
            .collect();
        for (dest, colors) in moved {
            self.pieces[dest] = colors;
        }
    }

    /// Applies one move token, or reports why it does not apply to this cube.
    pub fn try_move<'a>(&mut self, token: &'a str) -> Result<(), NotationError<'a>> {
        let parsed = notation::parse_move(token, self.size)?;
        for _ in 0..parsed.quarter_turns {
            self.make_multi_layer_turn(&parsed.turns);
        }
        Ok(())
    }

    /// Applies one move token. Tokens that do not apply are ignored.
    pub fn make_move(&mut self, token: &str) {
        if let Err(err) = self.try_move(token) {
            debug!("ignoring move {token:?}: {err}");
        }
    }

    /// Applies a whitespace-separated move sequence.
    pub fn make_moves(&mut self, moves: &str) {
        for token in moves.split_whitespace() {
            self.make_move(token);
        }
    }
}

/// Returns whether the cell at `location` carries a sticker on `face`.
fn is_on_face(size: usize, location: PieceLocation, face: Face) -> bool {
    let last = size - 1;
    match face {
        Face::Top => location.y == last,
        Face::Bottom => location.y == 0,
        Face::Front => location.z == last,
        Face::Back => location.z == 0,
        Face::Right => location.x == last,
        Face::Left => location.x == 0,
    }
}
