//! Grid indexing and layer permutations for an N×N×N cube.
//!
//! The grid is a flat array of `size³` cells. Index order is x-major:
//! `idx = x * size * size + y * size + z`.

use crate::cube::Cube;
use crate::geometry::{Axis, Turn};
use crate::pieces::{Face, PieceLocation};

/// Converts a location to a linear cell index.
#[inline(always)]
pub const fn coord_to_idx(size: usize, location: PieceLocation) -> usize {
    location.x * size * size + location.y * size + location.z
}

/// Converts a linear cell index to a location.
#[inline(always)]
pub const fn idx_to_coord(size: usize, cell_index: usize) -> PieceLocation {
    PieceLocation::new(
        cell_index / (size * size),
        (cell_index / size) % size,
        cell_index % size,
    )
}

/// Returns the cell at `(row, col)` of a layer projected onto the two axes
/// other than `axis`.
///
/// The projections are chosen so that mapping `(row, col)` to
/// `(col, size - 1 - row)` is a clockwise turn seen from the positive end of
/// `axis`:
/// - horizontal: `(row, col) = (z, x)`
/// - vertical: `(row, col) = (y, z)`
/// - depthical: `(row, col) = (x, y)`
#[inline]
pub const fn layer_cell(axis: Axis, layer: usize, row: usize, col: usize) -> PieceLocation {
    match axis {
        Axis::Horizontal => PieceLocation::new(col, layer, row),
        Axis::Vertical => PieceLocation::new(layer, row, col),
        Axis::Depthical => PieceLocation::new(row, col, layer),
    }
}

/// Returns the `(destination, source)` cell index pairs of a quarter turn.
///
/// A clockwise turn moves the piece at `(row, col)` to `(col, size - 1 - row)`,
/// so each destination reads from the inverse map. Every cell of the layer
/// appears exactly once as a destination and once as a source.
pub fn layer_permutation(size: usize, turn: Turn) -> impl Iterator<Item = (usize, usize)> {
    let last = size - 1;
    (0..size).flat_map(move |row| {
        (0..size).map(move |col| {
            let (source_row, source_col) = if turn.clockwise {
                (last - col, row)
            } else {
                (col, last - row)
            };
            let dest = layer_cell(turn.axis, turn.layer, row, col);
            let source = layer_cell(turn.axis, turn.layer, source_row, source_col);
            (coord_to_idx(size, dest), coord_to_idx(size, source))
        })
    })
}

/// Formats the cube as an unfolded net.
///
/// The top face comes first (back row on top), then one band with the left,
/// front, right and back faces side by side, then the bottom face (front row
/// on top). Each face is drawn as seen from outside the cube.
pub fn format_net(cube: &Cube) -> String {
    let size = cube.size();
    let last = size - 1;
    let sticker = |x: usize, y: usize, z: usize, face: Face| {
        cube.piece_colors(PieceLocation::new(x, y, z))
            .map_or(' ', |colors| colors[face].letter())
    };
    let indent = " ".repeat(size + 1);

    let mut output = String::new();

    for z in 0..size {
        output.push_str(&indent);
        output.extend((0..size).map(|x| sticker(x, last, z, Face::Top)));
        output.push('\n');
    }

    for y in (0..size).rev() {
        output.extend((0..size).map(|z| sticker(0, y, z, Face::Left)));
        output.push(' ');
        output.extend((0..size).map(|x| sticker(x, y, last, Face::Front)));
        output.push(' ');
        output.extend((0..size).rev().map(|z| sticker(last, y, z, Face::Right)));
        output.push(' ');
        output.extend((0..size).rev().map(|x| sticker(x, y, 0, Face::Back)));
        output.push('\n');
    }

    for z in (0..size).rev() {
        output.push_str(&indent);
        output.extend((0..size).map(|x| sticker(x, 0, z, Face::Bottom)));
        output.push('\n');
    }

    output
}
