//! Province adjacency derived from the tile grid.
//!
//! The grid is sampled rather than scanned: every `BORDER_SAMPLE_STRIDE`
//! tiles in both axes an anchor looks at the `(2r+1)²` window around it and
//! records a border to each foreign province it sees. Cost is bounded by
//! `(w/5)·(h/5)·25` tile reads. Thin slivers of a province that fall between
//! anchors can be missed; that loss is accepted.

use std::collections::HashSet;

use tracing::debug;

use crate::model::{Border, TileGrid};
use crate::store::Repository;

/// Distance between anchor tiles on both axes.
pub const BORDER_SAMPLE_STRIDE: u32 = 5;

/// Half-width of the window scanned around each anchor.
pub const BORDER_SAMPLE_RADIUS: i64 = 2;

/// Province pairs seen by the sampler, in discovery order, one entry per
/// unordered pair. The first anchor to see a pair decides its orientation.
pub fn sample_borders(tiles: &TileGrid) -> Vec<(String, String)> {
    let mut found: Vec<(String, String)> = Vec::new();
    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();

    for_each_anchor_pair(tiles, |anchor, neighbour| {
        let key = unordered(anchor, neighbour);
        if seen_pairs.insert(key) {
            found.push((anchor.to_string(), neighbour.to_string()));
        }
    });

    found
}

/// Run the sampler and record new borders in `borders`. Pairs already
/// present, in either orientation, are left alone. Returns how many borders
/// were added.
pub fn generate_borders(tiles: &TileGrid, borders: &Repository<Border>) -> usize {
    let mut added = 0;
    for_each_anchor_pair(tiles, |anchor, neighbour| {
        let border = Border::new(anchor, neighbour);
        if borders.insert_if_absent(border.id.clone(), border) {
            added += 1;
        }
    });

    debug!(
        width = tiles.width(),
        height = tiles.height(),
        added,
        total = borders.len(),
        "generated province borders"
    );
    added
}

/// Calls `record(anchor_province, other_province)` once per distinct foreign
/// province seen from each anchor. Anchors go column by column (x outer),
/// window offsets likewise (dx outer).
fn for_each_anchor_pair(tiles: &TileGrid, mut record: impl FnMut(&str, &str)) {
    let stride = BORDER_SAMPLE_STRIDE as usize;

    for x in (0..tiles.width()).step_by(stride) {
        for y in (0..tiles.height()).step_by(stride) {
            let Some(anchor) = tiles.get(x, y) else {
                continue;
            };
            let mut visited: Vec<&str> = Vec::new();

            for dx in -BORDER_SAMPLE_RADIUS..=BORDER_SAMPLE_RADIUS {
                for dy in -BORDER_SAMPLE_RADIUS..=BORDER_SAMPLE_RADIUS {
                    let (nx, ny) = (i64::from(x) + dx, i64::from(y) + dy);
                    if !tiles.contains(nx, ny) {
                        continue;
                    }
                    let Some(tile) = tiles.get(nx as u32, ny as u32) else {
                        continue;
                    };
                    let other = tile.province_id.as_str();
                    if other != anchor.province_id && !visited.contains(&other) {
                        record(&anchor.province_id, other);
                        visited.push(other);
                    }
                }
            }
        }
    }
}

fn unordered(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
