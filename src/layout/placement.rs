//! Placement of new scenes on the canvas
//!
//! Two strategies:
//! - a single row for scenes outside the components subtree, advancing a
//!   cursor by a fixed spacing
//! - one grid per components cluster, capped at `max_columns` columns, with
//!   clusters laid out left to right
//!
//! Candidate slots that overlap an occupied rect are skipped, so new scenes
//! never land on kept ones.

use crate::config::LayoutConfig;
use crate::scanner::Size;

use super::types::{Position, Rect};

/// Tracks occupied canvas space while placing scenes
#[derive(Debug)]
pub struct Placer<'a> {
    layout: &'a LayoutConfig,
    occupied: Vec<Rect>,
}

impl<'a> Placer<'a> {
    /// `occupied` holds rects of scenes that keep their positions
    pub fn new(layout: &'a LayoutConfig, occupied: Vec<Rect>) -> Self {
        Self { layout, occupied }
    }

    fn is_free(&self, rect: &Rect) -> bool {
        !self.occupied.iter().any(|o| o.overlaps(rect))
    }

    fn claim(&mut self, position: Position, size: Size) -> Position {
        self.occupied.push(Rect::new(position, size));
        position
    }

    /// Place scenes side by side at the row offset.
    pub fn place_row(&mut self, sizes: &[Size]) -> Vec<Position> {
        let step = self.layout.row_spacing.max(1);
        let mut cursor = self.layout.row_start_left;

        sizes
            .iter()
            .map(|&size| {
                let mut position = Position::new(cursor, self.layout.row_top);
                while !self.is_free(&Rect::new(position, size)) && cursor < i32::MAX {
                    cursor = cursor.saturating_add(step);
                    position = Position::new(cursor, self.layout.row_top);
                }
                cursor = cursor.saturating_add(step);
                self.claim(position, size)
            })
            .collect()
    }

    /// Tile each cluster into its own grid.
    ///
    /// Clusters are placed in the order given. Every cell of a cluster is as
    /// large as its largest scene plus the grid gap, so scenes of one cluster
    /// never overlap each other.
    pub fn place_clusters(&mut self, clusters: &[Vec<Size>]) -> Vec<Vec<Position>> {
        let gap = self.layout.grid_gap.max(0);
        let mut cluster_left = self.layout.clusters_start_left;

        clusters
            .iter()
            .map(|sizes| {
                let columns = sizes.len().clamp(1, self.layout.max_columns.max(1));
                let cell_width = sizes.iter().map(|s| s.width).max().unwrap_or(0) + gap;
                let cell_height = sizes.iter().map(|s| s.height).max().unwrap_or(0) + gap;

                let mut slot = 0usize;
                let positions: Vec<Position> = sizes
                    .iter()
                    .map(|&size| loop {
                        let col = (slot % columns) as i32;
                        let row = (slot / columns) as i32;
                        slot += 1;

                        let position = Position::new(
                            cluster_left + col * cell_width,
                            self.layout.clusters_top + row * cell_height,
                        );
                        if self.is_free(&Rect::new(position, size)) {
                            break self.claim(position, size);
                        }
                    })
                    .collect();

                let cluster_width = columns as i32 * cell_width;
                cluster_left += self.layout.cluster_offset.max(cluster_width);
                positions
            })
            .collect()
    }
}
