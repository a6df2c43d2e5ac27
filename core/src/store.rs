// SPDX-License-Identifier: MIT OR Apache-2.0

//! Latest board snapshot and render metrics received from the server.

use crate::model::{BoardSnapshot, RenderMetrics, SnapshotError};

#[derive(Debug, Default, Clone)]
pub struct SnapshotStore {
    snapshot: Option<BoardSnapshot>,
    metrics: Option<RenderMetrics>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot. Malformed snapshots leave the store untouched.
    pub fn replace_snapshot(&mut self, snapshot: BoardSnapshot) -> Result<(), SnapshotError> {
        snapshot.validate()?;
        self.snapshot = Some(snapshot);
        Ok(())
    }

    pub fn set_metrics(&mut self, metrics: RenderMetrics) {
        self.metrics = Some(metrics);
    }

    pub fn snapshot(&self) -> Option<&BoardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn metrics(&self) -> Option<&RenderMetrics> {
        self.metrics.as_ref()
    }

    /// Both halves at once, with the snapshot open for in-place drag edits
    pub fn parts_mut(&mut self) -> Option<(&mut BoardSnapshot, &RenderMetrics)> {
        match (self.snapshot.as_mut(), self.metrics.as_ref()) {
            (Some(snapshot), Some(metrics)) => Some((snapshot, metrics)),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.snapshot.is_some() && self.metrics.is_some()
    }
}
