// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-video session state.
//!
//! A session lives from one successful open to the next. It remembers where
//! the video came from, which angle the next save will use, and which frame
//! was captured for every angle so far.

use super::angle::Angle;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Angle to frame index, serialized as `{"0": 30, "45": 250}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrameTable(BTreeMap<u32, u64>);

impl FrameTable {
    pub fn insert(&mut self, angle: Angle, frame_index: u64) {
        self.0.insert(angle.degrees(), frame_index);
    }

    pub fn get(&self, angle: Angle) -> Option<u64> {
        self.0.get(&angle.degrees()).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in ascending angle order.
    pub fn iter(&self) -> impl Iterator<Item = (Angle, u64)> + '_ {
        self.0.iter().map(|(deg, idx)| (Angle::new(*deg as i64), *idx))
    }
}

/// The currently open video.
#[derive(Debug, Clone)]
pub struct Session {
    pub directory: PathBuf,
    pub basename: String,
    pub angle: Angle,
    pub frames: FrameTable,
}

impl Session {
    /// Start a fresh session. The table is always empty, whatever is on disk.
    pub fn new(source: &Path) -> Self {
        let directory = source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let basename = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frame".to_string());

        Self {
            directory,
            basename,
            angle: Angle::default(),
            frames: FrameTable::default(),
        }
    }

    /// File name of the image saved for `angle`.
    pub fn image_name(&self, angle: Angle) -> String {
        format!("{}_{}.png", self.basename, angle)
    }

    /// File name of the sidecar table.
    pub fn sidecar_name(&self) -> String {
        format!("{}_frame_angle.json", self.basename)
    }
}
