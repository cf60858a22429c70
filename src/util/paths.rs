// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Output location for saved frames.
//!
//! Frames from `/a/b/c/d/e/f/g/clip.mp4` land in `<root>/c/d/e/f/g`, so the
//! output tree mirrors the tail of the source tree.

use std::path::{Component, Path, PathBuf};

/// How many trailing directory names of the source are kept.
pub const KEPT_COMPONENTS: usize = 5;

/// Directory under `root` that receives the frames of a video stored in
/// `source_dir`.
///
/// Only normal path components count; root, prefix, `.` and `..` entries
/// are dropped so the result can never escape `root`.
pub fn destination_dir(root: &Path, source_dir: &Path) -> PathBuf {
    let names: Vec<_> = source_dir
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name),
            _ => None,
        })
        .collect();

    let start = names.len().saturating_sub(KEPT_COMPONENTS);
    names[start..]
        .iter()
        .fold(root.to_path_buf(), |dir, name| dir.join(name))
}
