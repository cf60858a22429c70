// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Writing saved frames and the frame-angle table.
//!
//! Images are written as PNG; the table is a JSON object rewritten in
//! full on every save.

use crate::error::SnipError;
use crate::models::session::FrameTable;
use image::RgbImage;
use std::path::Path;

/// Create the output directory (and parents) if needed.
pub fn ensure_dir(path: &Path) -> Result<(), SnipError> {
    std::fs::create_dir_all(path).map_err(|source| SnipError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Export a frame as PNG, replacing any existing file.
pub fn export_png(frame: &RgbImage, path: &Path) -> Result<(), SnipError> {
    frame
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| SnipError::WriteImage {
            path: path.to_path_buf(),
            source,
        })
}

/// Export the frame-angle table to JSON, replacing any existing file.
pub fn export_json(table: &FrameTable, path: &Path) -> Result<(), SnipError> {
    let json = serde_json::to_string(table)?;
    std::fs::write(path, json).map_err(|source| SnipError::WriteSidecar {
        path: path.to_path_buf(),
        source,
    })
}
