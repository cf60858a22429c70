// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Conversions between playback time and frame indices.
//!
//! The player works in milliseconds while the decoder seeks by frame index.
//! Frame indices are always floored, never rounded.

use crate::error::MediaError;

/// Check that a frame rate reported by a backend is usable.
pub fn validate_fps(fps: f64) -> Result<f64, MediaError> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(MediaError::InvalidFps(fps))
    }
}

/// Frame shown at `position_ms`: `floor(fps * position_ms / 1000)`.
pub fn frame_index_at(fps: f64, position_ms: u64) -> Result<u64, MediaError> {
    let fps = validate_fps(fps)?;
    Ok((fps * (position_ms as f64 / 1000.0)).floor() as u64)
}

/// Length of `frame_count` frames in milliseconds.
pub fn duration_ms(fps: f64, frame_count: u64) -> Result<u64, MediaError> {
    let fps = validate_fps(fps)?;
    Ok((frame_count as f64 * 1000.0 / fps).floor() as u64)
}
