// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types surfaced to the status line.
//!
//! Nothing in here is fatal: every variant ends up as a message in the
//! window and the session stays usable (or, for playback errors, waits for
//! a new file to be opened).

use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a video backend.
#[derive(Debug, Error)]
#[cfg_attr(not(feature = "video-opencv"), allow(dead_code))]
pub enum MediaError {
    #[error("could not open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error("video support is not compiled in (rebuild with --features video-opencv)")]
    Unsupported,

    #[error("video reports an invalid frame rate ({0})")]
    InvalidFps(f64),

    #[error("could not seek to frame {index}: {reason}")]
    Seek { index: u64, reason: String },

    #[error("could not read frame {index}: {reason}")]
    Read { index: u64, reason: String },

    #[error("no frame available at index {index} (end of stream)")]
    EndOfStream { index: u64 },
}

/// Failures of a controller operation.
#[derive(Debug, Error)]
pub enum SnipError {
    #[error("no video is loaded")]
    NoVideo,

    #[error("angle must be a whole number, got {0:?}")]
    InvalidAngle(String),

    #[error("playhead is past the last frame (frame {index} of {frame_count}); step back to save")]
    PastLastFrame { index: u64, frame_count: u64 },

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("could not create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write image {}: {source}", path.display())]
    WriteImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not write frame-angle table {}: {source}", path.display())]
    WriteSidecar {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode frame-angle table: {0}")]
    EncodeSidecar(#[from] serde_json::Error),
}
